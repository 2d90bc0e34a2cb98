#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::ActionTargets;
use crate::domain::ports::ConfigSource;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    pub api_key: String,
    pub results_save: String,
    pub on_complete_action: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub action_targets: ActionTargets,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            results_save: String::new(),
            on_complete_action: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            action_targets: ActionTargets::default(),
        }
    }
}

impl LookupConfig {
    /// Reads the measure options. Never fails: missing required keys are
    /// logged and the lookup fails later when it runs.
    pub fn load(source: &impl ConfigSource) -> Self {
        let read = |key: &str| {
            source
                .read_string(key)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };
        let read_or = |key: &str, default: String| {
            let value = read(key);
            if value.is_empty() {
                default
            } else {
                value
            }
        };

        let defaults = LookupConfig::default();
        let config = LookupConfig {
            api_key: read("ApiKey"),
            results_save: read("ResultsSave"),
            on_complete_action: read("OnCompleteAction"),
            endpoint: read_or("Endpoint", defaults.endpoint),
            timeout_seconds: parse_timeout(&read("TimeoutSeconds")),
            action_targets: ActionTargets {
                global_var_file: read_or("GlobalVarFile", defaults.action_targets.global_var_file),
                target_config: read_or("TargetConfig", defaults.action_targets.target_config),
                toggle_measure: read_or("ToggleMeasure", defaults.action_targets.toggle_measure),
            },
        };

        if config.api_key.is_empty() {
            tracing::error!("'ApiKey' must be provided.");
        }
        if config.results_save.is_empty() {
            tracing::error!("'ResultsSave' must be provided.");
        }

        config
    }
}

fn parse_timeout(raw: &str) -> u64 {
    if raw.is_empty() {
        return DEFAULT_TIMEOUT_SECONDS;
    }

    match raw.parse::<u64>() {
        Ok(seconds) if (1..=MAX_TIMEOUT_SECONDS).contains(&seconds) => seconds,
        _ => {
            tracing::error!(
                "Invalid TimeoutSeconds '{}', using {}s",
                raw,
                DEFAULT_TIMEOUT_SECONDS
            );
            DEFAULT_TIMEOUT_SECONDS
        }
    }
}

impl Validate for LookupConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("ApiKey", &self.api_key)?;
        validation::validate_path("ResultsSave", &self.results_save)?;
        validation::validate_secure_url("Endpoint", &self.endpoint)?;
        validation::validate_range(
            "TimeoutSeconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }
}
