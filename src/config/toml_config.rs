use crate::domain::ports::ConfigSource;
use crate::utils::error::{LookupError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Measure options kept in a TOML file:
///
/// ```toml
/// [measure]
/// ApiKey = "${OPENCAGE_API_KEY}"
/// ResultsSave = "SearchResults.nek"
/// OnCompleteAction = "[!Redraw]"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub measure: HashMap<String, toml::Value>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENCAGE_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigSource for TomlConfig {
    fn read_string(&self, key: &str) -> Option<String> {
        self.measure.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_measure_section() {
        let toml_content = r#"
[measure]
ApiKey = "abc"
ResultsSave = "SearchResults.nek"
TimeoutSeconds = 10
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.read_string("ApiKey").as_deref(), Some("abc"));
        assert_eq!(config.read_string("TimeoutSeconds").as_deref(), Some("10"));
        assert_eq!(config.read_string("OnCompleteAction"), None);

        let lookup = LookupConfig::load(&config);
        assert_eq!(lookup.timeout_seconds, 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CITY_LOOKUP_TEST_KEY", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[measure]
ApiKey = "${CITY_LOOKUP_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.read_string("ApiKey").as_deref(), Some("from-env"));

        std::env::remove_var("CITY_LOOKUP_TEST_KEY");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[measure\nApiKey=").unwrap_err();
        assert!(matches!(err, LookupError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[measure]\nResultsSave = \"out.nek\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.read_string("ResultsSave").as_deref(), Some("out.nek"));
    }
}
