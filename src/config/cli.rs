use crate::config::toml_config::TomlConfig;
use crate::domain::ports::ConfigSource;
use crate::utils::error::Result;
use clap::Parser;
use std::collections::HashMap;

#[derive(Debug, Clone, Parser)]
#[command(name = "city-lookup")]
#[command(about = "Geocode a city name and write the result for the display layer")]
pub struct CliConfig {
    /// TOML file with a [measure] table
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    /// Results file the display layer reads
    #[arg(long)]
    pub results_save: Option<String>,

    #[arg(long)]
    pub on_complete_action: Option<String>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Place name, optionally prefixed with "Execute"
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

impl CliConfig {
    pub fn request(&self) -> String {
        self.args.join(" ")
    }

    /// Command-line flags layered over the TOML file, if one was given.
    pub fn config_source(&self) -> Result<LayeredSource> {
        let base = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut overrides = HashMap::new();
        let flags = [
            ("ApiKey", self.api_key.clone()),
            ("ResultsSave", self.results_save.clone()),
            ("OnCompleteAction", self.on_complete_action.clone()),
            ("Endpoint", self.endpoint.clone()),
            ("TimeoutSeconds", self.timeout_seconds.map(|s| s.to_string())),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                overrides.insert(key.to_string(), value);
            }
        }

        Ok(LayeredSource { overrides, base })
    }
}

#[derive(Debug, Clone)]
pub struct LayeredSource {
    overrides: HashMap<String, String>,
    base: TomlConfig,
}

impl ConfigSource for LayeredSource {
    fn read_string(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.base.read_string(key))
    }
}
