pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod session;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{LocalStorage, StdoutHost};
pub use config::{toml_config::TomlConfig, LookupConfig};
pub use crate::core::{fetch::HttpGeocoder, pipeline::LookupPipeline};
pub use domain::model::{ExecuteOutcome, GeocodeResult, OutputRecord};
pub use session::{SessionId, SessionRegistry};
pub use utils::error::{LookupError, Result};
