use city_lookup::utils::{logger, validation::Validate};
use city_lookup::{CliConfig, ExecuteOutcome, LookupConfig, LookupPipeline, StdoutHost};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    let source = match cli.config_source() {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let config = LookupConfig::load(&source);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let results_save = config.results_save.clone();
    let mut pipeline = LookupPipeline::from_config(config, StdoutHost)?;

    match pipeline.execute(&cli.request()).await {
        ExecuteOutcome::Rejected => {
            eprintln!("❌ No city name provided");
            std::process::exit(2);
        }
        ExecuteOutcome::Saved { written: false, .. } => {
            eprintln!("❌ Could not write results to {}", results_save);
            std::process::exit(1);
        }
        ExecuteOutcome::Saved { record, .. } => {
            tracing::info!("📁 Results saved to: {}", results_save);
            tracing::debug!("Record: {:?}", record);
        }
    }

    Ok(())
}
