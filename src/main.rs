use clap::Parser;
use geopin::app::{self, render::DisplaySettings};
use geopin::utils::{logger, validation::Validate};
use geopin::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 檔案為選用
    let _ = dotenvy::dotenv();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting geopin CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = DisplaySettings {
        latitude_delta: config.latitude_delta(),
        longitude_delta: config.longitude_delta(),
        output: config.output,
    };

    let exit_code = app::run(&config, config.address.as_deref(), settings).await?;
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
