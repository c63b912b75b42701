use clap::Parser;
use geopin::app::{self, render::DisplaySettings};
use geopin::core::ConfigProvider;
use geopin::utils::{logger, validation::Validate};
use geopin::TomlConfig;

#[derive(Parser)]
#[command(name = "toml-geopin")]
#[command(about = "Address to map pin, driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "geopin.toml")]
    config: String,

    /// Address to resolve; reads addresses from stdin when omitted
    #[arg(short, long)]
    address: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the effective configuration without making any request
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let settings = DisplaySettings {
        latitude_delta: config.display.latitude_delta,
        longitude_delta: config.display.longitude_delta,
        output: config.output(),
    };

    let exit_code = app::run(&config, args.address.as_deref(), settings).await?;
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("🔍 DRY RUN - no request will be sent");
    println!("   endpoint:       {}", config.endpoint());
    println!(
        "   credential:     {}",
        if config.api_key().is_some() {
            "configured"
        } else {
            "missing"
        }
    );
    println!(
        "   timeout:        {}",
        config
            .timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "   retries:        {} (delay {}ms)",
        config.retry_attempts(),
        config.retry_delay().as_millis()
    );
    println!(
        "   map span:       {} x {}",
        config.display.latitude_delta, config.display.longitude_delta
    );
    println!("   output:         {:?}", config.output());
}
