pub mod interactive;
pub mod render;

use crate::adapters::http::MapsCoGeocoder;
use crate::core::resolver::AddressResolver;
use crate::core::session::SearchSession;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::ErrorSeverity;
use render::{render_pin, DisplaySettings};

/// Resolves `address` once, or runs the stdin loop when it is `None`.
///
/// Returns the process exit code.
pub async fn run<C: ConfigProvider>(
    config: &C,
    address: Option<&str>,
    settings: DisplaySettings,
) -> anyhow::Result<i32> {
    let geocoder = MapsCoGeocoder::from_config(config)?;
    let resolver = AddressResolver::new(geocoder);

    if config.api_key().is_none() {
        tracing::warn!(
            "⚠️  No API credential configured, set {} or --api-key",
            crate::config::API_KEY_ENV
        );
    }

    let Some(address) = address else {
        let session = SearchSession::new(resolver, config.api_key().map(str::to_string));
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        interactive::run_interactive(&session, stdin, &mut stdout, settings).await?;
        return Ok(0);
    };

    match resolver.resolve(address, config.api_key()).await {
        Ok(result) => {
            println!("{}", render_pin(&settings.pin(&result), settings.output)?);
            Ok(0)
        }
        Err(e) => {
            tracing::error!(
                "❌ Geocoding failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            Ok(match e.severity() {
                ErrorSeverity::Low => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            })
        }
    }
}
