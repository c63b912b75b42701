use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::config::{normalize_api_key, OutputFormat};
use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "geopin")]
#[command(about = "Resolve an address to coordinates and show it as a map pin")]
pub struct CliConfig {
    /// Address to resolve; reads addresses from stdin when omitted
    #[arg(short, long)]
    pub address: Option<String>,

    #[arg(long, env = "GEOCODING_API_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "GEOCODING_API_SECRET_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout; no timeout when unset
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, default_value = "0")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "500")]
    pub retry_delay_ms: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn latitude_delta(&self) -> f64 {
        DEFAULT_LATITUDE_DELTA
    }

    pub fn longitude_delta(&self) -> f64 {
        DEFAULT_LONGITUDE_DELTA
    }
}

// 不輸出金鑰內容
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("address", &self.address)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("output", &self.output)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        normalize_api_key(self.api_key.as_deref())
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        validation::validate_range("retry_attempts", self.retry_attempts, 0, 10)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["geopin", "--endpoint", DEFAULT_ENDPOINT]);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.retry_attempts(), 0);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_and_validation() {
        let config = CliConfig::parse_from([
            "geopin",
            "--address",
            "Paris",
            "--endpoint",
            "http://localhost:9000",
            "--api-key",
            "secret",
            "--timeout-seconds",
            "3",
            "--retry-attempts",
            "2",
            "--output",
            "json",
        ]);
        assert_eq!(config.address.as_deref(), Some("Paris"));
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.validate().is_ok());
        assert!(!format!("{:?}", config).contains("secret"));

        let mut bad = config.clone();
        bad.retry_attempts = 11;
        assert!(bad.validate().is_err());

        let mut bad = config;
        bad.timeout_seconds = Some(0);
        assert!(bad.validate().is_err());
    }
}
