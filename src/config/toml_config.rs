use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::config::{normalize_api_key, OutputFormat};
use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA};
use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_latitude_delta")]
    pub latitude_delta: f64,
    #[serde(default = "default_longitude_delta")]
    pub longitude_delta: f64,
    #[serde(default)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_latitude_delta() -> f64 {
    DEFAULT_LATITUDE_DELTA
}

fn default_longitude_delta() -> f64 {
    DEFAULT_LONGITUDE_DELTA
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_seconds: None,
            retry_attempts: None,
            retry_delay_ms: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
            output: OutputFormat::Text,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &normalize_api_key(self.api_key.as_deref()).map(|_| "***"),
            )
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GeoError::InvalidConfigValueError {
            field: "toml".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEOCODING_API_SECRET_KEY})；未設定者保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output(&self) -> OutputFormat {
        self.display.output
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.provider.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        normalize_api_key(self.provider.api_key.as_deref())
    }

    fn timeout(&self) -> Option<Duration> {
        self.provider.timeout_seconds.map(Duration::from_secs)
    }

    fn retry_attempts(&self) -> u32 {
        self.provider.retry_attempts.unwrap_or(0)
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.provider.retry_delay_ms.unwrap_or(500))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("provider.endpoint", &self.provider.endpoint)?;

        if let Some(timeout) = self.provider.timeout_seconds {
            validation::validate_positive_number("provider.timeout_seconds", timeout, 1)?;
        }

        validation::validate_range("provider.retry_attempts", self.retry_attempts(), 0, 10)?;
        validation::validate_delta("display.latitude_delta", self.display.latitude_delta)?;
        validation::validate_delta("display.longitude_delta", self.display.longitude_delta)?;

        if let Some(level) = self.log_level() {
            validation::validate_non_empty_string("logging.level", level)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[provider]
endpoint = "https://geocode.example.com"
api_key = "abc123"
timeout_seconds = 5
retry_attempts = 2

[display]
latitude_delta = 0.05
output = "json"

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.endpoint(), "https://geocode.example.com");
        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.display.latitude_delta, 0.05);
        assert_eq!(config.display.longitude_delta, DEFAULT_LONGITUDE_DELTA);
        assert_eq!(config.output(), OutputFormat::Json);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.retry_attempts(), 0);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GEOPIN_TEST_KEY_SUBST", "from-env");

        let toml_content = r#"
[provider]
api_key = "${GEOPIN_TEST_KEY_SUBST}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("from-env"));

        std::env::remove_var("GEOPIN_TEST_KEY_SUBST");
    }

    #[test]
    fn test_unresolved_placeholder_means_no_key() {
        let toml_content = r#"
[provider]
api_key = "${GEOPIN_TEST_KEY_NEVER_SET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), None);
        assert!(!format!("{:?}", config).contains("GEOPIN_TEST_KEY_NEVER_SET"));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[provider]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[display]
longitude_delta = -1.0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[provider]
retry_attempts = 50
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        assert!(TomlConfig::from_toml_str("[provider\nendpoint = 1").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\nendpoint = \"http://localhost:1234\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.endpoint(), "http://localhost:1234");
    }
}
