use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Provider responded with HTTP {status}")]
    TransportError { status: u16 },

    #[error("Address not found: {address}")]
    NotFoundError { address: String },

    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Provider,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GeoError {
    pub fn validation(message: impl Into<String>) -> Self {
        GeoError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GeoError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoError::ValidationError { .. } => ErrorCategory::Input,
            GeoError::ConfigError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GeoError::TransportError { .. } | GeoError::HttpError(_) => ErrorCategory::Network,
            GeoError::NotFoundError { .. }
            | GeoError::SerializationError(_)
            | GeoError::ProcessingError { .. } => ErrorCategory::Provider,
            GeoError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GeoError::ValidationError { .. } | GeoError::NotFoundError { .. } => {
                ErrorSeverity::Low
            }
            GeoError::TransportError { .. } | GeoError::HttpError(_) => ErrorSeverity::Medium,
            GeoError::SerializationError(_) | GeoError::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            GeoError::ConfigError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. }
            | GeoError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 暫時性錯誤：5xx 或連線/逾時失敗
    pub fn is_retryable(&self) -> bool {
        match self {
            GeoError::TransportError { status } => *status >= 500,
            GeoError::HttpError(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Message shown to the person who typed the address.
    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoError::ValidationError { .. } => "Please enter an address first".to_string(),
            GeoError::ConfigError { message } => message.clone(),
            GeoError::TransportError { status } => format!("HTTP {}", status),
            GeoError::NotFoundError { .. } => "Address not found".to_string(),
            GeoError::HttpError(_)
            | GeoError::SerializationError(_)
            | GeoError::ProcessingError { .. } => "Failed to fetch coordinates".to_string(),
            GeoError::IoError(e) => format!("Could not read configuration: {}", e),
            GeoError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            GeoError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Type a non-empty address and try again",
            ErrorCategory::Configuration => {
                "Set GEOCODING_API_SECRET_KEY (or --api-key) and check the provider settings"
            }
            ErrorCategory::Network => {
                "Check the network connection and provider status, then retry"
            }
            ErrorCategory::Provider => "Try a more specific address",
            ErrorCategory::System => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
