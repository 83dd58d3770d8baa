use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoroscopeError {
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request to {endpoint} failed with status {status}: {body}")]
    ApiRejected {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
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
    Network,
    Api,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HoroscopeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HoroscopeError::Transport(_) => ErrorCategory::Network,
            HoroscopeError::ApiRejected { .. } => ErrorCategory::Api,
            HoroscopeError::MalformedResponse { .. } | HoroscopeError::SerializationError(_) => {
                ErrorCategory::Data
            }
            HoroscopeError::IoError(_) => ErrorCategory::System,
            HoroscopeError::ConfigError { .. }
            | HoroscopeError::ConfigValidationError { .. }
            | HoroscopeError::InvalidConfigValueError { .. }
            | HoroscopeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HoroscopeError::Transport(_) => ErrorSeverity::Medium,
            HoroscopeError::ApiRejected { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            HoroscopeError::ApiRejected { .. } => ErrorSeverity::High,
            HoroscopeError::MalformedResponse { .. } | HoroscopeError::SerializationError(_) => {
                ErrorSeverity::High
            }
            HoroscopeError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HoroscopeError::Transport(_) => {
                "Check your network connection and that the API base URLs are reachable"
            }
            HoroscopeError::ApiRejected { status: 401, .. }
            | HoroscopeError::ApiRejected { status: 403, .. } => {
                "Check the API credentials (ASTROLOGY_USER_ID, ASTROLOGY_API_KEY, GROQ_API_KEY)"
            }
            HoroscopeError::ApiRejected { status, .. } if *status >= 500 => {
                "The remote service is having trouble, try again later"
            }
            HoroscopeError::ApiRejected { .. } => {
                "Check the endpoint names and birth details in your configuration"
            }
            HoroscopeError::MalformedResponse { .. } | HoroscopeError::SerializationError(_) => {
                "The service returned data in an unexpected format"
            }
            HoroscopeError::IoError(_) => "Check file permissions and that the path exists",
            HoroscopeError::MissingConfigError { .. } => {
                "Set the missing value in the config file or the environment"
            }
            _ => "Review the configuration file against horoscope.toml",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HoroscopeError::Transport(e) if e.is_timeout() => {
                "The request timed out before the service answered".to_string()
            }
            HoroscopeError::Transport(_) => "Could not reach the remote service".to_string(),
            HoroscopeError::ApiRejected {
                endpoint, status, ..
            } => format!("The {} request was rejected ({})", endpoint, status),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HoroscopeError>;
