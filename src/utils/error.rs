use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConformanceError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ConformanceError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConformanceError::Http(e) if e.is_connect() => {
                "Could not connect to the API server".to_string()
            }
            ConformanceError::Http(_) => "The API request failed".to_string(),
            ConformanceError::Json(_) => "The response body was not valid JSON".to_string(),
            ConformanceError::Io(e) => format!("File access failed: {}", e),
            ConformanceError::Url(e) => format!("Invalid URL: {}", e),
            ConformanceError::ConfigError { message } => format!("Configuration problem: {}", message),
            ConformanceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ConformanceError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
        }
    }

    /// Every error that reaches `main` happens before the first check runs.
    pub fn exit_code(&self) -> i32 {
        crate::core::runner::EXIT_CONFIG_ERROR
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConformanceError::Http(_) => "Make sure the API server is running and reachable",
            ConformanceError::Json(_) => "Check that the endpoint returns application/json",
            ConformanceError::Io(_) => "Check that the file exists and is readable",
            ConformanceError::Url(_) | ConformanceError::InvalidConfigValueError { .. } => {
                "Fix the value on the command line or in the suite file"
            }
            ConformanceError::ConfigError { .. } => "Check the suite file is valid TOML",
            ConformanceError::MissingConfigError { .. } => "Add the missing setting to the suite file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConformanceError>;
