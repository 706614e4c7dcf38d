use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("{message}")]
    UsageError { message: String },
}

impl SchoolError {
    pub fn usage(message: impl Into<String>) -> Self {
        SchoolError::UsageError {
            message: message.into(),
        }
    }

    /// Short message suitable for the console.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SchoolError::CsvError(e) => format!("Could not parse data file: {}", e),
            SchoolError::IoError(e) => format!("File operation failed: {}", e),
            SchoolError::SerializationError(e) => format!("Could not serialize data: {}", e),
            SchoolError::ConfigError { message } => format!("Invalid configuration: {}", message),
            SchoolError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SchoolError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            SchoolError::UsageError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SchoolError::CsvError(_) => "Check that every line is comma-separated",
            SchoolError::IoError(_) => "Check that the file exists and the directory is writable",
            SchoolError::SerializationError(_) => "Re-run the export; report this if it persists",
            SchoolError::ConfigError { .. }
            | SchoolError::ConfigValidationError { .. }
            | SchoolError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and restart"
            }
            SchoolError::UsageError { .. } => "Type a command from the list above",
        }
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;
