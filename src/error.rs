use thiserror::Error;

pub type Result<T> = std::result::Result<T, RebrandError>;

#[derive(Error, Debug)]
pub enum RebrandError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Profile errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons a raw phone string cannot be turned into an E.164 number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number contains no digits")]
    Empty,

    #[error("phone number has only {digits} digit(s)")]
    TooShort { digits: usize },
}
