//! Error types for Stride

use thiserror::Error;

/// The main error type for Stride operations
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Animation error: {0}")]
    AnimationError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Stride operations
pub type Result<T> = std::result::Result<T, StrideError>;

impl From<toml::de::Error> for StrideError {
    fn from(err: toml::de::Error) -> Self {
        StrideError::TomlParseError(err.to_string())
    }
}
