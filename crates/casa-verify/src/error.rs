//! # Verifier Error Types
//!
//! Errors raised while setting up the verifier.
//!
//! Receipt rejections are NOT in here: those are ordinary outcomes returned
//! by [`ReceiptValidator::validate`](crate::ReceiptValidator::validate) as
//! [`ReceiptError`](casa_core::ReceiptError) values.

use thiserror::Error;

/// Result type alias for verifier setup operations.
pub type VerifierResult<T> = Result<T, VerifierError>;

/// Verifier setup failures.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// Configuration loaded but failed validation.
    #[error("Invalid verifier configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Export snapshot could not be serialized.
    #[error("Failed to serialize export: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for VerifierError {
    fn from(err: std::io::Error) -> Self {
        VerifierError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for VerifierError {
    fn from(err: toml::de::Error) -> Self {
        VerifierError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for VerifierError {
    fn from(err: toml::ser::Error) -> Self {
        VerifierError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for VerifierError {
    fn from(err: serde_json::Error) -> Self {
        VerifierError::ExportFailed(err.to_string())
    }
}
