//! Unified error types for strata

use thiserror::Error;

/// Unified error type for all strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    // Construction errors
    #[error("Invalid expression: {0}")]
    Validation(String),

    // Decoding errors
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to decode line {line}: {message}")]
    Decode { line: usize, message: String },

    // JJ errors
    #[error("JJ command failed: {0}")]
    JjCommand(String),

    #[error("JJ command timed out after {0}s")]
    Timeout(u64),

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using StrataError
pub type Result<T> = std::result::Result<T, StrataError>;
