//! Domain error types for evchain
//!
//! Everything that can go wrong is rejected up front, while events, roles
//! and weights are being built from text or configuration. Dispatch itself
//! only fails if the output sink does.

use thiserror::Error;

/// Top-level error type for evchain
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Unknown event kind '{0}'")]
    UnknownEventKind(String),

    #[error("Unknown handler '{0}' (expected mouse, keypress, timer, null or debug)")]
    UnknownHandler(String),

    #[error("Invalid event weights: {0}")]
    InvalidWeights(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ChainError
pub type Result<T> = std::result::Result<T, ChainError>;
