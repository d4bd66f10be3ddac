//! Engine error types
//!
//! Everything in the hot path (classification, filtering, deadline
//! assessment) is total and never returns an error. Errors exist only at
//! the edges: loading configuration and constructing threshold tables.

use thiserror::Error;

/// Error category for structured logging and behavior mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// `engine.toml` or env misconfigured
    ConfigError,
    /// A threshold table failed its construction invariants
    ThresholdError,
}

impl ErrorCategory {
    /// Machine-readable code for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::ThresholdError => "THRESHOLD_ERROR",
        }
    }
}

/// Engine error with category and context
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("invalid threshold table: {reason}")]
    InvalidThresholds { reason: String },
}

impl EngineError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::ConfigError,
            Self::InvalidThresholds { .. } => ErrorCategory::ThresholdError,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a threshold table error
    pub fn thresholds(reason: impl Into<String>) -> Self {
        Self::InvalidThresholds {
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
