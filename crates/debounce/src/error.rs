//! Error types for debouncer construction and configuration

use thiserror::Error;

/// Errors raised while building a debouncer or loading its configuration
///
/// Invoking a debounced callable never fails; only setup does.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// `wrap` was called from a thread with no tokio runtime to host the timer
    #[error("no tokio runtime is running on this thread")]
    NoRuntime,

    /// Configuration text was not valid TOML for [`crate::DebounceConfig`]
    #[error("invalid debounce config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for debouncer setup
pub type Result<T> = std::result::Result<T, DebounceError>;
