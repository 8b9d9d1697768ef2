//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Wraps each subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: blitz_core::ConfigError,
    },

    /// The run could not be started.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: blitz_core::SessionError,
    },

    /// The async runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: blitz_core::RunnerError,
    },

    /// The profile book could not be rendered.
    #[error("profile output error: {source}")]
    Output {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
