//! Error types for the terminal front-end.
//!
//! [`CliError`] is the top-level error type that wraps all possible
//! failure modes during startup and the command loop.

/// Top-level error for the `gridcraft` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gridcraft_core::ConfigError,
    },

    /// Creating or loading the game failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: gridcraft_core::GameError,
    },

    /// Reading commands or writing output failed.
    #[error("terminal I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
