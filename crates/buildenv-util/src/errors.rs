use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for loading and host-side buildenv operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildEnvError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Buildenv.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(buildenv::manifest),
        help("Check your Buildenv.toml for syntax errors")
    )]
    Manifest { message: String },

    /// Invalid or unreadable resolver configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(buildenv::config))]
    Config { message: String },

    /// Lockfile could not be read, parsed or written.
    #[error("Lockfile error: {message}")]
    #[diagnostic(code(buildenv::lockfile))]
    Lockfile { message: String },
}
