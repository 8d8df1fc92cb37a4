use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for modres operations outside the pure resolver.
#[derive(Debug, Error, Diagnostic)]
pub enum ModresError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed module manifest (e.g. Modules.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(modres::manifest),
        help("Check your Modules.toml for syntax errors")
    )]
    Manifest { message: String },

    /// Invalid global configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(code(modres::config), help("Check ~/.modres/config.toml"))]
    Config { message: String },

    /// Module resolution failed (missing deps, version mismatches, cycles).
    #[error("Module resolution failed: {message}")]
    #[diagnostic(code(modres::resolution))]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
