//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Scaffold error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Resource name cannot produce identifiers
    #[error("Invalid resource name: '{0}'")]
    InvalidName(String),

    /// Anchor text is absent from the aggregator file
    #[error("Anchor `{anchor}` not found in {}", path.display())]
    MissingAnchor {
        /// The literal anchor that was searched for
        anchor: String,
        /// File that was searched
        path: PathBuf,
    },

    /// Target file exists and the overwrite policy forbids replacing it
    #[error("File already exists: {}", path.display())]
    FileExists {
        /// Conflicting path
        path: PathBuf,
    },

    /// File system error (missing folder, permission denied, ...)
    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template rendering error
    #[error("Template render error: {0}")]
    TemplateRender(#[from] handlebars::RenderError),

    /// Template registration (parse) error
    #[error("Template registration error: {0}")]
    TemplateRegistration(#[from] Box<handlebars::TemplateError>),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Default configuration could not be serialized
    #[error("Configuration serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Test runner could not be started
    #[error("Test runner `{command}` failed to start: {source}")]
    TestRunner {
        /// Command line that was attempted
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Verification task panicked or was cancelled
    #[error("Verification task aborted: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it occurred on
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
