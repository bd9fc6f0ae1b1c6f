use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch or decode a single data document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("document `{document}` is not available")]
    Missing { document: String },
    #[error("document `{document}` is not valid: {source}")]
    Parse {
        document: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required document could not be loaded. The catalog is unusable.
    #[error("required document `{document}` could not be loaded")]
    FatalInit {
        document: &'static str,
        #[source]
        source: SourceError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}
