use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors that can occur while scanning, loading or writing projects
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error at {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Descriptor in {} does not declare pluginConfig.manifestPath", .0.display())]
    MissingManifestPath(PathBuf),

    #[error("Icon at {} is not a valid PNG image", .0.display())]
    InvalidIcon(PathBuf),

    #[error("Timed out after {after:?} while reading {}", .path.display())]
    Timeout { path: PathBuf, after: Duration },

    #[error("Scan was cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Error::ParseError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::IoError { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type alias for workbench operations
pub type Result<T> = std::result::Result<T, Error>;
