//! Errors raised while building or resolving a launch description.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LaunchError>;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("package '{package}' not found in the ament index (AMENT_PREFIX_PATH)")]
    PackageNotFound { package: String },

    #[error("resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("launch configuration '{0}' is referenced but was never declared")]
    UndeclaredArgument(String),

    #[error("invalid value '{value}' for launch argument '{name}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    #[error("invalid launch arguments file {}: {source}", path.display())]
    InvalidArgumentsFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("executable '{executable}' not found for package '{package}'")]
    ExecutableNotFound { package: String, executable: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Package or file lookups that came back empty.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PackageNotFound { .. } | Self::ResourceNotFound { .. }
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
