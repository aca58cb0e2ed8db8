//! Configuration errors

use std::io;
use std::path::PathBuf;

use remote_settings::{Category, SchemaValidationError};

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Errors raised while loading, resolving or saving workspace configuration.
///
/// None of these are retryable; callers surface them to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error(
        "Following fields are specified in for overwrite and extend in {} file: {}.",
        .file.display(),
        join_categories(.fields)
    )]
    Conflict { file: PathBuf, fields: Vec<Category> },

    #[error("You need to provide at least one remote host to connect")]
    NoHosts,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine the home directory")]
    HomeDirectory,
}

impl ConfigurationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_categories(fields: &[Category]) -> String {
    fields
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
