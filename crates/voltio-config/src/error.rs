//! Error types for patch file operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading, saving, or validating a patch.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value fell outside the range the hardware accepts
    #[error("'{field}' is {value} but must be between {min} and {max}")]
    OutOfRange {
        /// Dotted path of the offending field.
        field: String,
        /// The rejected value.
        value: f32,
        /// Lower bound, inclusive.
        min: f32,
        /// Upper bound, inclusive.
        max: f32,
    },
}

impl PatchError {
    pub(crate) fn read_file(path: &Path, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_file(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    }
}
