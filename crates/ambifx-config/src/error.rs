//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur loading, saving or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
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

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
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

    /// Unknown channel layout name
    #[error("unknown channel layout: {0}")]
    UnknownLayout(String),

    /// Unknown backend name
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    /// Invalid device setting
    #[error("invalid device setting '{field}': {reason}")]
    InvalidDevice {
        /// Name of the device field.
        field: &'static str,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Unknown effect id
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// Parameter key the effect does not have
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParameter {
        /// Id of the effect.
        effect: String,
        /// Key of the unrecognized parameter.
        param: String,
    },

    /// Parameter value that could not be parsed or was rejected
    #[error("invalid parameter '{param}' for effect '{effect}': {reason}")]
    InvalidParameter {
        /// Id of the effect containing the invalid parameter.
        effect: String,
        /// Key of the invalid parameter.
        param: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Slot gain outside 0.0 to 1.0
    #[error("slot {slot}: gain {gain} out of range [0, 1]")]
    InvalidGain {
        /// Index of the slot.
        slot: usize,
        /// The rejected gain.
        gain: f32,
    },

    /// Host operation failed while building slots
    #[error(transparent)]
    Host(#[from] ambifx_registry::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(effect: &str, param: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            effect: effect.to_string(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}
