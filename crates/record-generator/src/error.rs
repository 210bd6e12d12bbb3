//! Error types for record-generator crate.

use crate::randomizer::RandomizerError;
use record_core::{FieldType, SchemaError, SetFieldError};
use thiserror::Error;

/// Errors that can occur while building a populator or populating beans.
#[derive(Error, Debug)]
pub enum PopulatorError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type '{0}' cannot be instantiated")]
    NotInstantiable(String),

    #[error("Failed to assign field '{type_name}.{field}': {source}")]
    FieldAssignment {
        type_name: String,
        field: String,
        #[source]
        source: SetFieldError,
    },

    #[error("Randomizer for field '{type_name}.{field}' failed: {source}")]
    Randomizer {
        type_name: String,
        field: String,
        #[source]
        source: RandomizerError,
    },

    #[error("Invalid batch size: {0}")]
    InvalidSize(i64),

    #[error("Nesting depth {max_depth} exceeded while populating '{type_name}'")]
    DepthExceeded { type_name: String, max_depth: usize },

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading a populator configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid '{generator}' randomizer: {message}")]
    InvalidRandomizer {
        generator: &'static str,
        message: String,
    },

    #[error("Randomizer '{generator}' cannot produce values of type {field_type}")]
    IncompatibleRandomizer {
        generator: &'static str,
        field_type: FieldType,
    },

    #[error("Randomizer binding '{binding}': {source}")]
    InvalidBinding {
        binding: String,
        #[source]
        source: Box<ConfigError>,
    },
}

/// Result type alias for populator operations.
pub type Result<T> = std::result::Result<T, PopulatorError>;
