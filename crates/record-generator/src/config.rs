//! YAML configuration for a populator.
//!
//! A configuration file carries the type schema together with declarative
//! randomizer bindings:
//!
//! ```yaml
//! version: 1
//! seed: 42
//! max_depth: 16
//! types:
//!   - name: Person
//!     fields:
//!       - name: firstName
//!         type: text
//! randomizers:
//!   - owning_type: Person
//!     field_type: text
//!     field: firstName
//!     generator:
//!       type: one_of
//!       values: [Alice, Bob]
//! ```

use crate::error::ConfigError;
use crate::randomizers::{ConfiguredRandomizer, RandomizerConfig};
use record_core::{FieldType, SchemaError, TypeDefinition, TypeSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Only configuration version understood by this crate.
pub const CONFIG_VERSION: u32 = 1;

/// Multiplier spreading per-binding seeds apart (64-bit golden ratio).
const SEED_SPREAD: u64 = 0x9E3779B97F4A7C15;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// A randomizer bound to one `(owning type, field type, field name)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomizerBinding {
    /// Concrete type being populated
    pub owning_type: String,

    /// Declared type of the field
    pub field_type: FieldType,

    /// Field name
    pub field: String,

    /// How values are produced
    pub generator: RandomizerConfig,
}

impl RandomizerBinding {
    /// Compile the bound randomizer for the binding's field type.
    pub fn build(&self, seed: Option<u64>) -> Result<ConfiguredRandomizer, ConfigError> {
        self.generator
            .build(&self.field_type, seed)
            .map_err(|e| ConfigError::InvalidBinding {
                binding: self.to_string(),
                source: Box::new(e),
            })
    }
}

impl fmt::Display for RandomizerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owning_type, self.field, self.field_type)
    }
}

/// Populator configuration loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatorConfig {
    /// Configuration version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for config-defined randomizers; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Optional nesting guard for cyclic type graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Type definitions
    #[serde(default)]
    pub types: Vec<TypeDefinition>,

    /// Randomizer bindings
    #[serde(default)]
    pub randomizers: Vec<RandomizerBinding>,
}

impl PopulatorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: PopulatorConfig = serde_yaml::from_str(yaml)?;
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }
        Ok(config)
    }

    /// Build and validate the type schema.
    pub fn schema(&self) -> Result<TypeSchema, SchemaError> {
        TypeSchema::from_definitions(&self.types)
    }

    /// Seed for the binding at `index`, if the configuration is seeded.
    ///
    /// Each binding gets its own stream so that adding a binding does not
    /// shift the values of the others.
    pub fn binding_seed(&self, index: usize) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_add((index as u64).wrapping_mul(SEED_SPREAD)))
    }

    /// Compile every binding, in declaration order.
    pub fn build_randomizers(
        &self,
    ) -> Result<Vec<(&RandomizerBinding, ConfiguredRandomizer)>, ConfigError> {
        self.randomizers
            .iter()
            .enumerate()
            .map(|(index, binding)| {
                binding
                    .build(self.binding_seed(index))
                    .map(|randomizer| (binding, randomizer))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_core::ScalarKind;
    use std::io::Write;

    const SAMPLE_CONFIG: &str = r#"
version: 1
seed: 42
max_depth: 8
types:
  - name: Person
    fields:
      - name: firstName
        type: text
      - name: age
        type: int
randomizers:
  - owning_type: Person
    field_type: text
    field: firstName
    generator:
      type: one_of
      values: [Alice, Bob]
  - owning_type: Person
    field_type: int
    field: age
    generator:
      type: int_range
      min: 18
      max: 90
"#;

    #[test]
    fn test_parse_config() {
        let config = PopulatorConfig::from_yaml(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_depth, Some(8));
        assert_eq!(config.types.len(), 1);
        assert_eq!(config.randomizers.len(), 2);
        assert_eq!(
            config.randomizers[1].field_type,
            FieldType::scalar(ScalarKind::Int32)
        );
        assert_eq!(config.randomizers[0].to_string(), "Person.firstName: text");
        assert!(config.schema().is_ok());
    }

    #[test]
    fn test_unsupported_version() {
        let err = PopulatorConfig::from_yaml("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_binding_seeds_differ() {
        let config = PopulatorConfig::from_yaml(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.binding_seed(0), Some(42));
        assert_ne!(config.binding_seed(0), config.binding_seed(1));

        let unseeded = PopulatorConfig::from_yaml("types: []").unwrap();
        assert_eq!(unseeded.binding_seed(3), None);
    }

    #[test]
    fn test_invalid_binding_names_triple() {
        let yaml = r#"
randomizers:
  - owning_type: Person
    field_type: int
    field: age
    generator:
      type: uuid_v4
"#;
        let config = PopulatorConfig::from_yaml(yaml).unwrap();
        let err = config.build_randomizers().unwrap_err();

        assert!(err.to_string().contains("Person.age: int"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

        let config = PopulatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.build_randomizers().unwrap().len(), 2);
    }
}
