//! Record Populator
//!
//! Produces fully populated instances of arbitrary record types so that tests
//! do not need hand-written fixtures.
//!
//! # Features
//!
//! - Recursive population of nested record types, including inherited fields
//! - Random non-default values for built-in scalar kinds
//! - Empty containers for array, list, set and map fields
//! - Custom randomizers bound to an exact `(owning type, field type, field name)`
//! - YAML configuration for schemas and declarative randomizers
//!
//! # Workspace Crates
//!
//! - `record_core` - Type descriptors, schema validation, values and records
//! - `record_generator` - Randomizer registry, field plans and the populator
//!
//! # CLI Usage
//!
//! ```bash
//! # Populate one Person and print it as JSON
//! record-populator populate --config people.yaml --type Person --pretty
//!
//! # Populate five reproducible Person instances
//! record-populator populate --config people.yaml --type Person --count 5 --seed 42
//!
//! # Validate a configuration and list its field plans
//! record-populator check --config people.yaml
//! ```

pub mod cli;

pub use record_core::{
    ContainerKind, FieldDescriptor, FieldModifier, FieldType, Record, ScalarKind, TypeDescriptor,
    TypeSchema, Value,
};
pub use record_generator::{
    ConfigError, Populator, PopulatorBuilder, PopulatorConfig, PopulatorError, Randomizer,
    RandomizerConfig, RandomizerError,
};
