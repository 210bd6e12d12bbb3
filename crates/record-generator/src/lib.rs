//! Populates record instances with random values.
//!
//! Given a [`TypeSchema`](record_core::TypeSchema), a [`Populator`] produces
//! instances with every field assigned: nested record types are populated
//! recursively, containers are left empty, built-in scalars get random
//! non-default values and enumerations resolve to a random variant. Custom
//! [`Randomizer`]s registered for an exact `(owning type, field type, field
//! name)` triple take precedence over all of these.
//!
//! # Modules
//!
//! - [`populator`] - The population engine and its builder
//! - [`plan`] - Per-type field plans and the classification chain
//! - [`registry`] - Randomizer bindings
//! - [`generators`] - Built-in value generators
//! - [`randomizers`] - Declarative randomizers for YAML configuration
//! - [`config`] - YAML configuration loading
//!
//! # Example
//!
//! ```rust
//! use record_generator::{PopulatorBuilder, PopulatorConfig};
//!
//! let config = PopulatorConfig::from_yaml(r#"
//! seed: 7
//! types:
//!   - name: Person
//!     fields:
//!       - name: email
//!         type: text
//! randomizers:
//!   - owning_type: Person
//!     field_type: text
//!     field: email
//!     generator:
//!       type: pattern
//!       pattern: "user{index}@example.com"
//! "#).unwrap();
//!
//! let populator = PopulatorBuilder::from_config(&config).unwrap().build().unwrap();
//! let people = populator.populate_beans_sized("Person", 2).unwrap();
//! assert_eq!(
//!     people[1].as_record().unwrap().get("email").and_then(|v| v.as_str()),
//!     Some("user1@example.com")
//! );
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod plan;
pub mod populator;
pub mod randomizer;
pub mod randomizers;
pub mod registry;

pub use config::{PopulatorConfig, RandomizerBinding};
pub use error::{ConfigError, PopulatorError, Result};
pub use plan::{FieldStrategy, PlanKind, TypePlan};
pub use populator::{Populator, PopulatorBuilder};
pub use randomizer::{Randomizer, RandomizerError};
pub use randomizers::{ConfiguredRandomizer, RandomizerConfig};
pub use registry::{RandomizerKey, RandomizerRegistry};
