//! Core types for the record populator.
//!
//! This crate provides the foundational types the populator works with:
//!
//! - [`FieldType`] - Declared type of a field (scalar, container or named)
//! - [`TypeSchema`] - Explicit table of record and enumeration descriptors
//! - [`Value`] - Dynamic value a field can hold
//! - [`Record`] - An instance of a record type
//!
//! # Architecture
//!
//! ```text
//! record-core (this crate)
//!    │
//!    └─── record-generator  (populates records described by a TypeSchema)
//! ```
//!
//! # Example
//!
//! ```rust
//! use record_core::{FieldDescriptor, FieldType, TypeDescriptor, TypeSchema, Value};
//!
//! let schema = TypeSchema::new(vec![TypeDescriptor::record(
//!     "Foo",
//!     vec![FieldDescriptor::new("name", FieldType::text())],
//! )])
//! .unwrap();
//!
//! let mut foo = schema.instantiate("Foo").unwrap();
//! schema.set_field(&mut foo, "name", Value::from("bar")).unwrap();
//! assert_eq!(foo.get("name"), Some(&Value::from("bar")));
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    FieldDefinition, FieldDescriptor, FieldModifier, SchemaError, SetFieldError, TypeDefinition,
    TypeDescriptor, TypeKind, TypeSchema,
};
pub use types::{ContainerKind, FieldType, ScalarKind, TypeClass};
pub use values::{Record, Value};
