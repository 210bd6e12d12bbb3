//! Type descriptors and the schema that holds them.
//!
//! Rust has no runtime reflection over struct fields, so record shapes are
//! described explicitly. A `TypeSchema` is the table of `TypeDescriptor`s the
//! populator works from, and it provides the operations a reflection facility
//! would: enumerating declared fields, walking to the parent type, testing
//! field modifiers, default-constructing an instance and setting a named
//! field on it.
//!
//! ## Type Hierarchy
//!
//! **Definition types** (YAML-facing, loaded with serde):
//! - `FieldDefinition` - Field as written in a schema file
//! - `TypeDefinition` - Record or enumeration as written in a schema file
//!
//! **Descriptor types** (validated, used at population time):
//! - `FieldDescriptor` - Field with typed constant value
//! - `TypeDescriptor` - Record or enumeration
//! - `TypeSchema` - Validated collection of descriptors

use crate::types::FieldType;
use crate::values::{Record, Value};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Type not found in schema
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Two types share a name
    #[error("Type '{0}' is declared more than once")]
    DuplicateType(String),

    /// A type declares both fields and variants
    #[error("Type '{0}' declares both fields and variants")]
    AmbiguousKind(String),

    /// An enumeration without variants
    #[error("Enumeration '{0}' has no variants")]
    EmptyEnum(String),

    /// Parent type is missing
    #[error("Type '{type_name}' extends unknown type '{parent}'")]
    UnknownParent { type_name: String, parent: String },

    /// Parent type is an enumeration
    #[error("Type '{type_name}' cannot extend enumeration '{parent}'")]
    EnumParent { type_name: String, parent: String },

    /// Enumerations do not take part in inheritance
    #[error("Enumeration '{0}' cannot declare a parent type")]
    EnumWithParent(String),

    /// The parent chain loops back on itself
    #[error("Inheritance cycle through type '{0}'")]
    InheritanceCycle(String),

    /// A field name appears twice across a type and its ancestors
    #[error("Field '{field}' is declared more than once in the hierarchy of '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    /// A field refers to a type that is not in the schema
    #[error("Field '{field}' of type '{type_name}' refers to unknown type '{referenced}'")]
    UnknownFieldType {
        type_name: String,
        field: String,
        referenced: String,
    },

    /// A constant value does not fit the declared field type
    #[error("Constant for field '{field}' of type '{type_name}' is not a valid {expected}")]
    InvalidConstant {
        type_name: String,
        field: String,
        expected: FieldType,
    },

    /// Record type without a default constructor
    #[error("Type '{0}' cannot be instantiated")]
    NotInstantiable(String),

    /// Enumerations are resolved to a variant, never constructed
    #[error("Type '{0}' is an enumeration and has no instances to construct")]
    EnumInstantiation(String),
}

/// Error returned when a value cannot be written into a record field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetFieldError {
    /// No field with this name in the record's type hierarchy
    #[error("type '{type_name}' has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    /// Static and final fields are never written after construction
    #[error("field '{field}' of type '{type_name}' is {modifier:?} and cannot be set")]
    ReadOnly {
        type_name: String,
        field: String,
        modifier: FieldModifier,
    },

    /// Field has no accessible setter
    #[error("field '{field}' of type '{type_name}' has no accessible setter")]
    NoSetter { type_name: String, field: String },

    /// Value cannot be assigned to the declared type
    #[error("field '{field}' of type '{type_name}' expects {expected}, got {found}")]
    TypeMismatch {
        type_name: String,
        field: String,
        expected: FieldType,
        found: String,
    },
}

// ============================================================================
// Descriptor Types
// ============================================================================

/// Field modifier, deciding whether the populator may write the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldModifier {
    /// Regular instance field
    #[default]
    Instance,
    /// Shared by all instances; never populated
    Static,
    /// Set once at construction; never populated
    Final,
}

impl FieldModifier {
    /// Whether fields with this modifier are skipped by population.
    pub fn is_excluded(&self) -> bool {
        !matches!(self, Self::Instance)
    }
}

/// A field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Declared type
    pub field_type: FieldType,

    /// Instance, static or final
    pub modifier: FieldModifier,

    /// Whether the field has an accessible setter
    pub settable: bool,

    /// Value held from construction (static and final fields)
    pub constant: Option<Value>,
}

impl FieldDescriptor {
    /// Create a new settable instance field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            modifier: FieldModifier::Instance,
            settable: true,
            constant: None,
        }
    }

    /// Create a static field holding the given value.
    pub fn static_field(name: impl Into<String>, field_type: FieldType, value: Value) -> Self {
        Self {
            modifier: FieldModifier::Static,
            constant: Some(value),
            ..Self::new(name, field_type)
        }
    }

    /// Create a final field holding the given value.
    pub fn final_field(name: impl Into<String>, field_type: FieldType, value: Value) -> Self {
        Self {
            modifier: FieldModifier::Final,
            constant: Some(value),
            ..Self::new(name, field_type)
        }
    }

    /// Mark the field as lacking an accessible setter.
    pub fn without_setter(mut self) -> Self {
        self.settable = false;
        self
    }

    /// Whether population skips this field.
    pub fn is_excluded(&self) -> bool {
        self.modifier.is_excluded()
    }
}

/// What a type descriptor describes.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Record with declared fields
    Record { fields: Vec<FieldDescriptor> },
    /// Enumeration with named variants
    Enum { variants: Vec<String> },
}

/// Shape of a record or enumeration type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name
    pub name: String,

    /// Direct parent in the inheritance chain
    pub parent: Option<String>,

    /// Record or enumeration
    pub kind: TypeKind,

    /// Whether a zero-value instance can be default-constructed
    pub instantiable: bool,
}

impl TypeDescriptor {
    /// Create a new record type with the given declared fields.
    pub fn record(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            kind: TypeKind::Record { fields },
            instantiable: true,
        }
    }

    /// Create a new enumeration type.
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            parent: None,
            kind: TypeKind::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
            instantiable: true,
        }
    }

    /// Set the parent type.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Mark the type as lacking a default constructor.
    pub fn not_instantiable(mut self) -> Self {
        self.instantiable = false;
        self
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    /// Fields declared directly on this type (not inherited).
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            TypeKind::Record { fields } => fields,
            TypeKind::Enum { .. } => &[],
        }
    }

    /// Variants, if this is an enumeration.
    pub fn variants(&self) -> Option<&[String]> {
        match &self.kind {
            TypeKind::Enum { variants } => Some(variants),
            TypeKind::Record { .. } => None,
        }
    }
}

// ============================================================================
// Definition Types (YAML)
// ============================================================================

fn default_true() -> bool {
    true
}

/// Field as written in a schema file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Field modifier
    #[serde(default)]
    pub modifier: FieldModifier,

    /// Whether the field has an accessible setter
    #[serde(default = "default_true")]
    pub settable: bool,

    /// Constant value for static/final fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,
}

/// Record or enumeration as written in a schema file.
///
/// A type with `variants` is an enumeration; otherwise it is a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name
    pub name: String,

    /// Parent type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Whether the type can be default-constructed
    #[serde(default = "default_true")]
    pub instantiable: bool,

    /// Declared fields (records)
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    /// Variants (enumerations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
}

impl TypeDefinition {
    /// Convert to a descriptor, typing any constant values.
    pub fn to_descriptor(&self) -> Result<TypeDescriptor, SchemaError> {
        let kind = match &self.variants {
            Some(_) if !self.fields.is_empty() => {
                return Err(SchemaError::AmbiguousKind(self.name.clone()))
            }
            Some(variants) => TypeKind::Enum {
                variants: variants.clone(),
            },
            None => TypeKind::Record {
                fields: self
                    .fields
                    .iter()
                    .map(|f| f.to_descriptor(&self.name))
                    .collect::<Result<_, _>>()?,
            },
        };

        Ok(TypeDescriptor {
            name: self.name.clone(),
            parent: self.parent.clone(),
            kind,
            instantiable: self.instantiable,
        })
    }
}

impl FieldDefinition {
    fn to_descriptor(&self, type_name: &str) -> Result<FieldDescriptor, SchemaError> {
        let constant = self
            .value
            .as_ref()
            .map(|yaml| {
                Value::from_yaml_typed(yaml, &self.field_type).ok_or_else(|| {
                    SchemaError::InvalidConstant {
                        type_name: type_name.to_string(),
                        field: self.name.clone(),
                        expected: self.field_type.clone(),
                    }
                })
            })
            .transpose()?;

        Ok(FieldDescriptor {
            name: self.name.clone(),
            field_type: self.field_type.clone(),
            modifier: self.modifier,
            settable: self.settable,
            constant,
        })
    }
}

#[derive(Deserialize)]
struct SchemaFile {
    types: Vec<TypeDefinition>,
}

// ============================================================================
// Type Schema
// ============================================================================

/// Validated collection of type descriptors.
///
/// Construction checks that parents exist and form no cycles, that every
/// named field type resolves, that field names are unique across each
/// type's hierarchy, and that constants fit their declared types.
#[derive(Debug, Clone, Default)]
pub struct TypeSchema {
    types: Vec<TypeDescriptor>,

    /// Cached type lookup
    type_map: HashMap<String, usize>,
}

impl TypeSchema {
    /// Create and validate a schema from descriptors.
    pub fn new(types: Vec<TypeDescriptor>) -> Result<Self, SchemaError> {
        let mut type_map = HashMap::with_capacity(types.len());
        for (idx, ty) in types.iter().enumerate() {
            if type_map.insert(ty.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateType(ty.name.clone()));
            }
        }

        let schema = Self { types, type_map };
        schema.validate()?;
        Ok(schema)
    }

    /// Create a schema from YAML-facing definitions.
    pub fn from_definitions(definitions: &[TypeDefinition]) -> Result<Self, SchemaError> {
        let types = definitions
            .iter()
            .map(TypeDefinition::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(types)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from a YAML string with a top-level `types` list.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        Self::from_definitions(&file.types)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for ty in &self.types {
            if let TypeKind::Enum { variants } = &ty.kind {
                if variants.is_empty() {
                    return Err(SchemaError::EmptyEnum(ty.name.clone()));
                }
                if ty.parent.is_some() {
                    return Err(SchemaError::EnumWithParent(ty.name.clone()));
                }
            }

            if let Some(parent) = &ty.parent {
                let parent_ty =
                    self.get_type(parent)
                        .ok_or_else(|| SchemaError::UnknownParent {
                            type_name: ty.name.clone(),
                            parent: parent.clone(),
                        })?;
                if parent_ty.is_enum() {
                    return Err(SchemaError::EnumParent {
                        type_name: ty.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        // Everything below walks parent chains, which must be acyclic first.
        for ty in &self.types {
            self.check_chain(&ty.name)?;
        }

        for ty in &self.types {
            for field in ty.declared_fields() {
                self.validate_field(&ty.name, field)?;
            }
        }

        for ty in self.types.iter().filter(|ty| !ty.is_enum()) {
            let mut seen = HashSet::new();
            for field in self.all_fields(&ty.name)? {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        type_name: ty.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_field(&self, type_name: &str, field: &FieldDescriptor) -> Result<(), SchemaError> {
        for referenced in field.field_type.referenced_names() {
            if !self.type_map.contains_key(referenced) {
                return Err(SchemaError::UnknownFieldType {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    referenced: referenced.to_string(),
                });
            }
        }

        if let Some(constant) = &field.constant {
            if !self.is_assignable(constant, &field.field_type) {
                return Err(SchemaError::InvalidConstant {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    expected: field.field_type.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_chain(&self, name: &str) -> Result<(), SchemaError> {
        let mut visited = HashSet::new();
        let mut current = Some(name);
        while let Some(type_name) = current {
            if !visited.insert(type_name) {
                return Err(SchemaError::InheritanceCycle(name.to_string()));
            }
            current = self
                .get_type(type_name)
                .and_then(|ty| ty.parent.as_deref());
        }
        Ok(())
    }

    /// Get a type descriptor by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.type_map
            .get(name)
            .and_then(|&idx| self.types.get(idx))
    }

    /// Get the parent descriptor of a type.
    pub fn parent_of(&self, name: &str) -> Option<&TypeDescriptor> {
        self.get_type(name)
            .and_then(|ty| ty.parent.as_deref())
            .and_then(|parent| self.get_type(parent))
    }

    /// All type descriptors, in declaration order.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Get all type names in the schema.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// The type itself followed by its ancestors, nearest first.
    pub fn hierarchy(&self, name: &str) -> Result<Vec<&TypeDescriptor>, SchemaError> {
        let mut current = self
            .get_type(name)
            .ok_or_else(|| SchemaError::TypeNotFound(name.to_string()))?;
        let mut chain = vec![current];
        while let Some(parent) = current.parent.as_deref().and_then(|p| self.get_type(p)) {
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Own declared fields followed by those of each ancestor, walking upward.
    pub fn all_fields(&self, name: &str) -> Result<Vec<&FieldDescriptor>, SchemaError> {
        Ok(self
            .hierarchy(name)?
            .into_iter()
            .flat_map(|ty| ty.declared_fields())
            .collect())
    }

    /// Find a field by name in a type's hierarchy.
    pub fn find_field(&self, type_name: &str, field: &str) -> Option<&FieldDescriptor> {
        self.all_fields(type_name)
            .ok()?
            .into_iter()
            .find(|f| f.name == field)
    }

    /// Whether `sub` is `sup` or one of its descendants.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.hierarchy(sub)
            .map(|chain| chain.iter().any(|ty| ty.name == sup))
            .unwrap_or(false)
    }

    /// Whether a value may be written into a field of the declared type.
    ///
    /// `Null` is assignable to every type. Containers check their elements.
    /// Records are assignable to their own type and to any ancestor.
    pub fn is_assignable(&self, value: &Value, declared: &FieldType) -> bool {
        match (declared, value) {
            (_, Value::Null) => true,
            (FieldType::Scalar(kind), _) => value.scalar_kind() == Some(*kind),
            (FieldType::Array { element_type }, Value::Array(items))
            | (FieldType::List { element_type }, Value::List(items))
            | (FieldType::Set { element_type }, Value::Set(items)) => items
                .iter()
                .all(|item| self.is_assignable(item, element_type)),
            (
                FieldType::Map {
                    key_type,
                    value_type,
                },
                Value::Map(entries),
            ) => entries
                .iter()
                .all(|(k, v)| self.is_assignable(k, key_type) && self.is_assignable(v, value_type)),
            (FieldType::Named(name), Value::Enum { type_name, variant }) => {
                type_name == name
                    && self
                        .get_type(name)
                        .and_then(TypeDescriptor::variants)
                        .is_some_and(|variants| variants.iter().any(|v| v == variant))
            }
            (FieldType::Named(name), Value::Record(record)) => {
                self.is_subtype(record.type_name(), name)
            }
            _ => false,
        }
    }

    /// Default-construct a zero-value instance of a record type.
    ///
    /// Instance fields start as `Value::Null`; static and final fields hold
    /// their constant.
    pub fn instantiate(&self, name: &str) -> Result<Record, SchemaError> {
        let ty = self
            .get_type(name)
            .ok_or_else(|| SchemaError::TypeNotFound(name.to_string()))?;
        if ty.is_enum() {
            return Err(SchemaError::EnumInstantiation(name.to_string()));
        }
        if !ty.instantiable {
            return Err(SchemaError::NotInstantiable(name.to_string()));
        }

        let mut record = Record::new(name);
        for field in self.all_fields(name)? {
            record.put(
                field.name.clone(),
                field.constant.clone().unwrap_or(Value::Null),
            );
        }
        Ok(record)
    }

    /// Write a value into a named field of a record.
    ///
    /// Fails when the field does not exist, is static or final, has no
    /// setter, or the value is not assignable to the declared type.
    pub fn set_field(
        &self,
        record: &mut Record,
        field: &str,
        value: Value,
    ) -> Result<(), SetFieldError> {
        let type_name = record.type_name().to_string();
        let descriptor =
            self.find_field(&type_name, field)
                .ok_or_else(|| SetFieldError::UnknownField {
                    type_name: type_name.clone(),
                    field: field.to_string(),
                })?;

        if descriptor.is_excluded() {
            return Err(SetFieldError::ReadOnly {
                type_name,
                field: field.to_string(),
                modifier: descriptor.modifier,
            });
        }
        if !descriptor.settable {
            return Err(SetFieldError::NoSetter {
                type_name,
                field: field.to_string(),
            });
        }
        if !self.is_assignable(&value, &descriptor.field_type) {
            return Err(SetFieldError::TypeMismatch {
                type_name,
                field: field.to_string(),
                expected: descriptor.field_type.clone(),
                found: value.kind_name(),
            });
        }

        record.put(field, value);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarKind;
    use std::io::Write;

    const SAMPLE_SCHEMA: &str = r#"
types:
  - name: Entity
    fields:
      - name: id
        type: big_int
      - name: VERSION
        type: int
        modifier: static
        value: 3

  - name: Person
    parent: Entity
    fields:
      - name: firstName
        type: text
      - name: gender
        type:
          type: enum
          name: Gender
      - name: nicknames
        type:
          type: list
          element_type: text
      - name: address
        type:
          type: record
          name: Address

  - name: Address
    fields:
      - name: city
        type: text

  - name: Gender
    variants: [MALE, FEMALE]
"#;

    #[test]
    fn test_parse_schema() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(
            schema.type_names(),
            vec!["Entity", "Person", "Address", "Gender"]
        );

        let person = schema.get_type("Person").unwrap();
        assert_eq!(person.parent.as_deref(), Some("Entity"));
        assert_eq!(person.declared_fields().len(), 4);
        assert!(!person.is_enum());

        let gender = schema.get_type("Gender").unwrap();
        assert!(gender.is_enum());
        assert_eq!(
            gender.variants().unwrap(),
            &["MALE".to_string(), "FEMALE".to_string()]
        );

        assert_eq!(schema.parent_of("Person").unwrap().name, "Entity");
        assert!(schema.parent_of("Entity").is_none());
    }

    #[test]
    fn test_all_fields_walks_ancestors_in_order() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let names: Vec<&str> = schema
            .all_fields("Person")
            .unwrap()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["firstName", "gender", "nicknames", "address", "id", "VERSION"]
        );
    }

    #[test]
    fn test_instantiate_zero_value() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let record = schema.instantiate("Person").unwrap();
        assert_eq!(record.type_name(), "Person");
        assert_eq!(record.len(), 6);
        assert_eq!(record.get("firstName"), Some(&Value::Null));
        assert_eq!(record.get("VERSION"), Some(&Value::Int32(3)));
    }

    #[test]
    fn test_instantiate_errors() {
        let schema = TypeSchema::new(vec![
            TypeDescriptor::record("Shape", vec![]).not_instantiable(),
            TypeDescriptor::enumeration("Color", ["RED"]),
        ])
        .unwrap();

        assert!(matches!(
            schema.instantiate("Shape"),
            Err(SchemaError::NotInstantiable(_))
        ));
        assert!(matches!(
            schema.instantiate("Color"),
            Err(SchemaError::EnumInstantiation(_))
        ));
        assert!(matches!(
            schema.instantiate("Missing"),
            Err(SchemaError::TypeNotFound(_))
        ));
    }

    #[test]
    fn test_set_field() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let mut record = schema.instantiate("Person").unwrap();

        schema
            .set_field(&mut record, "firstName", Value::from("Ada"))
            .unwrap();
        assert_eq!(record.get("firstName"), Some(&Value::from("Ada")));

        // Inherited field
        schema
            .set_field(&mut record, "id", Value::Int64(7))
            .unwrap();
        assert_eq!(record.get("id"), Some(&Value::Int64(7)));

        let err = schema
            .set_field(&mut record, "firstName", Value::Int32(1))
            .unwrap_err();
        assert!(matches!(err, SetFieldError::TypeMismatch { .. }));

        let err = schema
            .set_field(&mut record, "VERSION", Value::Int32(4))
            .unwrap_err();
        assert!(matches!(
            err,
            SetFieldError::ReadOnly {
                modifier: FieldModifier::Static,
                ..
            }
        ));

        let err = schema
            .set_field(&mut record, "nope", Value::Null)
            .unwrap_err();
        assert!(matches!(err, SetFieldError::UnknownField { .. }));
    }

    #[test]
    fn test_set_field_without_setter() {
        let schema = TypeSchema::new(vec![TypeDescriptor::record(
            "Locked",
            vec![FieldDescriptor::new("code", FieldType::text()).without_setter()],
        )])
        .unwrap();
        let mut record = schema.instantiate("Locked").unwrap();

        let err = schema
            .set_field(&mut record, "code", Value::from("x"))
            .unwrap_err();
        assert!(matches!(err, SetFieldError::NoSetter { .. }));
    }

    #[test]
    fn test_is_assignable() {
        let schema = TypeSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let gender = FieldType::named("Gender");
        let entity = FieldType::named("Entity");

        assert!(schema.is_assignable(&Value::enumeration("Gender", "MALE"), &gender));
        assert!(!schema.is_assignable(&Value::enumeration("Gender", "OTHER"), &gender));
        assert!(!schema.is_assignable(&Value::from("MALE"), &gender));

        // Subtype instances fit ancestor-typed fields, not the other way round
        let person = schema.instantiate("Person").unwrap();
        assert!(schema.is_assignable(&Value::Record(person), &entity));
        let entity_record = schema.instantiate("Entity").unwrap();
        assert!(!schema.is_assignable(&Value::Record(entity_record), &FieldType::named("Person")));

        let texts = FieldType::list(FieldType::text());
        assert!(schema.is_assignable(&Value::List(vec![Value::from("a")]), &texts));
        assert!(!schema.is_assignable(&Value::List(vec![Value::Int32(1)]), &texts));
        assert!(!schema.is_assignable(&Value::Set(vec![]), &texts));
        assert!(schema.is_assignable(&Value::Null, &texts));
    }

    #[test]
    fn test_duplicate_type() {
        let result = TypeSchema::new(vec![
            TypeDescriptor::record("A", vec![]),
            TypeDescriptor::record("A", vec![]),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateType(_))));
    }

    #[test]
    fn test_unknown_parent() {
        let result = TypeSchema::new(vec![TypeDescriptor::record("A", vec![]).extends("B")]);
        assert!(matches!(result, Err(SchemaError::UnknownParent { .. })));
    }

    #[test]
    fn test_inheritance_cycle() {
        let result = TypeSchema::new(vec![
            TypeDescriptor::record("A", vec![]).extends("B"),
            TypeDescriptor::record("B", vec![]).extends("A"),
        ]);
        assert!(matches!(result, Err(SchemaError::InheritanceCycle(_))));
    }

    #[test]
    fn test_enum_rules() {
        let result = TypeSchema::new(vec![TypeDescriptor::enumeration(
            "Empty",
            Vec::<String>::new(),
        )]);
        assert!(matches!(result, Err(SchemaError::EmptyEnum(_))));

        let result = TypeSchema::new(vec![
            TypeDescriptor::enumeration("Color", ["RED"]),
            TypeDescriptor::record("Paint", vec![]).extends("Color"),
        ]);
        assert!(matches!(result, Err(SchemaError::EnumParent { .. })));
    }

    #[test]
    fn test_duplicate_field_in_hierarchy() {
        let result = TypeSchema::new(vec![
            TypeDescriptor::record("Base", vec![FieldDescriptor::new("id", FieldType::text())]),
            TypeDescriptor::record(
                "Derived",
                vec![FieldDescriptor::new("id", FieldType::text())],
            )
            .extends("Base"),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn test_sibling_types_may_share_field_names() {
        let schema = TypeSchema::new(vec![
            TypeDescriptor::record("Cat", vec![FieldDescriptor::new("name", FieldType::text())]),
            TypeDescriptor::record("Dog", vec![FieldDescriptor::new("name", FieldType::text())]),
        ]);
        assert!(schema.is_ok());
    }

    #[test]
    fn test_unknown_field_type() {
        let result = TypeSchema::new(vec![TypeDescriptor::record(
            "Foo",
            vec![FieldDescriptor::new(
                "bars",
                FieldType::list(FieldType::named("Bar")),
            )],
        )]);
        assert!(matches!(
            result,
            Err(SchemaError::UnknownFieldType { referenced, .. }) if referenced == "Bar"
        ));
    }

    #[test]
    fn test_invalid_constant() {
        let yaml = r#"
types:
  - name: Config
    fields:
      - name: LIMIT
        type: tiny_int
        modifier: final
        value: 1000
"#;
        let result = TypeSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::InvalidConstant { .. })));

        let result = TypeSchema::new(vec![TypeDescriptor::record(
            "Config",
            vec![FieldDescriptor::final_field(
                "LIMIT",
                ScalarKind::Int32.into(),
                Value::from("x"),
            )],
        )]);
        assert!(matches!(result, Err(SchemaError::InvalidConstant { .. })));
    }

    #[test]
    fn test_fields_and_variants_conflict() {
        let yaml = r#"
types:
  - name: Odd
    variants: [A]
    fields:
      - name: x
        type: text
"#;
        let result = TypeSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::AmbiguousKind(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_SCHEMA.as_bytes()).unwrap();

        let schema = TypeSchema::from_file(file.path()).unwrap();
        assert!(schema.get_type("Address").is_some());

        let missing = TypeSchema::from_file("/nonexistent/schema.yaml");
        assert!(matches!(missing, Err(SchemaError::IoError(_))));
    }
}
