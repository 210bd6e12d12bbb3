//! Declared field types for record descriptors.
//!
//! This module defines `FieldType`, the type universe a field may be declared
//! with: built-in scalar kinds, container shapes, and named record or
//! enumeration types described elsewhere in the schema.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Built-in scalar kinds the populator knows how to generate directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Unicode text
    Text,
    /// Single character
    Char,
    /// Boolean value
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 64-bit IEEE 754 floating point
    Float64,
    /// Arbitrary precision integer (stored as 128-bit)
    BigInteger,
    /// Exact decimal
    Decimal,
    /// Atomic 32-bit integer wrapper
    AtomicInt32,
    /// Atomic 64-bit integer wrapper
    AtomicInt64,
    /// Date only (YYYY-MM-DD)
    Date,
    /// Time only (HH:MM:SS)
    Time,
    /// Date and time without timezone
    LocalDateTime,
    /// UTC instant
    Timestamp,
    /// Date and time with a fixed offset (calendar)
    ZonedDateTime,
}

impl ScalarKind {
    /// All scalar kinds, in declaration order.
    pub const ALL: [ScalarKind; 18] = [
        ScalarKind::Text,
        ScalarKind::Char,
        ScalarKind::Bool,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::BigInteger,
        ScalarKind::Decimal,
        ScalarKind::AtomicInt32,
        ScalarKind::AtomicInt64,
        ScalarKind::Date,
        ScalarKind::Time,
        ScalarKind::LocalDateTime,
        ScalarKind::Timestamp,
        ScalarKind::ZonedDateTime,
    ];

    /// Canonical name used in YAML schemas.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Char => "char",
            Self::Bool => "bool",
            Self::Int8 => "tiny_int",
            Self::Int16 => "small_int",
            Self::Int32 => "int",
            Self::Int64 => "big_int",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::BigInteger => "big_integer",
            Self::Decimal => "decimal",
            Self::AtomicInt32 => "atomic_int",
            Self::AtomicInt64 => "atomic_big_int",
            Self::Date => "date",
            Self::Time => "time",
            Self::LocalDateTime => "date_time",
            Self::Timestamp => "timestamp",
            Self::ZonedDateTime => "timestamp_tz",
        }
    }

    /// Parse a scalar kind from its canonical name or a common alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "text" | "string" => Self::Text,
            "char" => Self::Char,
            "bool" | "boolean" => Self::Bool,
            "tiny_int" | "tinyint" | "byte" => Self::Int8,
            "small_int" | "smallint" | "short" => Self::Int16,
            "int" | "integer" => Self::Int32,
            "big_int" | "bigint" | "long" => Self::Int64,
            "float" => Self::Float32,
            "double" => Self::Float64,
            "big_integer" => Self::BigInteger,
            "decimal" | "big_decimal" => Self::Decimal,
            "atomic_int" => Self::AtomicInt32,
            "atomic_big_int" | "atomic_long" => Self::AtomicInt64,
            "date" => Self::Date,
            "time" => Self::Time,
            "date_time" | "datetime" => Self::LocalDateTime,
            "timestamp" => Self::Timestamp,
            "timestamp_tz" | "timestamptz" | "calendar" => Self::ZonedDateTime,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind is an integer of any width.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::BigInteger
                | Self::AtomicInt32
                | Self::AtomicInt64
        )
    }

    /// Whether this kind is a date or time value.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::LocalDateTime | Self::Timestamp | Self::ZonedDateTime
        )
    }
}

/// Container shapes. Populated containers are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Fixed array
    Array,
    /// Ordered list
    List,
    /// Set of unique values
    Set,
    /// Key-value mapping
    Map,
}

/// Declared type of a field.
///
/// # YAML Format
///
/// Scalars are plain strings:
/// ```yaml
/// type: text
/// type: int
/// ```
///
/// Containers and named types use object format:
/// ```yaml
/// type:
///   type: list
///   element_type: text
/// type:
///   type: map
///   key_type: text
///   value_type: int
/// type:
///   type: record
///   name: Address
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Built-in scalar
    Scalar(ScalarKind),

    /// Array of a specific type
    Array {
        /// Element type
        element_type: Box<FieldType>,
    },

    /// List of a specific type
    List {
        /// Element type
        element_type: Box<FieldType>,
    },

    /// Set of a specific type
    Set {
        /// Element type
        element_type: Box<FieldType>,
    },

    /// Mapping from keys to values
    Map {
        /// Key type
        key_type: Box<FieldType>,
        /// Value type
        value_type: Box<FieldType>,
    },

    /// A record or enumeration declared in the schema
    Named(String),
}

/// How the populator should treat a declared type once no custom randomizer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass<'a> {
    Scalar(ScalarKind),
    Container(ContainerKind),
    Named(&'a str),
}

impl FieldType {
    pub fn text() -> Self {
        Self::Scalar(ScalarKind::Text)
    }

    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    pub fn array(element_type: FieldType) -> Self {
        Self::Array {
            element_type: Box::new(element_type),
        }
    }

    pub fn list(element_type: FieldType) -> Self {
        Self::List {
            element_type: Box::new(element_type),
        }
    }

    pub fn set(element_type: FieldType) -> Self {
        Self::Set {
            element_type: Box::new(element_type),
        }
    }

    pub fn map(key_type: FieldType, value_type: FieldType) -> Self {
        Self::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Classify this type for value dispatch.
    pub fn classify(&self) -> TypeClass<'_> {
        match self {
            Self::Scalar(kind) => TypeClass::Scalar(*kind),
            Self::Array { .. } => TypeClass::Container(ContainerKind::Array),
            Self::List { .. } => TypeClass::Container(ContainerKind::List),
            Self::Set { .. } => TypeClass::Container(ContainerKind::Set),
            Self::Map { .. } => TypeClass::Container(ContainerKind::Map),
            Self::Named(name) => TypeClass::Named(name),
        }
    }

    /// Get the container shape, if this is a container type.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self.classify() {
            TypeClass::Container(kind) => Some(kind),
            _ => None,
        }
    }

    /// Get the scalar kind, if this is a scalar type.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Collect every named type referenced by this type, including container elements.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Scalar(_) => {}
            Self::Array { element_type }
            | Self::List { element_type }
            | Self::Set { element_type } => element_type.collect_names(names),
            Self::Map {
                key_type,
                value_type,
            } => {
                key_type.collect_names(names);
                value_type.collect_names(names);
            }
            Self::Named(name) => names.push(name),
        }
    }
}

impl From<ScalarKind> for FieldType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Array { element_type } => write!(f, "array<{element_type}>"),
            Self::List { element_type } => write!(f, "list<{element_type}>"),
            Self::Set { element_type } => write!(f, "set<{element_type}>"),
            Self::Map {
                key_type,
                value_type,
            } => write!(f, "map<{key_type}, {value_type}>"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

// Scalars serialize as plain strings, everything else as a map with a "type" key.

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Scalar(kind) => serializer.serialize_str(kind.name()),
            Self::Array { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::List { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "list")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::Set { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "set")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::Map {
                key_type,
                value_type,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("key_type", key_type)?;
                map.serialize_entry("value_type", value_type)?;
                map.end()
            }
            Self::Named(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "record")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct FieldTypeVisitor;

        impl<'de> Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a FieldType")
            }

            // Handle string format: "text", "int", etc.
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                ScalarKind::from_name(value)
                    .map(FieldType::Scalar)
                    .ok_or_else(|| E::custom(format!("unknown scalar type: {value}")))
            }

            // Handle map format: {"type": "list", "element_type": "text"}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                if let Some(kind) = ScalarKind::from_name(&type_name) {
                    return Ok(FieldType::Scalar(kind));
                }

                match type_name.as_str() {
                    "array" => Ok(FieldType::array(get_field_required(
                        &fields,
                        "element_type",
                    )?)),
                    "list" => Ok(FieldType::list(get_field_required(
                        &fields,
                        "element_type",
                    )?)),
                    "set" => Ok(FieldType::set(get_field_required(
                        &fields,
                        "element_type",
                    )?)),
                    "map" => {
                        let key_type = get_field_required(&fields, "key_type")?;
                        let value_type = get_field_required(&fields, "value_type")?;
                        Ok(FieldType::map(key_type, value_type))
                    }
                    "record" | "enum" => {
                        let name: String = get_field_required(&fields, "name")?;
                        Ok(FieldType::Named(name))
                    }
                    _ => Err(M::Error::custom(format!("unknown type: {type_name}"))),
                }
            }
        }

        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            FieldType::text().classify(),
            TypeClass::Scalar(ScalarKind::Text)
        );
        assert_eq!(
            FieldType::list(FieldType::text()).classify(),
            TypeClass::Container(ContainerKind::List)
        );
        assert_eq!(
            FieldType::map(FieldType::text(), FieldType::named("Bar")).classify(),
            TypeClass::Container(ContainerKind::Map)
        );
        assert_eq!(
            FieldType::named("Address").classify(),
            TypeClass::Named("Address")
        );
    }

    #[test]
    fn test_scalar_names_parse_back() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ScalarKind::from_name("long"), Some(ScalarKind::Int64));
        assert_eq!(ScalarKind::from_name("nope"), None);
    }

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: FieldType = serde_yaml::from_str("text").unwrap();
        assert_eq!(parsed, FieldType::text());

        let parsed: FieldType = serde_yaml::from_str("int").unwrap();
        assert_eq!(parsed, FieldType::Scalar(ScalarKind::Int32));

        let parsed: FieldType = serde_yaml::from_str("timestamp_tz").unwrap();
        assert_eq!(parsed, FieldType::Scalar(ScalarKind::ZonedDateTime));

        assert!(serde_yaml::from_str::<FieldType>("Address").is_err());
    }

    #[test]
    fn test_deserialize_complex_types() {
        let yaml = r#"
type: list
element_type: text
"#;
        let parsed: FieldType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, FieldType::list(FieldType::text()));

        let yaml = r#"
type: map
key_type: text
value_type:
  type: record
  name: Street
"#;
        let parsed: FieldType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            FieldType::map(FieldType::text(), FieldType::named("Street"))
        );

        let yaml = r#"
type: enum
name: Gender
"#;
        let parsed: FieldType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, FieldType::named("Gender"));
    }

    #[test]
    fn test_deserialize_missing_element_type() {
        let yaml = "type: set\n";
        let err = serde_yaml::from_str::<FieldType>(yaml).unwrap_err();
        assert!(err.to_string().contains("element_type"));
    }

    #[test]
    fn test_referenced_names() {
        let ty = FieldType::map(
            FieldType::named("Key"),
            FieldType::list(FieldType::named("Value")),
        );
        assert_eq!(ty.referenced_names(), vec!["Key", "Value"]);
        assert!(FieldType::text().referenced_names().is_empty());
    }

    #[test]
    fn test_display() {
        let ty = FieldType::map(FieldType::text(), FieldType::list(FieldType::named("Bar")));
        assert_eq!(ty.to_string(), "map<text, list<Bar>>");
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let types = vec![
            FieldType::Scalar(ScalarKind::Bool),
            FieldType::array(FieldType::Scalar(ScalarKind::Int8)),
            FieldType::set(FieldType::named("Tag")),
            FieldType::map(FieldType::text(), FieldType::Scalar(ScalarKind::Decimal)),
            FieldType::named("Address"),
        ];

        for ty in types {
            let yaml = serde_yaml::to_string(&ty).unwrap();
            let parsed: FieldType = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(ty, parsed);
        }
    }
}
