//! Value representations for populated records.
//!
//! `Value` is the dynamic value universe a field can hold, and `Record` is an
//! instance of a record type: an ordered mapping from field names to values.

use crate::types::{ContainerKind, FieldType, ScalarKind};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_yaml::Value as YamlValue;
use std::str::FromStr;

/// A single field value.
///
/// `Null` is the placeholder held by every instance field of a freshly
/// constructed record until the populator assigns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Unassigned placeholder
    Null,

    Bool(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    BigInteger(i128),
    Decimal(Decimal),
    AtomicInt32(i32),
    AtomicInt64(i64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    LocalDateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    ZonedDateTime(DateTime<FixedOffset>),

    Array(Vec<Value>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),

    /// Member of an enumeration type
    Enum {
        type_name: String,
        variant: String,
    },

    /// Nested record instance
    Record(Record),
}

impl Value {
    /// Create an enumeration value.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Create an empty container of the given shape.
    pub fn empty_container(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Array => Self::Array(Vec::new()),
            ContainerKind::List => Self::List(Vec::new()),
            ContainerKind::Set => Self::Set(Vec::new()),
            ContainerKind::Map => Self::Map(Vec::new()),
        }
    }

    /// Check if this value is the unassigned placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Scalar kind of this value, if it is a scalar.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::Int8(_) => ScalarKind::Int8,
            Self::Int16(_) => ScalarKind::Int16,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Float32(_) => ScalarKind::Float32,
            Self::Float64(_) => ScalarKind::Float64,
            Self::BigInteger(_) => ScalarKind::BigInteger,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::AtomicInt32(_) => ScalarKind::AtomicInt32,
            Self::AtomicInt64(_) => ScalarKind::AtomicInt64,
            Self::Text(_) => ScalarKind::Text,
            Self::Date(_) => ScalarKind::Date,
            Self::Time(_) => ScalarKind::Time,
            Self::LocalDateTime(_) => ScalarKind::LocalDateTime,
            Self::Timestamp(_) => ScalarKind::Timestamp,
            Self::ZonedDateTime(_) => ScalarKind::ZonedDateTime,
            _ => return None,
        };
        Some(kind)
    }

    /// Container shape of this value, if it is a container.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Array(_) => Some(ContainerKind::Array),
            Self::List(_) => Some(ContainerKind::List),
            Self::Set(_) => Some(ContainerKind::Set),
            Self::Map(_) => Some(ContainerKind::Map),
            _ => None,
        }
    }

    /// Number of entries if this value is a container.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Self::Array(items) | Self::List(items) | Self::Set(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Short human-readable description of the value's kind, for error messages.
    pub fn kind_name(&self) -> String {
        if let Some(kind) = self.scalar_kind() {
            return kind.name().to_string();
        }
        match self {
            Self::Null => "null".to_string(),
            Self::Array(_) => "array".to_string(),
            Self::List(_) => "list".to_string(),
            Self::Set(_) => "set".to_string(),
            Self::Map(_) => "map".to_string(),
            Self::Enum { type_name, .. } => format!("enum {type_name}"),
            Self::Record(record) => format!("record {}", record.type_name()),
            _ => "scalar".to_string(),
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an i64, widening smaller integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int8(i) => Some(*i as i64),
            Self::Int16(i) => Some(*i as i64),
            Self::Int32(i) | Self::AtomicInt32(i) => Some(*i as i64),
            Self::Int64(i) | Self::AtomicInt64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a nested record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Consume this value, returning the nested record if there is one.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Try to get the variant name of an enumeration value.
    pub fn as_variant(&self) -> Option<&str> {
        match self {
            Self::Enum { variant, .. } => Some(variant),
            _ => None,
        }
    }

    /// Convert a YAML value to a `Value` of the given declared type.
    ///
    /// Returns `None` when the YAML cannot represent a value of that type.
    /// Record types have no literal form and always return `None`.
    pub fn from_yaml_typed(yaml: &YamlValue, target: &FieldType) -> Option<Value> {
        if let YamlValue::Tagged(tagged) = yaml {
            return Self::from_yaml_typed(&tagged.value, target);
        }
        if yaml.is_null() {
            return Some(Value::Null);
        }

        match target {
            FieldType::Scalar(kind) => scalar_from_yaml(yaml, *kind),
            FieldType::Array { element_type } => {
                sequence_from_yaml(yaml, element_type).map(Value::Array)
            }
            FieldType::List { element_type } => {
                sequence_from_yaml(yaml, element_type).map(Value::List)
            }
            FieldType::Set { element_type } => {
                sequence_from_yaml(yaml, element_type).map(Value::Set)
            }
            FieldType::Map {
                key_type,
                value_type,
            } => {
                let mapping = yaml.as_mapping()?;
                mapping
                    .iter()
                    .map(|(k, v)| {
                        Some((
                            Self::from_yaml_typed(k, key_type)?,
                            Self::from_yaml_typed(v, value_type)?,
                        ))
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(Value::Map)
            }
            FieldType::Named(name) => yaml
                .as_str()
                .map(|variant| Value::enumeration(name.clone(), variant)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

fn sequence_from_yaml(yaml: &YamlValue, element_type: &FieldType) -> Option<Vec<Value>> {
    yaml.as_sequence()?
        .iter()
        .map(|item| Value::from_yaml_typed(item, element_type))
        .collect()
}

fn yaml_text(yaml: &YamlValue) -> Option<String> {
    match yaml {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_int(yaml: &YamlValue) -> Option<i128> {
    match yaml {
        YamlValue::Number(n) => n.as_i64().map(i128::from),
        YamlValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn yaml_float(yaml: &YamlValue) -> Option<f64> {
    match yaml {
        YamlValue::Number(n) => n.as_f64(),
        YamlValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_from_yaml(yaml: &YamlValue, kind: ScalarKind) -> Option<Value> {
    let value = match kind {
        ScalarKind::Text => Value::Text(yaml_text(yaml)?),
        ScalarKind::Char => {
            let text = yaml_text(yaml)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return None,
            }
        }
        ScalarKind::Bool => match yaml {
            YamlValue::Bool(b) => Value::Bool(*b),
            YamlValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" => Value::Bool(false),
                _ => return None,
            },
            _ => return None,
        },
        ScalarKind::Int8 => Value::Int8(i8::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::Int16 => Value::Int16(i16::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::Int32 => Value::Int32(i32::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::Int64 => Value::Int64(i64::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::AtomicInt32 => Value::AtomicInt32(i32::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::AtomicInt64 => Value::AtomicInt64(i64::try_from(yaml_int(yaml)?).ok()?),
        ScalarKind::BigInteger => Value::BigInteger(yaml_int(yaml)?),
        ScalarKind::Float32 => Value::Float32(yaml_float(yaml)? as f32),
        ScalarKind::Float64 => Value::Float64(yaml_float(yaml)?),
        ScalarKind::Decimal => Value::Decimal(Decimal::from_str(yaml_text(yaml)?.trim()).ok()?),
        ScalarKind::Date => {
            Value::Date(NaiveDate::parse_from_str(yaml.as_str()?, "%Y-%m-%d").ok()?)
        }
        ScalarKind::Time => {
            Value::Time(NaiveTime::parse_from_str(yaml.as_str()?, "%H:%M:%S").ok()?)
        }
        ScalarKind::LocalDateTime => Value::LocalDateTime(
            NaiveDateTime::parse_from_str(yaml.as_str()?, "%Y-%m-%dT%H:%M:%S").ok()?,
        ),
        ScalarKind::Timestamp => Value::Timestamp(
            DateTime::parse_from_rfc3339(yaml.as_str()?)
                .ok()?
                .with_timezone(&Utc),
        ),
        ScalarKind::ZonedDateTime => {
            Value::ZonedDateTime(DateTime::parse_from_rfc3339(yaml.as_str()?).ok()?)
        }
    };
    Some(value)
}

/// An instance of a record type.
///
/// Fields keep the order in which the type's descriptor declares them: own
/// fields first, then inherited fields from the nearest ancestor outwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Name of the record's type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field value by a dotted path through nested records,
    /// e.g. `"address.street.name"`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_record()?.get(segment)?;
        }
        Some(current)
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // Unchecked write. Checked assignment goes through `TypeSchema::set_field`.
    pub(crate) fn put(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}
