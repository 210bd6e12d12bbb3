//! Declarative randomizers usable from YAML configuration.
//!
//! A [`RandomizerConfig`] is compiled against the declared type of the field
//! it is bound to, so that every value it later produces is assignable to
//! that field. Compilation rejects configs that could not satisfy this
//! (an `int_range` bound to a text field, a range whose bounds do not fit
//! the field's width, a `one_of` value of the wrong shape).

use crate::error::ConfigError;
use crate::generators::{numeric, pattern, timestamp, uuid};
use crate::randomizer::{Randomizer, RandomizerError};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use record_core::{FieldType, ScalarKind, Value};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::fmt;
use std::sync::Mutex;

/// Configuration of a declarative randomizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RandomizerConfig {
    /// Generate UUIDs (v4) rendered as text
    UuidV4,

    /// Generate text from a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate random decimals with two places in a range
    DecimalRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate date/time values in a range
    TimestampRange {
        /// Start timestamp (RFC 3339 or YYYY-MM-DD)
        start: String,
        /// End timestamp (RFC 3339 or YYYY-MM-DD)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Probability of `true` (0.0 to 1.0)
        true_weight: f64,
    },

    /// Pick uniformly from a list of literal values
    OneOf {
        /// Candidate values
        values: Vec<YamlValue>,
    },

    /// Always produce the same literal value
    Static {
        /// The value
        value: YamlValue,
    },
}

impl RandomizerConfig {
    /// Name of the randomizer as written in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UuidV4 => "uuid_v4",
            Self::Pattern { .. } => "pattern",
            Self::IntRange { .. } => "int_range",
            Self::FloatRange { .. } => "float_range",
            Self::DecimalRange { .. } => "decimal_range",
            Self::TimestampRange { .. } => "timestamp_range",
            Self::WeightedBool { .. } => "weighted_bool",
            Self::OneOf { .. } => "one_of",
            Self::Static { .. } => "static",
        }
    }

    /// Compile this config into a randomizer producing values of `field_type`.
    ///
    /// `seed` makes the randomizer reproducible; without one it is seeded
    /// from OS entropy.
    pub fn build(
        &self,
        field_type: &FieldType,
        seed: Option<u64>,
    ) -> Result<ConfiguredRandomizer, ConfigError> {
        let generator = self.compile(field_type)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(ConfiguredRandomizer {
            name: self.name(),
            field_type: field_type.clone(),
            generator,
            state: Mutex::new(RandomizerState { rng, index: 0 }),
        })
    }

    fn compile(&self, field_type: &FieldType) -> Result<Compiled, ConfigError> {
        let scalar = field_type.scalar_kind();
        let incompatible = || ConfigError::IncompatibleRandomizer {
            generator: self.name(),
            field_type: field_type.clone(),
        };
        let invalid = |message: String| ConfigError::InvalidRandomizer {
            generator: self.name(),
            message,
        };

        let compiled = match self {
            Self::UuidV4 => {
                require(scalar == Some(ScalarKind::Text), incompatible)?;
                Compiled::Uuid
            }
            Self::Pattern { pattern } => {
                require(scalar == Some(ScalarKind::Text), incompatible)?;
                Compiled::Pattern(pattern.clone())
            }
            Self::IntRange { min, max } => {
                let kind = scalar.filter(ScalarKind::is_integer).ok_or_else(incompatible)?;
                if min > max {
                    return Err(invalid(format!("min {min} is greater than max {max}")));
                }
                for bound in [*min, *max] {
                    if integer_value(kind, bound).is_none() {
                        return Err(invalid(format!(
                            "bound {bound} does not fit type {}",
                            kind.name()
                        )));
                    }
                }
                Compiled::Int {
                    kind,
                    min: *min,
                    max: *max,
                }
            }
            Self::FloatRange { min, max } => {
                let kind = scalar
                    .filter(|k| matches!(k, ScalarKind::Float32 | ScalarKind::Float64))
                    .ok_or_else(incompatible)?;
                check_float_range(*min, *max).map_err(invalid)?;
                if kind == ScalarKind::Float32 {
                    for bound in [*min, *max] {
                        if bound < f64::from(f32::MIN) || bound > f64::from(f32::MAX) {
                            return Err(invalid(format!(
                                "bound {bound} does not fit type {}",
                                kind.name()
                            )));
                        }
                    }
                }
                Compiled::Float {
                    kind,
                    min: *min,
                    max: *max,
                }
            }
            Self::DecimalRange { min, max } => {
                require(scalar == Some(ScalarKind::Decimal), incompatible)?;
                check_float_range(*min, *max).map_err(invalid)?;
                for bound in [*min, *max] {
                    if Decimal::from_f64_retain(bound).is_none() {
                        return Err(invalid(format!(
                            "bound {bound} is not representable as a decimal"
                        )));
                    }
                }
                Compiled::Decimal {
                    min: *min,
                    max: *max,
                }
            }
            Self::TimestampRange { start, end } => {
                let kind = scalar.filter(ScalarKind::is_temporal).ok_or_else(incompatible)?;
                let parse = |s: &String| {
                    timestamp::parse_timestamp(s)
                        .ok_or_else(|| invalid(format!("cannot parse timestamp '{s}'")))
                };
                Compiled::Timestamp {
                    kind,
                    start: parse(start)?,
                    end: parse(end)?,
                }
            }
            Self::WeightedBool { true_weight } => {
                require(scalar == Some(ScalarKind::Bool), incompatible)?;
                if !(0.0..=1.0).contains(true_weight) {
                    return Err(invalid(format!(
                        "true_weight {true_weight} is not between 0 and 1"
                    )));
                }
                Compiled::Bool(*true_weight)
            }
            Self::OneOf { values } => {
                if values.is_empty() {
                    return Err(invalid("no values to choose from".to_string()));
                }
                let values = values
                    .iter()
                    .map(|yaml| typed_literal(yaml, field_type).ok_or_else(incompatible))
                    .collect::<Result<Vec<_>, _>>()?;
                Compiled::OneOf(values)
            }
            Self::Static { value } => {
                Compiled::Static(typed_literal(value, field_type).ok_or_else(incompatible)?)
            }
        };
        Ok(compiled)
    }
}

fn require(
    condition: bool,
    error: impl FnOnce() -> ConfigError,
) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(error())
    }
}

fn check_float_range(min: f64, max: f64) -> Result<(), String> {
    if !min.is_finite() || !max.is_finite() {
        return Err("bounds must be finite".to_string());
    }
    if min > max {
        return Err(format!("min {min} is greater than max {max}"));
    }
    if !(max - min).is_finite() {
        return Err(format!("range {min}..={max} is too wide"));
    }
    Ok(())
}

/// Literal values cannot describe records.
fn typed_literal(yaml: &YamlValue, field_type: &FieldType) -> Option<Value> {
    Value::from_yaml_typed(yaml, field_type).filter(|value| value.as_record().is_none())
}

/// Convert an integer to a value of the given integer kind, if it fits.
pub fn integer_value(kind: ScalarKind, v: i64) -> Option<Value> {
    let value = match kind {
        ScalarKind::Int8 => Value::Int8(i8::try_from(v).ok()?),
        ScalarKind::Int16 => Value::Int16(i16::try_from(v).ok()?),
        ScalarKind::Int32 => Value::Int32(i32::try_from(v).ok()?),
        ScalarKind::Int64 => Value::Int64(v),
        ScalarKind::BigInteger => Value::BigInteger(i128::from(v)),
        ScalarKind::AtomicInt32 => Value::AtomicInt32(i32::try_from(v).ok()?),
        ScalarKind::AtomicInt64 => Value::AtomicInt64(v),
        _ => return None,
    };
    Some(value)
}

/// Config compiled against a field type.
#[derive(Debug)]
enum Compiled {
    Uuid,
    Pattern(String),
    Int {
        kind: ScalarKind,
        min: i64,
        max: i64,
    },
    Float {
        kind: ScalarKind,
        min: f64,
        max: f64,
    },
    Decimal {
        min: f64,
        max: f64,
    },
    Timestamp {
        kind: ScalarKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Bool(f64),
    OneOf(Vec<Value>),
    Static(Value),
}

impl Compiled {
    fn generate(&self, state: &mut RandomizerState) -> Result<Value, RandomizerError> {
        let rng = &mut state.rng;
        let value = match self {
            Self::Uuid => Value::Text(uuid::generate_uuid_v4(rng).to_string()),
            Self::Pattern(p) => Value::Text(pattern::generate_pattern(p, rng, state.index)),
            Self::Int { kind, min, max } => {
                let v = numeric::generate_int_range(rng, *min, *max);
                integer_value(*kind, v).ok_or_else(|| {
                    RandomizerError::failed(format!("{v} does not fit type {}", kind.name()))
                })?
            }
            Self::Float { kind, min, max } => {
                let v = numeric::generate_float_range(rng, *min, *max);
                match kind {
                    ScalarKind::Float32 => Value::Float32(v as f32),
                    _ => Value::Float64(v),
                }
            }
            Self::Decimal { min, max } => numeric::generate_decimal_range(rng, *min, *max)
                .map(Value::Decimal)
                .ok_or_else(|| RandomizerError::failed("value is not representable as a decimal"))?,
            Self::Timestamp { kind, start, end } => {
                let instant = timestamp::generate_timestamp_range(rng, *start, *end);
                timestamp::temporal_value(*kind, instant).ok_or_else(|| {
                    RandomizerError::failed(format!("{} is not a temporal type", kind.name()))
                })?
            }
            Self::Bool(true_weight) => Value::Bool(rng.gen_bool(*true_weight)),
            Self::OneOf(values) => values
                .choose(rng)
                .cloned()
                .ok_or_else(|| RandomizerError::failed("no values to choose from"))?,
            Self::Static(value) => value.clone(),
        };
        Ok(value)
    }
}

#[derive(Debug)]
struct RandomizerState {
    rng: StdRng,
    /// Number of values produced so far
    index: u64,
}

/// A [`RandomizerConfig`] compiled for one field type.
///
/// Owns its RNG behind a mutex so that it can be shared across threads
/// while still satisfying the zero-argument [`Randomizer`] capability.
pub struct ConfiguredRandomizer {
    name: &'static str,
    field_type: FieldType,
    generator: Compiled,
    state: Mutex<RandomizerState>,
}

impl ConfiguredRandomizer {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type every produced value is assignable to.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Literal values this randomizer may produce (`one_of` and `static`).
    pub fn literal_values(&self) -> &[Value] {
        match &self.generator {
            Compiled::OneOf(values) => values,
            Compiled::Static(value) => std::slice::from_ref(value),
            _ => &[],
        }
    }
}

impl Randomizer for ConfiguredRandomizer {
    fn random_value(&self) -> Result<Value, RandomizerError> {
        let mut state = self.state.lock().map_err(|_| RandomizerError::Poisoned)?;
        let value = self.generator.generate(&mut state)?;
        state.index += 1;
        Ok(value)
    }
}

impl fmt::Debug for ConfiguredRandomizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredRandomizer")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> RandomizerConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_configs() {
        assert_eq!(parse("type: uuid_v4"), RandomizerConfig::UuidV4);
        assert_eq!(
            parse("type: int_range\nmin: 1\nmax: 9"),
            RandomizerConfig::IntRange { min: 1, max: 9 }
        );
        assert_eq!(parse("type: weighted_bool\ntrue_weight: 0.3").name(), "weighted_bool");
        assert!(serde_yaml::from_str::<RandomizerConfig>("type: nope").is_err());
    }

    #[test]
    fn test_int_range_respects_field_width() {
        let config = RandomizerConfig::IntRange { min: -5, max: 5 };
        let randomizer = config
            .build(&ScalarKind::Int16.into(), Some(42))
            .unwrap();

        for _ in 0..100 {
            match randomizer.random_value().unwrap() {
                Value::Int16(v) => assert!((-5..=5).contains(&v)),
                other => panic!("Expected Int16, got {other:?}"),
            }
        }

        let too_wide = RandomizerConfig::IntRange { min: 0, max: 1000 };
        assert!(matches!(
            too_wide.build(&ScalarKind::Int8.into(), None),
            Err(ConfigError::InvalidRandomizer { .. })
        ));
    }

    #[test]
    fn test_incompatible_field_type() {
        let err = RandomizerConfig::UuidV4
            .build(&ScalarKind::Int32.into(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompatibleRandomizer {
                generator: "uuid_v4",
                ..
            }
        ));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let config = RandomizerConfig::FloatRange { min: 2.0, max: 1.0 };
        assert!(config.build(&ScalarKind::Float64.into(), None).is_err());
    }

    #[test]
    fn test_overflowing_float_span_rejected() {
        let config = RandomizerConfig::FloatRange {
            min: -1e308,
            max: 1e308,
        };
        assert!(matches!(
            config.build(&ScalarKind::Float64.into(), None),
            Err(ConfigError::InvalidRandomizer { .. })
        ));

        let decimal = RandomizerConfig::DecimalRange {
            min: -1e308,
            max: 1e308,
        };
        assert!(decimal.build(&ScalarKind::Decimal.into(), None).is_err());
    }

    #[test]
    fn test_float_bounds_must_fit_f32() {
        let config = RandomizerConfig::FloatRange {
            min: 1e39,
            max: 1e40,
        };
        assert!(matches!(
            config.build(&ScalarKind::Float32.into(), None),
            Err(ConfigError::InvalidRandomizer { .. })
        ));

        // The same bounds are fine for a double
        let randomizer = config.build(&ScalarKind::Float64.into(), Some(3)).unwrap();
        match randomizer.random_value().unwrap() {
            Value::Float64(v) => assert!(v.is_finite() && v >= 1e39),
            other => panic!("Expected Float64, got {other:?}"),
        }

        let narrow = RandomizerConfig::FloatRange { min: -2.5, max: 2.5 };
        let randomizer = narrow.build(&ScalarKind::Float32.into(), Some(3)).unwrap();
        for _ in 0..50 {
            match randomizer.random_value().unwrap() {
                Value::Float32(v) => assert!((-2.5..=2.5).contains(&v)),
                other => panic!("Expected Float32, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decimal_bounds_must_be_representable() {
        let config = RandomizerConfig::DecimalRange {
            min: 1e30,
            max: 1e31,
        };
        assert!(matches!(
            config.build(&ScalarKind::Decimal.into(), None),
            Err(ConfigError::InvalidRandomizer { .. })
        ));
    }

    #[test]
    fn test_randomizer_reports_field_type() {
        let randomizer = RandomizerConfig::UuidV4
            .build(&FieldType::text(), Some(1))
            .unwrap();

        assert_eq!(randomizer.field_type(), &FieldType::text());
        assert_eq!(randomizer.name(), "uuid_v4");
        assert!(randomizer.literal_values().is_empty());
    }

    #[test]
    fn test_pattern_index_advances() {
        let config = RandomizerConfig::Pattern {
            pattern: "user_{index}".to_string(),
        };
        let randomizer = config.build(&FieldType::text(), Some(1)).unwrap();

        assert_eq!(randomizer.random_value(), Ok(Value::from("user_0")));
        assert_eq!(randomizer.random_value(), Ok(Value::from("user_1")));
    }

    #[test]
    fn test_one_of_typed_values() {
        let config = parse("type: one_of\nvalues: [3, 5, 7]");
        let randomizer = config.build(&ScalarKind::Int64.into(), Some(42)).unwrap();

        for _ in 0..20 {
            let value = randomizer.random_value().unwrap();
            assert!(matches!(value, Value::Int64(3) | Value::Int64(5) | Value::Int64(7)));
        }

        let empty = RandomizerConfig::OneOf { values: vec![] };
        assert!(empty.build(&FieldType::text(), None).is_err());
    }

    #[test]
    fn test_static_list_value() {
        let config = parse("type: static\nvalue: [a, b]");
        let randomizer = config
            .build(&FieldType::list(FieldType::text()), None)
            .unwrap();

        assert_eq!(
            randomizer.random_value(),
            Ok(Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_timestamp_range_as_date() {
        let config = RandomizerConfig::TimestampRange {
            start: "2020-01-01".to_string(),
            end: "2020-12-31".to_string(),
        };
        let randomizer = config.build(&ScalarKind::Date.into(), Some(42)).unwrap();

        match randomizer.random_value().unwrap() {
            Value::Date(date) => assert_eq!(chrono::Datelike::year(&date), 2020),
            other => panic!("Expected Date, got {other:?}"),
        }

        let bad = RandomizerConfig::TimestampRange {
            start: "soon".to_string(),
            end: "2020-12-31".to_string(),
        };
        assert!(bad.build(&ScalarKind::Date.into(), None).is_err());
    }

    #[test]
    fn test_seeded_randomizers_repeat() {
        let config = RandomizerConfig::DecimalRange {
            min: 0.0,
            max: 500.0,
        };
        let first = config.build(&ScalarKind::Decimal.into(), Some(9)).unwrap();
        let second = config.build(&ScalarKind::Decimal.into(), Some(9)).unwrap();

        for _ in 0..10 {
            assert_eq!(first.random_value(), second.random_value());
        }
    }
}
