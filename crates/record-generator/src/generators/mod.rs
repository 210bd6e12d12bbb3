//! Value generators for built-in scalar kinds and configured randomizers.
//!
//! Every built-in generator is generic over the caller's RNG so that a
//! seeded `StdRng` yields a reproducible object graph.

pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;
pub mod uuid;

use rand::seq::SliceRandom;
use rand::Rng;
use record_core::{ScalarKind, Value};

/// Generate a random, non-default value of the given scalar kind.
///
/// Numbers are never zero, text is never empty and temporal values never
/// sit at the epoch. Booleans are a fair coin.
pub fn generate_scalar<R: Rng>(kind: ScalarKind, rng: &mut R) -> Value {
    match kind {
        ScalarKind::Text => Value::Text(text::generate_text(rng)),
        ScalarKind::Char => Value::Char(text::generate_char(rng)),
        ScalarKind::Bool => Value::Bool(rng.gen()),
        ScalarKind::Int8 => Value::Int8(numeric::non_zero_i8(rng)),
        ScalarKind::Int16 => Value::Int16(numeric::non_zero_i16(rng)),
        ScalarKind::Int32 => Value::Int32(numeric::non_zero_i32(rng)),
        ScalarKind::Int64 => Value::Int64(numeric::non_zero_i64(rng)),
        ScalarKind::Float32 => Value::Float32(numeric::non_zero_f64(rng) as f32),
        ScalarKind::Float64 => Value::Float64(numeric::non_zero_f64(rng)),
        ScalarKind::BigInteger => Value::BigInteger(numeric::non_zero_i128(rng)),
        ScalarKind::Decimal => Value::Decimal(numeric::non_zero_decimal(rng)),
        ScalarKind::AtomicInt32 => Value::AtomicInt32(numeric::non_zero_i32(rng)),
        ScalarKind::AtomicInt64 => Value::AtomicInt64(numeric::non_zero_i64(rng)),
        ScalarKind::Date
        | ScalarKind::Time
        | ScalarKind::LocalDateTime
        | ScalarKind::Timestamp
        | ScalarKind::ZonedDateTime => timestamp::generate_temporal(kind, rng),
    }
}

/// Pick one variant of an enumeration uniformly at random.
///
/// Returns `None` for an enumeration without variants.
pub fn random_variant<R: Rng>(type_name: &str, variants: &[String], rng: &mut R) -> Option<Value> {
    variants
        .choose(rng)
        .map(|variant| Value::enumeration(type_name, variant.as_str()))
}

/// Default number of beans produced by an unsized batch request.
///
/// The magnitude of a random signed byte, so always within `0..=128`.
pub fn small_count<R: Rng>(rng: &mut R) -> usize {
    usize::from(rng.gen::<i8>().unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_scalar_kind_matches() {
        let mut rng = StdRng::seed_from_u64(42);

        for kind in ScalarKind::ALL {
            for _ in 0..50 {
                let value = generate_scalar(kind, &mut rng);
                assert_eq!(value.scalar_kind(), Some(kind), "kind {}", kind.name());
            }
        }
    }

    #[test]
    fn test_scalars_are_not_zero_values() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            assert_ne!(generate_scalar(ScalarKind::Int32, &mut rng), Value::Int32(0));
            assert_ne!(generate_scalar(ScalarKind::Int8, &mut rng), Value::Int8(0));
            assert_ne!(generate_scalar(ScalarKind::Float64, &mut rng), Value::Float64(0.0));
            assert_ne!(
                generate_scalar(ScalarKind::Decimal, &mut rng),
                Value::Decimal(Default::default())
            );
            assert_ne!(
                generate_scalar(ScalarKind::Text, &mut rng),
                Value::Text(String::new())
            );
        }
    }

    #[test]
    fn test_deterministic_scalars() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        for kind in ScalarKind::ALL {
            assert_eq!(
                generate_scalar(kind, &mut rng1),
                generate_scalar(kind, &mut rng2)
            );
        }
    }

    #[test]
    fn test_random_variant() {
        let mut rng = StdRng::seed_from_u64(42);
        let variants = vec!["MALE".to_string(), "FEMALE".to_string()];

        for _ in 0..20 {
            let value = random_variant("Gender", &variants, &mut rng).unwrap();
            assert!(matches!(value.as_variant(), Some("MALE") | Some("FEMALE")));
        }
        assert!(random_variant("Empty", &[], &mut rng).is_none());
    }

    #[test]
    fn test_small_count_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            assert!(small_count(&mut rng) <= 128);
        }
    }
}
