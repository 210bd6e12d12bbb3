//! Numeric value generators.

use rand::Rng;
use rust_decimal::Decimal;

/// Decimal places used for generated decimals.
pub const DECIMAL_SCALE: u32 = 2;

macro_rules! non_zero_signed {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name<R: Rng>(rng: &mut R) -> $ty {
            let magnitude = rng.gen_range(1..=<$ty>::MAX);
            if rng.gen_bool(0.5) {
                magnitude
            } else {
                -magnitude
            }
        }
    };
}

non_zero_signed!(
    /// Random non-zero `i8` of either sign.
    non_zero_i8,
    i8
);
non_zero_signed!(non_zero_i16, i16);
non_zero_signed!(non_zero_i32, i32);
non_zero_signed!(non_zero_i64, i64);
non_zero_signed!(non_zero_i128, i128);

/// Random non-zero float with magnitude in `[0.01, 1e6)`.
pub fn non_zero_f64<R: Rng>(rng: &mut R) -> f64 {
    let magnitude = rng.gen_range(0.01..1_000_000.0);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Random non-zero decimal with two decimal places.
pub fn non_zero_decimal<R: Rng>(rng: &mut R) -> Decimal {
    let mantissa = rng.gen_range(1..=10_000_000_000i64);
    let mantissa = if rng.gen_bool(0.5) {
        mantissa
    } else {
        -mantissa
    };
    Decimal::new(mantissa, DECIMAL_SCALE)
}

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

/// Generate a random float in the given range (inclusive).
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min..=max)
}

/// Generate a random decimal in the given range, rounded to two places.
///
/// Returns `None` when the drawn value is outside the range `Decimal` can
/// represent.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Option<Decimal> {
    let value = rng.gen_range(min..=max);
    Decimal::from_f64_retain(value).map(|d| d.round_dp(DECIMAL_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_non_zero_integers() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut saw_negative = false;

        for _ in 0..500 {
            let value = non_zero_i8(&mut rng);
            assert_ne!(value, 0);
            saw_negative |= value < 0;
            assert_ne!(non_zero_i64(&mut rng), 0);
            assert_ne!(non_zero_i128(&mut rng), 0);
        }
        assert!(saw_negative);
    }

    #[test]
    fn test_non_zero_decimal() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = non_zero_decimal(&mut rng);
            assert!(!value.is_zero());
            assert_eq!(value.scale(), DECIMAL_SCALE);
        }
    }

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_int_range(&mut rng, 10, 20);
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn test_generate_float_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_float_range(&mut rng, 0.0, 100.0);
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_generate_decimal_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_decimal_range(&mut rng, 1.0, 100.0).unwrap();
            assert!(value >= Decimal::ONE && value <= Decimal::ONE_HUNDRED);
            assert!(value.scale() <= DECIMAL_SCALE);
        }
    }

    #[test]
    fn test_unrepresentable_decimal() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_decimal_range(&mut rng, 1e30, 1e31), None);
    }
}
