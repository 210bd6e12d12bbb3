//! Text and character generators.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Shortest generated string.
pub const MIN_TEXT_LENGTH: usize = 1;

/// Longest generated string.
pub const MAX_TEXT_LENGTH: usize = 12;

/// Generate a non-empty alphanumeric string.
pub fn generate_text<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(MIN_TEXT_LENGTH..=MAX_TEXT_LENGTH);
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Generate a single alphanumeric character.
pub fn generate_char<R: Rng>(rng: &mut R) -> char {
    char::from(rng.sample(Alphanumeric))
}
