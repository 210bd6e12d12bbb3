//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - sequence number of the value within its randomizer
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use super::uuid::generate_uuid_v4;
use rand::Rng;

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        let uuid = generate_uuid_v4(rng).to_string();
        result = result.replacen("{uuid}", &uuid, 1);
    }

    // Replace {rand:N} placeholders left to right
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = generate_random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
                search_from = start + random_num.len();
            }
            // Invalid format, leave it in place
            Err(_) => search_from = end + 1,
        }
    }

    result
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    (0..digits)
        .map(|i| {
            // First digit is 1-9 to avoid leading zeros
            let low = if i == 0 { 1 } else { 0 };
            char::from(b'0' + rng.gen_range(low..10u8))
        })
        .collect()
}
