//! Tracking number generation.
//!
//! Format: `<PREFIX>-<millis since epoch in base 36>-<4 random chars>`, all
//! upper case, e.g. `TRK-MB3K2Q1Z-7XQA`. The number is a capability token for
//! the public lookup, so the random tail matters as much as the timestamp.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

pub fn generate_tracking_number(prefix: &str, now: DateTime<Utc>) -> String {
    let millis = u128::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    push_base36(&mut suffix, Uuid::new_v4().as_u128(), SUFFIX_LEN);
    format!("{prefix}-{}-{suffix}", base36(millis))
}

fn base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Appends the `count` lowest base-36 digits of `n`.
fn push_base36(out: &mut String, mut n: u128, count: usize) {
    for _ in 0..count {
        out.push(char::from(ALPHABET[(n % 36) as usize]));
        n /= 36;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "Z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn number_has_prefix_timestamp_and_suffix() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let number = generate_tracking_number("TRK", now);

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TRK");
        assert_eq!(parts[1], "LOYW3V28");
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn numbers_differ_within_the_same_millisecond() {
        let now = Utc::now();
        let numbers: std::collections::HashSet<String> =
            (0..20).map(|_| generate_tracking_number("TRK", now)).collect();
        assert!(numbers.len() > 1);
    }
}
