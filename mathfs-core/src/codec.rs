//! Integer <-> decimal text conversion.
//!
//! File contents are plain ASCII decimal with no trailing newline. Reported
//! file sizes come from [`digit_count`], which must agree with the length of
//! [`encode_decimal`] for every value or read offsets stop lining up.

/// Number of characters in the base-10 form of `value`, sign included.
///
/// # Examples
/// ```
/// use mathfs_core::digit_count;
/// assert_eq!(digit_count(0), 1);
/// assert_eq!(digit_count(42), 2);
/// assert_eq!(digit_count(-7), 2);
/// ```
pub fn digit_count(value: i64) -> usize {
    let magnitude = value.unsigned_abs();
    let digits = match magnitude.checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    };
    if value < 0 {
        digits + 1
    } else {
        digits
    }
}

/// Canonical decimal text: no leading zeros, optional leading `-`.
pub fn encode_decimal(value: i64) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Parse a leading decimal integer the way C `atoi` does.
///
/// - Leading whitespace is skipped
/// - One optional `+` or `-` sign
/// - Digits are consumed until the first non-digit; the rest is ignored
/// - No digits at all yields `0`
/// - Out-of-range values saturate at `i64::MIN` / `i64::MAX`
pub fn decode_decimal(data: &[u8]) -> i64 {
    // C isspace() also accepts vertical tab
    let start = data
        .iter()
        .position(|b| !(b.is_ascii_whitespace() || *b == 0x0B))
        .unwrap_or(data.len());
    let mut rest = &data[start..];

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        let next = if negative {
            value.checked_mul(10).and_then(|v| v.checked_sub(digit))
        } else {
            value.checked_mul(10).and_then(|v| v.checked_add(digit))
        };
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count_matches_encoding() {
        let samples = [
            0,
            1,
            9,
            10,
            99,
            100,
            12345,
            -1,
            -9,
            -10,
            i64::MAX,
            i64::MIN,
            i64::MAX / 10,
        ];
        for value in samples {
            assert_eq!(
                digit_count(value),
                encode_decimal(value).len(),
                "mismatch for {}",
                value
            );
        }
    }

    #[test]
    fn test_digit_count_powers_of_ten() {
        let mut n: i64 = 1;
        for expected in 1..=19 {
            assert_eq!(digit_count(n), expected);
            assert_eq!(digit_count(n - 1), (expected - 1).max(1));
            n = n.saturating_mul(10);
        }
    }

    #[test]
    fn test_encode_decimal() {
        assert_eq!(encode_decimal(0), b"0");
        assert_eq!(encode_decimal(42), b"42");
        assert_eq!(encode_decimal(-15), b"-15");
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode_decimal(b"5"), 5);
        assert_eq!(decode_decimal(b"-123"), -123);
        assert_eq!(decode_decimal(b"+77"), 77);
        assert_eq!(decode_decimal(b"007"), 7);
    }

    #[test]
    fn test_decode_trailing_garbage() {
        assert_eq!(decode_decimal(b"42\n"), 42);
        assert_eq!(decode_decimal(b"12abc"), 12);
        assert_eq!(decode_decimal(b"3 4"), 3);
    }

    #[test]
    fn test_decode_leading_whitespace() {
        assert_eq!(decode_decimal(b"  \t9"), 9);
        assert_eq!(decode_decimal(b"\x0b-2"), -2);
    }

    #[test]
    fn test_decode_no_number_is_zero() {
        assert_eq!(decode_decimal(b""), 0);
        assert_eq!(decode_decimal(b"abc"), 0);
        assert_eq!(decode_decimal(b"-"), 0);
        assert_eq!(decode_decimal(b"- 5"), 0);
        assert_eq!(decode_decimal(b"\n"), 0);
    }

    #[test]
    fn test_decode_saturates() {
        assert_eq!(decode_decimal(b"99999999999999999999"), i64::MAX);
        assert_eq!(decode_decimal(b"-99999999999999999999"), i64::MIN);
        assert_eq!(decode_decimal(b"-9223372036854775808"), i64::MIN);
    }

    #[test]
    fn test_round_trip_extremes() {
        for value in [0, 1, -1, i64::MAX, i64::MIN, 1_000_000, -987_654_321] {
            assert_eq!(decode_decimal(&encode_decimal(value)), value);
        }
    }
}
