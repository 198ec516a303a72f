//! Base-60 numeral decoding for the packed zone format.
//!
//! Offsets and diffs are written as base-60 numerals over the digit
//! alphabet `0-9a-zA-Z`: `0`-`9` map to 0-9, `a`-`z` to 10-35 and `A`-`Z`
//! to 36-61, so digit value increases monotonically through the sequence.
//! A numeral may carry a fractional part, also in base 60.

/// Sign of a packed base-60 numeral. The wire format marks negative
/// numbers with a leading `-`; absence means positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Positive,
    Negative,
}

impl Sign {
    const fn as_f64(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Returns the value of a single base-60 digit, or [`None`] if 'ch' is not
/// part of the digit alphabet.
pub(crate) const fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - 48),
        'a'..='z' => Some(ch as u32 - 87),
        'A'..='Z' => Some(ch as u32 - 29),
        _ => None,
    }
}

/// Returns 'true' if 'ch' is a valid base-60 digit.
pub(crate) const fn is_digit(ch: char) -> bool {
    digit_value(ch).is_some()
}

/// Decodes a base-60 numeral split into its whole and fractional digit
/// runs.
///
/// The whole part is a standard positional integer (leftmost digit most
/// significant); each fractional digit contributes `digit * 60^-(i + 1)`.
/// Either run may be empty and contributes 0. The caller is responsible
/// for rejecting the case where both runs are empty, since on the wire
/// that denotes a missing number rather than zero.
///
/// Evaluation is plain double-precision arithmetic: lossy for long digit
/// runs, but deterministic.
pub(crate) fn decode(sign: Sign, whole: &str, frac: &str) -> f64 {
    debug_assert!(whole.chars().all(is_digit));
    debug_assert!(frac.chars().all(is_digit));

    let mut value = 0.0_f64;
    for ch in whole.chars() {
        value = 60.0 * value + digit_value(ch).unwrap_or(0) as f64;
    }

    let mut multiplier = 1.0_f64;
    for ch in frac.chars() {
        multiplier /= 60.0;
        value += digit_value(ch).unwrap_or(0) as f64 * multiplier;
    }

    sign.as_f64() * value
}

#[cfg(test)]
mod tests {
    use super::{Sign, decode, digit_value};

    #[test]
    fn test_digit_alphabet() {
        assert_eq!(digit_value('0'), Some(0));
        assert_eq!(digit_value('9'), Some(9));
        assert_eq!(digit_value('a'), Some(10));
        assert_eq!(digit_value('z'), Some(35));
        assert_eq!(digit_value('A'), Some(36));
        assert_eq!(digit_value('Z'), Some(61));

        assert_eq!(digit_value('|'), None);
        assert_eq!(digit_value(' '), None);
        assert_eq!(digit_value('.'), None);
        assert_eq!(digit_value('-'), None);
    }

    #[test]
    fn test_whole_part() {
        // standard positional evaluation: a lone digit is its own value
        assert_eq!(decode(Sign::Positive, "1", ""), 1.0);
        assert_eq!(decode(Sign::Positive, "10", ""), 60.0);
        assert_eq!(decode(Sign::Positive, "2f", ""), 2.0 * 60.0 + 15.0);
        assert_eq!(decode(Sign::Positive, "", ""), 0.0);
    }

    #[test]
    fn test_fractional_part() {
        assert_eq!(decode(Sign::Positive, "", "1"), 1.0 / 60.0);
        assert_eq!(decode(Sign::Positive, "", "01"), 1.0 / 3600.0);
        assert_eq!(decode(Sign::Positive, "1", "U"), 1.0 + 56.0 / 60.0);
    }

    #[test]
    fn test_sign() {
        assert_eq!(decode(Sign::Negative, "1", ""), -1.0);
        assert_eq!(decode(Sign::Negative, "1", "U"), -(1.0 + 56.0 / 60.0));
    }
}
