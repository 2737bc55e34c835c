//! UTC offsets chosen by the user
//!
//! The offset is a display-only hour shift. It is not validated against
//! real-world zone rules (no DST, no half-hour zones).

use std::fmt;
use std::ops::RangeInclusive;

use crate::{DeciError, DeciResult};

/// Whole-hour UTC offset in [-12, 14]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffset(i8);

impl UtcOffset {
    pub const MIN_HOURS: i32 = -12;
    pub const MAX_HOURS: i32 = 14;

    pub const UTC: UtcOffset = UtcOffset(0);
    pub const MIN: UtcOffset = UtcOffset(Self::MIN_HOURS as i8);
    pub const MAX: UtcOffset = UtcOffset(Self::MAX_HOURS as i8);

    /// Every accepted hour value
    pub const RANGE: RangeInclusive<i32> = Self::MIN_HOURS..=Self::MAX_HOURS;

    /// Validate an hour value
    pub fn new(hours: i64) -> DeciResult<Self> {
        if hours < Self::MIN_HOURS as i64 || hours > Self::MAX_HOURS as i64 {
            return Err(DeciError::OffsetOutOfRange(hours));
        }
        Ok(UtcOffset(hours as i8))
    }

    /// Offset for a detected environment value, or UTC when it falls
    /// outside the accepted range
    pub fn from_detected(hours: i64) -> Self {
        Self::new(hours).unwrap_or(Self::UTC)
    }

    #[inline]
    pub fn hours(self) -> i32 {
        self.0 as i32
    }

    /// Shift in milliseconds
    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 as i64 * 3_600_000
    }

    /// All offsets from `UTC-12` to `UTC+14`, in order
    pub fn all() -> impl Iterator<Item = UtcOffset> {
        Self::RANGE.map(|h| UtcOffset(h as i8))
    }

    /// Next offset towards `MAX`, saturating
    pub fn step_up(self) -> Self {
        Self::new(self.hours() as i64 + 1).unwrap_or(Self::MAX)
    }

    /// Next offset towards `MIN`, saturating
    pub fn step_down(self) -> Self {
        Self::new(self.hours() as i64 - 1).unwrap_or(Self::MIN)
    }

    /// Decimal text used for persistence
    pub fn to_stored(self) -> String {
        self.0.to_string()
    }

    /// Read a persisted value. Anything that is not a valid in-range
    /// integer yields `None`.
    pub fn from_stored(text: &str) -> Option<Self> {
        parse_leading_int(text).and_then(|h| Self::new(h).ok())
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0 {
            write!(f, "UTC+{}", self.0)
        } else {
            write!(f, "UTC{}", self.0)
        }
    }
}

impl fmt::Debug for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UtcOffset({})", self.0)
    }
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace, an optional sign and a run of decimal digits are
/// consumed; anything after the digits is ignored. Returns `None` when no
/// digit is found. Values too large for `i64` saturate, so they still read
/// as numeric (and out of range).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..run].bytes() {
        let d = (b - b'0') as i64;
        value = match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
            Some(v) => v,
            None => return Some(if negative { i64::MIN } else { i64::MAX }),
        };
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds() {
        assert!(UtcOffset::new(14).is_ok());
        assert!(UtcOffset::new(-12).is_ok());
        assert!(matches!(UtcOffset::new(15), Err(DeciError::OffsetOutOfRange(15))));
        assert!(matches!(UtcOffset::new(-13), Err(DeciError::OffsetOutOfRange(-13))));
    }

    #[test]
    fn test_label() {
        assert_eq!(UtcOffset::UTC.to_string(), "UTC+0");
        assert_eq!(UtcOffset::new(3).unwrap().to_string(), "UTC+3");
        assert_eq!(UtcOffset::new(-5).unwrap().to_string(), "UTC-5");
        assert_eq!(UtcOffset::MAX.to_string(), "UTC+14");
    }

    #[test]
    fn test_detected_fallback() {
        assert_eq!(UtcOffset::from_detected(9).hours(), 9);
        assert_eq!(UtcOffset::from_detected(-20), UtcOffset::UTC);
        assert_eq!(UtcOffset::from_detected(15), UtcOffset::UTC);
    }

    #[test]
    fn test_all_offsets() {
        let all: Vec<i32> = UtcOffset::all().map(UtcOffset::hours).collect();
        assert_eq!(all.len(), 27);
        assert_eq!(all.first(), Some(&-12));
        assert_eq!(all.last(), Some(&14));
    }

    #[test]
    fn test_steps_saturate() {
        assert_eq!(UtcOffset::MAX.step_up(), UtcOffset::MAX);
        assert_eq!(UtcOffset::MIN.step_down(), UtcOffset::MIN);
        assert_eq!(UtcOffset::UTC.step_up().hours(), 1);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("14"), Some(14));
        assert_eq!(parse_leading_int("  -7"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("5.9"), Some(5));
        assert_eq!(parse_leading_int("2h"), Some(2));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_stored_rejects_garbage() {
        assert_eq!(UtcOffset::from_stored("x"), None);
        assert_eq!(UtcOffset::from_stored("42"), None);
        assert_eq!(UtcOffset::from_stored("-4"), Some(UtcOffset::new(-4).unwrap()));
    }

    proptest! {
        #[test]
        fn stored_text_roundtrips(h in -12i64..=14) {
            let offset = UtcOffset::new(h).unwrap();
            prop_assert_eq!(UtcOffset::from_stored(&offset.to_stored()), Some(offset));
        }

        #[test]
        fn parse_never_panics(s in ".*") {
            let _ = parse_leading_int(&s);
        }
    }
}
