//! Time primitives for the decimal clock
//!
//! Two values flow through every frame:
//! - `ZoneParts`: wall-clock time-of-day of the offset-shifted instant
//! - `DecimalTime`: the same moment expressed in a `TimeSystem`

use std::fmt;

/// Milliseconds in one 24-hour day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Seconds in one 24-hour day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Instant as milliseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Shift by whole hours. Wraps rather than overflowing so the
    /// shift is total over all inputs.
    #[inline]
    pub fn shifted_hours(self, hours: i64) -> Self {
        EpochMillis(self.0.wrapping_add(hours.wrapping_mul(3_600_000)))
    }

    /// Milliseconds elapsed since the start of this instant's UTC day
    #[inline]
    pub fn millis_of_day(self) -> i64 {
        self.0.rem_euclid(MILLIS_PER_DAY)
    }
}

impl fmt::Debug for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t({}ms)", self.0)
    }
}

/// Time-of-day components on a 24-hour clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ZoneParts {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl ZoneParts {
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        ZoneParts {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Split a millisecond-of-day value in [0, 86_400_000)
    pub fn from_millis_of_day(ms: i64) -> Self {
        let ms = ms.rem_euclid(MILLIS_PER_DAY);
        ZoneParts {
            hour: (ms / 3_600_000) as u32,
            minute: (ms / 60_000 % 60) as u32,
            second: (ms / 1000 % 60) as u32,
            millisecond: (ms % 1000) as u32,
        }
    }

    /// Seconds since midnight, with millisecond fraction
    pub fn total_seconds(&self) -> f64 {
        (self.hour * 3600 + self.minute * 60 + self.second) as f64
            + self.millisecond as f64 / 1000.0
    }
}

impl fmt::Display for ZoneParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// One moment expressed in a decimal time system.
/// Recomputed every frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DecimalTime {
    /// Fraction of the 24-hour cycle elapsed, in [0, 1)
    pub day_progress: f64,
    /// Subunits elapsed, fractional
    pub total_subunits: f64,
    /// Whole subunits elapsed, in [0, full cycle)
    pub whole_subunits: u32,
    pub hour: u32,
    pub unit: u32,
    pub subunit: u32,
}

impl DecimalTime {
    /// `HHh MMm SSs`, zero padded
    pub fn hms(&self) -> String {
        format!("{:02}h {:02}m {:02}s", self.hour, self.unit, self.subunit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_of_day_wraps_before_epoch() {
        assert_eq!(EpochMillis(-1).millis_of_day(), MILLIS_PER_DAY - 1);
        assert_eq!(EpochMillis(MILLIS_PER_DAY).millis_of_day(), 0);
    }

    #[test]
    fn test_zone_parts_split() {
        let parts = ZoneParts::from_millis_of_day(13 * 3_600_000 + 5 * 60_000 + 7_250);
        assert_eq!(parts, ZoneParts::new(13, 5, 7, 250));
        assert_eq!(parts.to_string(), "13:05:07");
        assert!((parts.total_seconds() - 47_107.25).abs() < 1e-9);
    }

    #[test]
    fn test_shift_is_total() {
        let t = EpochMillis(i64::MAX);
        // Must not panic
        let _ = t.shifted_hours(i64::MAX).millis_of_day();
    }

    #[test]
    fn test_hms_padding() {
        let t = DecimalTime {
            hour: 5,
            unit: 3,
            subunit: 9,
            ..Default::default()
        };
        assert_eq!(t.hms(), "05h 03m 09s");
    }
}
