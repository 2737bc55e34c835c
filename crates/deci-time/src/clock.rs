//! Wall-clock sources
//!
//! The renderer reads the clock once per frame. `SystemClock` reads the OS
//! real-time clock; `FixedClock` holds a settable instant so tests and
//! replays can drive frames deterministically.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone, Timelike};
use deci_core::{EpochMillis, ZoneParts};

/// Read-only source of the current instant
pub trait WallClock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now(&self) -> EpochMillis;
}

/// OS real-time clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> EpochMillis {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => EpochMillis(d.as_millis() as i64),
            // Clock set before 1970
            Err(e) => EpochMillis(-(e.duration().as_millis() as i64)),
        }
    }
}

/// Settable clock
#[derive(Debug, Default)]
pub struct FixedClock {
    value: AtomicI64,
}

impl FixedClock {
    pub fn new(at: EpochMillis) -> Self {
        FixedClock {
            value: AtomicI64::new(at.as_millis()),
        }
    }

    pub fn set(&self, at: EpochMillis) {
        self.value.store(at.as_millis(), Ordering::Relaxed);
    }

    /// Move the clock forward (or backward for negative values)
    pub fn advance_millis(&self, millis: i64) {
        self.value.fetch_add(millis, Ordering::Relaxed);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> EpochMillis {
        EpochMillis(self.value.load(Ordering::Relaxed))
    }
}

/// Whole-hour UTC offset of the host's local zone, truncated toward zero
/// (a +5:30 zone reports 5). The caller decides whether it is usable.
pub fn detect_local_offset_hours() -> i64 {
    let seconds = Local::now().offset().local_minus_utc() as i64;
    seconds / 3600
}

/// Time-of-day of `instant` in the host's local zone.
/// Falls back to UTC when the local zone cannot map the instant.
pub fn local_time_of_day(instant: EpochMillis) -> ZoneParts {
    match Local.timestamp_millis_opt(instant.as_millis()).earliest() {
        Some(dt) => ZoneParts::new(
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_millis().min(999),
        ),
        None => {
            tracing::debug!(?instant, "local zone cannot represent instant, using UTC");
            ZoneParts::from_millis_of_day(instant.millis_of_day())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock::new().now() > EpochMillis(1_577_836_800_000));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(EpochMillis(1_000));
        assert_eq!(clock.now(), EpochMillis(1_000));

        clock.advance_millis(500);
        assert_eq!(clock.now(), EpochMillis(1_500));

        clock.set(EpochMillis(42));
        assert_eq!(clock.now(), EpochMillis(42));
    }

    #[test]
    fn test_detected_offset_is_plausible() {
        let h = detect_local_offset_hours();
        assert!((-24..=24).contains(&h));
    }

    #[test]
    fn test_local_time_of_day_in_range() {
        let parts = local_time_of_day(EpochMillis(1_700_000_000_123));
        assert!(parts.hour < 24);
        assert!(parts.minute < 60);
        assert!(parts.second < 60);
        assert_eq!(parts.millisecond, 123);
    }
}
