//! Decimal time conversion
//!
//! instant --(shift by offset)--> zone parts --(system)--> decimal time
//!
//! Only the time-of-day of the shifted instant matters. The shift wraps at
//! the 24h boundaries of the shifted clock, so an offset of 24 hours aliases
//! to zero and no calendar arithmetic is involved.

use std::f64::consts::TAU;

use deci_core::{DecimalTime, EpochMillis, TimeSystem, UtcOffset, ZoneParts, SECONDS_PER_DAY};

/// Time-of-day of `instant` shifted by `offset_hours`, read as UTC.
/// Total over every offset, including values outside the UI range.
pub fn zone_local_parts(instant: EpochMillis, offset_hours: i64) -> ZoneParts {
    ZoneParts::from_millis_of_day(instant.shifted_hours(offset_hours).millis_of_day())
}

/// Express a time-of-day in `system`
pub fn decimal_from_parts(parts: &ZoneParts, system: &TimeSystem) -> DecimalTime {
    let full_cycle = system.full_cycle();
    let per_hour = system.subunits_per_hour();
    let per_unit = system.subunits_per_unit();

    let day_progress = parts.total_seconds() / SECONDS_PER_DAY;
    let total_subunits = day_progress * full_cycle as f64;
    let whole_subunits = (total_subunits.floor() as u64 % full_cycle as u64) as u32;

    let remainder = whole_subunits % per_hour;
    DecimalTime {
        day_progress,
        total_subunits,
        whole_subunits,
        hour: whole_subunits / per_hour,
        unit: remainder / per_unit,
        subunit: remainder % per_unit,
    }
}

/// Fraction of each hand's cycle that has elapsed, each in [0, 1)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HandFractions {
    /// Fraction of the day
    pub hour: f64,
    /// Fraction of the current hour
    pub unit: f64,
    /// Fraction of the current unit
    pub subunit: f64,
}

impl HandFractions {
    pub fn new(time: &DecimalTime, system: &TimeSystem) -> Self {
        let total = time.total_subunits;
        let per_hour = system.subunits_per_hour() as f64;
        let per_unit = system.subunits_per_unit() as f64;

        HandFractions {
            hour: total / system.full_cycle() as f64,
            unit: (total % per_hour) / per_unit / system.units_per_hour() as f64,
            subunit: (total % per_unit) / per_unit,
        }
    }

    /// Clockwise rotation from 12 o'clock, in radians
    pub fn angles(&self) -> [f64; 3] {
        [self.hour * TAU, self.unit * TAU, self.subunit * TAU]
    }
}

/// Converter bound to one time system
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimalConverter {
    system: TimeSystem,
}

impl DecimalConverter {
    pub fn new(system: TimeSystem) -> Self {
        DecimalConverter { system }
    }

    pub fn system(&self) -> &TimeSystem {
        &self.system
    }

    /// Convert an instant with a raw hour offset
    pub fn convert_hours(&self, instant: EpochMillis, offset_hours: i64) -> DecimalTime {
        decimal_from_parts(&zone_local_parts(instant, offset_hours), &self.system)
    }

    /// Convert an instant with a validated offset
    pub fn convert(&self, instant: EpochMillis, offset: UtcOffset) -> DecimalTime {
        self.convert_hours(instant, offset.hours() as i64)
    }

    pub fn hands(&self, time: &DecimalTime) -> HandFractions {
        HandFractions::new(time, &self.system)
    }
}
