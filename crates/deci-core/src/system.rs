//! Time systems - how a 24-hour day is subdivided
//!
//! A time system splits the day into `hours_per_day` hours, each hour into
//! `units_per_hour` units and each unit into `subunits_per_unit` subunits.
//! The clock ships exactly one: the decimal 10/100/100 system, which divides
//! the day into 100,000 decimal seconds.

use crate::{Color, DeciError, DeciResult};

/// Immutable subdivision of the day
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSystem {
    name: &'static str,
    hours_per_day: u32,
    units_per_hour: u32,
    subunits_per_unit: u32,
    display_color: Color,
}

impl TimeSystem {
    /// Decimal time: 10 hours x 100 units x 100 subunits
    pub const DECIMAL: TimeSystem = TimeSystem {
        name: "Decimal (10/100/100)",
        hours_per_day: 10,
        units_per_hour: 100,
        subunits_per_unit: 100,
        display_color: Color::from_rgb8(0xFF, 0x6B, 0x6B),
    };

    /// Build a custom system. Every divisor must be non-zero and the full
    /// cycle must fit in a `u32`.
    pub fn new(
        name: &'static str,
        hours_per_day: u32,
        units_per_hour: u32,
        subunits_per_unit: u32,
        display_color: Color,
    ) -> DeciResult<Self> {
        if hours_per_day == 0 || units_per_hour == 0 || subunits_per_unit == 0 {
            return Err(DeciError::InvalidTimeSystem(format!(
                "{name}: divisions must be non-zero"
            )));
        }
        hours_per_day
            .checked_mul(units_per_hour)
            .and_then(|v| v.checked_mul(subunits_per_unit))
            .ok_or_else(|| DeciError::InvalidTimeSystem(format!("{name}: cycle overflows")))?;

        Ok(TimeSystem {
            name,
            hours_per_day,
            units_per_hour,
            subunits_per_unit,
            display_color,
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    #[inline]
    pub fn units_per_hour(&self) -> u32 {
        self.units_per_hour
    }

    #[inline]
    pub fn subunits_per_unit(&self) -> u32 {
        self.subunits_per_unit
    }

    #[inline]
    pub fn display_color(&self) -> Color {
        self.display_color
    }

    /// Subunits in one hour
    #[inline]
    pub fn subunits_per_hour(&self) -> u32 {
        self.units_per_hour * self.subunits_per_unit
    }

    /// Subunits in one day
    #[inline]
    pub fn full_cycle(&self) -> u32 {
        self.hours_per_day * self.subunits_per_hour()
    }

    /// Distance between major ticks on the face
    #[inline]
    pub fn major_tick_step(&self) -> u32 {
        (self.hours_per_day / 5).max(1)
    }

    /// Whether hour tick `index` is drawn as a major tick
    #[inline]
    pub fn is_major_tick(&self, index: u32) -> bool {
        index % self.major_tick_step() == 0
    }

    /// Text shown next to hour tick `index`; position zero shows the
    /// number of hours in the day
    pub fn hour_label(&self, index: u32) -> String {
        if index == 0 {
            self.hours_per_day.to_string()
        } else {
            index.to_string()
        }
    }
}

impl Default for TimeSystem {
    fn default() -> Self {
        Self::DECIMAL
    }
}
