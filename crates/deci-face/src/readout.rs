//! Text readouts shown beside the dial
//!
//! Three readouts are produced per frame: the real wall-clock time, the
//! decimal time and the day progress. Targets may omit any of them; a
//! missing target is skipped, never an error.

use deci_core::{DecimalTime, ZoneParts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutSlot {
    /// Local 24-hour wall-clock time
    WallClock,
    /// Decimal `HHh MMm SSs`
    Decimal,
    /// Day progress percentage
    Progress,
}

impl ReadoutSlot {
    pub const ALL: [ReadoutSlot; 3] = [
        ReadoutSlot::WallClock,
        ReadoutSlot::Decimal,
        ReadoutSlot::Progress,
    ];
}

/// Formatted readouts for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readouts {
    pub wall_clock: String,
    pub decimal: String,
    pub progress: String,
}

impl Readouts {
    pub fn new(wall_clock: &ZoneParts, time: &DecimalTime) -> Self {
        Readouts {
            wall_clock: wall_clock.to_string(),
            decimal: time.hms(),
            progress: format_progress(time.day_progress),
        }
    }

    pub fn get(&self, slot: ReadoutSlot) -> &str {
        match slot {
            ReadoutSlot::WallClock => &self.wall_clock,
            ReadoutSlot::Decimal => &self.decimal,
            ReadoutSlot::Progress => &self.progress,
        }
    }

    /// Write every readout into `target`. Returns how many slots were
    /// present.
    pub fn apply(&self, target: &mut dyn ReadoutTarget) -> usize {
        let mut written = 0;
        for slot in ReadoutSlot::ALL {
            if let Some(text) = target.slot_mut(slot) {
                text.clear();
                text.push_str(self.get(slot));
                written += 1;
            }
        }
        written
    }
}

/// Day progress as a percentage with four decimals and a comma separator,
/// integer part padded to two digits: `0.5` -> `50,0000%`
pub fn format_progress(day_progress: f64) -> String {
    let pct = format!("{:.4}", day_progress * 100.0);
    match pct.split_once('.') {
        Some((whole, frac)) => format!("{whole:0>2},{frac}%"),
        None => format!("{pct:0>2}%"),
    }
}

/// Something holding readout text elements
pub trait ReadoutTarget {
    /// Text element for `slot`, if this target has one
    fn slot_mut(&mut self, slot: ReadoutSlot) -> Option<&mut String>;
}

/// Readout elements with optional slots
#[derive(Debug, Clone, Default)]
pub struct ReadoutBoard {
    wall_clock: Option<String>,
    decimal: Option<String>,
    progress: Option<String>,
}

impl ReadoutBoard {
    /// Board with every slot present
    pub fn full() -> Self {
        Self::with_slots(&ReadoutSlot::ALL)
    }

    pub fn with_slots(slots: &[ReadoutSlot]) -> Self {
        let mut board = ReadoutBoard::default();
        for slot in slots {
            *board.entry(*slot) = Some(String::new());
        }
        board
    }

    pub fn text(&self, slot: ReadoutSlot) -> Option<&str> {
        match slot {
            ReadoutSlot::WallClock => self.wall_clock.as_deref(),
            ReadoutSlot::Decimal => self.decimal.as_deref(),
            ReadoutSlot::Progress => self.progress.as_deref(),
        }
    }

    fn entry(&mut self, slot: ReadoutSlot) -> &mut Option<String> {
        match slot {
            ReadoutSlot::WallClock => &mut self.wall_clock,
            ReadoutSlot::Decimal => &mut self.decimal,
            ReadoutSlot::Progress => &mut self.progress,
        }
    }
}

impl ReadoutTarget for ReadoutBoard {
    fn slot_mut(&mut self, slot: ReadoutSlot) -> Option<&mut String> {
        self.entry(slot).as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midday() -> DecimalTime {
        DecimalTime {
            day_progress: 0.5,
            total_subunits: 50_000.0,
            whole_subunits: 50_000,
            hour: 5,
            unit: 0,
            subunit: 0,
        }
    }

    #[test]
    fn test_progress_format() {
        assert_eq!(format_progress(0.0), "00,0000%");
        assert_eq!(format_progress(0.5), "50,0000%");
        assert_eq!(format_progress(0.012345), "01,2345%");
        assert_eq!(format_progress(0.99999), "99,9990%");
    }

    #[test]
    fn test_readouts() {
        let r = Readouts::new(&ZoneParts::new(12, 0, 0, 0), &midday());
        assert_eq!(r.wall_clock, "12:00:00");
        assert_eq!(r.decimal, "05h 00m 00s");
        assert_eq!(r.progress, "50,0000%");
    }

    #[test]
    fn test_missing_slots_are_skipped() {
        let r = Readouts::new(&ZoneParts::new(8, 30, 5, 0), &midday());

        let mut partial = ReadoutBoard::with_slots(&[ReadoutSlot::Decimal]);
        assert_eq!(r.apply(&mut partial), 1);
        assert_eq!(partial.text(ReadoutSlot::Decimal), Some("05h 00m 00s"));
        assert_eq!(partial.text(ReadoutSlot::WallClock), None);

        let mut empty = ReadoutBoard::default();
        assert_eq!(r.apply(&mut empty), 0);

        let mut full = ReadoutBoard::full();
        assert_eq!(r.apply(&mut full), 3);
        assert_eq!(full.text(ReadoutSlot::WallClock), Some("08:30:05"));
    }
}
