#![no_main]

use arbitrary::Arbitrary;
use deci_core::{parse_leading_int, EpochMillis, TimeSystem, UtcOffset};
use deci_time::DecimalConverter;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct EntryInput<'a> {
    typed: &'a str,
    stored: &'a str,
    instant: i64,
}

fuzz_target!(|input: EntryInput<'_>| {
    // Manual entry: any text either parses to an integer or is ignored
    if let Some(value) = parse_leading_int(input.typed) {
        match UtcOffset::new(value) {
            Ok(offset) => assert!(UtcOffset::RANGE.contains(&offset.hours())),
            Err(_) => assert!(!(-12..=14).contains(&value)),
        }
    }

    // Stored preference: anything accepted is in range and round-trips
    if let Some(offset) = UtcOffset::from_stored(input.stored) {
        assert_eq!(UtcOffset::from_stored(&offset.to_stored()), Some(offset));

        let converter = DecimalConverter::new(TimeSystem::DECIMAL);
        let time = converter.convert(EpochMillis(input.instant), offset);
        assert!(time.whole_subunits < TimeSystem::DECIMAL.full_cycle());
        assert!((0.0..1.0).contains(&time.day_progress));
    }
});
