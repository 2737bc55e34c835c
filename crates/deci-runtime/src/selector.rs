//! Offset selector - owns the user's UTC offset and its persistence
//!
//! Every entry path (slider, manual entry, zone list) goes through the same
//! [-12, 14] bound check. Accepted changes are persisted immediately; a
//! storage failure is logged and never blocks the change.

use std::sync::Arc;

use deci_core::{parse_leading_int, DeciError, DeciResult, UtcOffset};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::PreferenceStore;

/// Message shown when manual entry is numeric but out of range
pub const REJECTION_NOTICE: &str = "Enter a number from -12 to +14";

/// Result of a manual entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Offset changed (or re-confirmed)
    Accepted(UtcOffset),
    /// Numeric but out of range; nothing changed
    Rejected { value: i64, notice: &'static str },
    /// Cancelled or not a number; nothing changed, nothing shown
    Ignored,
}

/// One option of the mirrored zone list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOption {
    pub offset: UtcOffset,
    /// Option value as submitted by the list (`"-12"` .. `"14"`)
    pub value: String,
    pub label: String,
}

/// Selector shared between input handlers (writer) and the frame loop
/// (reader)
pub type SharedSelector<S> = Arc<Mutex<OffsetSelector<S>>>;

/// Holder of the single mutable piece of clock state
pub struct OffsetSelector<S: PreferenceStore> {
    offset: UtcOffset,
    store: S,
    key: String,
    published: watch::Sender<UtcOffset>,
    saved: bool,
}

impl<S: PreferenceStore> OffsetSelector<S> {
    /// Startup resolution: a valid stored value wins, then the detected
    /// environment offset if in range, then UTC.
    pub fn init(store: S, key: &str, detected_hours: i64) -> Self {
        let mut offset = UtcOffset::from_detected(detected_hours);
        let mut saved = false;

        match store.get(key) {
            Ok(Some(text)) => match UtcOffset::from_stored(&text) {
                Some(stored) => {
                    offset = stored;
                    saved = true;
                }
                None => tracing::debug!(stored = %text, "ignoring invalid stored offset"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "could not read stored offset"),
        }

        tracing::info!(%offset, detected_hours, "offset selector ready");
        OffsetSelector {
            offset,
            store,
            key: key.to_string(),
            published: watch::channel(offset).0,
            saved,
        }
    }

    pub fn shared(self) -> SharedSelector<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Receiver of every accepted offset. Readers never contend with the
    /// selector lock or with preference writes.
    pub fn subscribe(&self) -> watch::Receiver<UtcOffset> {
        self.published.subscribe()
    }

    /// Whether the current offset is the one held by the store
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Display label, e.g. `UTC+3`
    pub fn label(&self) -> String {
        self.offset.to_string()
    }

    /// Slider position; always mirrors the offset
    pub fn slider_value(&self) -> i32 {
        self.offset.hours()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Slider moved to `value`
    pub fn on_slider(&mut self, value: i64) -> DeciResult<UtcOffset> {
        let offset = UtcOffset::new(value)?;
        self.apply(offset);
        Ok(offset)
    }

    /// Nudge the slider by one step, saturating at the range ends
    pub fn step(&mut self, up: bool) -> UtcOffset {
        let offset = if up {
            self.offset.step_up()
        } else {
            self.offset.step_down()
        };
        self.apply(offset);
        offset
    }

    /// Manual entry. `None` means the entry was cancelled.
    pub fn on_manual_entry(&mut self, input: Option<&str>) -> EntryOutcome {
        let Some(value) = input.and_then(parse_leading_int) else {
            return EntryOutcome::Ignored;
        };

        match UtcOffset::new(value) {
            Ok(offset) => {
                self.apply(offset);
                EntryOutcome::Accepted(offset)
            }
            Err(_) => {
                tracing::debug!(value, "rejected manual offset entry");
                EntryOutcome::Rejected {
                    value,
                    notice: REJECTION_NOTICE,
                }
            }
        }
    }

    /// Every option of the mirrored zone list
    pub fn zone_options() -> Vec<ZoneOption> {
        UtcOffset::all()
            .map(|offset| ZoneOption {
                offset,
                value: offset.to_stored(),
                label: offset.to_string(),
            })
            .collect()
    }

    /// Index of the current offset in `zone_options()`
    pub fn selected_option(&self) -> usize {
        (self.offset.hours() - UtcOffset::MIN_HOURS) as usize
    }

    /// Zone list changed to the option carrying `value`
    pub fn select_zone(&mut self, value: &str) -> DeciResult<UtcOffset> {
        let hours = value
            .trim()
            .parse::<i64>()
            .map_err(|_| DeciError::UnknownZone(value.to_string()))?;
        self.on_slider(hours)
    }

    fn apply(&mut self, offset: UtcOffset) {
        if offset != self.offset {
            tracing::debug!(from = %self.offset, to = %offset, "offset changed");
        }
        self.offset = offset;
        self.published.send_replace(offset);

        self.saved = match self.store.set(&self.key, &offset.to_stored()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, %offset, "could not persist offset");
                false
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, OFFSET_KEY};
    use proptest::prelude::*;

    fn selector() -> OffsetSelector<MemoryStore> {
        OffsetSelector::init(MemoryStore::new(), OFFSET_KEY, 0)
    }

    fn stored(sel: &OffsetSelector<MemoryStore>) -> Option<String> {
        sel.store().get(OFFSET_KEY).unwrap()
    }

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> DeciResult<Option<String>> {
            Err(DeciError::Storage("unavailable".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> DeciResult<()> {
            Err(DeciError::Storage("unavailable".into()))
        }
    }

    #[test]
    fn test_startup_prefers_stored_value() {
        let store = MemoryStore::with_entry(OFFSET_KEY, "-4");
        let sel = OffsetSelector::init(store, OFFSET_KEY, 7);
        assert_eq!(sel.offset().hours(), -4);
    }

    #[test]
    fn test_startup_uses_detected_offset() {
        let sel = OffsetSelector::init(MemoryStore::new(), OFFSET_KEY, 7);
        assert_eq!(sel.offset().hours(), 7);
        assert_eq!(sel.label(), "UTC+7");

        // Out of range detection falls back to UTC
        let sel = OffsetSelector::init(MemoryStore::new(), OFFSET_KEY, -20);
        assert_eq!(sel.offset(), UtcOffset::UTC);
    }

    #[test]
    fn test_startup_ignores_invalid_stored_value() {
        for bad in ["abc", "15", "-13", ""] {
            let store = MemoryStore::with_entry(OFFSET_KEY, bad);
            let sel = OffsetSelector::init(store, OFFSET_KEY, 2);
            assert_eq!(sel.offset().hours(), 2, "stored {bad:?}");
        }
    }

    #[test]
    fn test_startup_survives_broken_store() {
        let sel = OffsetSelector::init(BrokenStore, OFFSET_KEY, 5);
        assert_eq!(sel.offset().hours(), 5);
    }

    #[test]
    fn test_slider_persists() {
        let mut sel = selector();
        assert_eq!(sel.on_slider(3).unwrap().hours(), 3);
        assert_eq!(sel.slider_value(), 3);
        assert_eq!(stored(&sel).as_deref(), Some("3"));
    }

    #[test]
    fn test_slider_bound_check() {
        let mut sel = selector();
        sel.on_slider(1).unwrap();
        assert!(matches!(sel.on_slider(15), Err(DeciError::OffsetOutOfRange(15))));
        assert_eq!(sel.offset().hours(), 1);
        assert_eq!(stored(&sel).as_deref(), Some("1"));
    }

    #[test]
    fn test_manual_entry_boundaries() {
        let mut sel = selector();

        assert_eq!(
            sel.on_manual_entry(Some("14")),
            EntryOutcome::Accepted(UtcOffset::new(14).unwrap())
        );
        assert_eq!(
            sel.on_manual_entry(Some("15")),
            EntryOutcome::Rejected {
                value: 15,
                notice: REJECTION_NOTICE
            }
        );
        assert_eq!(sel.offset().hours(), 14);

        assert_eq!(
            sel.on_manual_entry(Some("-12")),
            EntryOutcome::Accepted(UtcOffset::new(-12).unwrap())
        );
        assert!(matches!(
            sel.on_manual_entry(Some("-13")),
            EntryOutcome::Rejected { value: -13, .. }
        ));
        assert_eq!(sel.offset().hours(), -12);
        assert_eq!(sel.slider_value(), -12);
        assert_eq!(stored(&sel).as_deref(), Some("-12"));
    }

    #[test]
    fn test_manual_entry_ignores_non_numeric() {
        let mut sel = selector();
        sel.on_slider(6).unwrap();

        assert_eq!(sel.on_manual_entry(None), EntryOutcome::Ignored);
        assert_eq!(sel.on_manual_entry(Some("")), EntryOutcome::Ignored);
        assert_eq!(sel.on_manual_entry(Some("east")), EntryOutcome::Ignored);
        assert_eq!(sel.offset().hours(), 6);
    }

    #[test]
    fn test_manual_entry_leading_integer() {
        let mut sel = selector();
        assert_eq!(
            sel.on_manual_entry(Some(" 8 hours")),
            EntryOutcome::Accepted(UtcOffset::new(8).unwrap())
        );
    }

    #[test]
    fn test_step_saturates() {
        let mut sel = selector();
        sel.on_slider(14).unwrap();
        assert_eq!(sel.step(true).hours(), 14);
        assert_eq!(sel.step(false).hours(), 13);
    }

    #[test]
    fn test_zone_list_mirrors_slider() {
        let options = OffsetSelector::<MemoryStore>::zone_options();
        assert_eq!(options.len(), 27);
        assert_eq!(options[0].label, "UTC-12");
        assert_eq!(options[12].label, "UTC+0");
        assert_eq!(options[26].value, "14");

        let mut sel = selector();
        sel.select_zone("-3").unwrap();
        assert_eq!(sel.offset().hours(), -3);
        assert_eq!(options[sel.selected_option()].offset, sel.offset());

        assert!(sel.select_zone("UTC").is_err());
        assert!(sel.select_zone("20").is_err());
        assert_eq!(sel.offset().hours(), -3);
    }

    #[test]
    fn test_change_survives_broken_store() {
        let mut sel = OffsetSelector::init(BrokenStore, OFFSET_KEY, 0);
        assert_eq!(sel.on_slider(-2).unwrap().hours(), -2);
        assert_eq!(sel.offset().hours(), -2);
        assert!(!sel.is_saved());
    }

    #[test]
    fn test_saved_tracks_last_write() {
        let sel = selector();
        assert!(!sel.is_saved());

        let mut sel = OffsetSelector::init(MemoryStore::with_entry(OFFSET_KEY, "4"), OFFSET_KEY, 0);
        assert!(sel.is_saved());
        sel.step(true);
        assert!(sel.is_saved());
        assert_eq!(stored(&sel).as_deref(), Some("5"));
    }

    #[test]
    fn test_subscribers_see_accepted_offsets() {
        let mut sel = selector();
        let rx = sel.subscribe();
        assert_eq!(*rx.borrow(), UtcOffset::UTC);

        sel.on_slider(9).unwrap();
        assert_eq!(rx.borrow().hours(), 9);

        sel.on_manual_entry(Some("15"));
        assert_eq!(rx.borrow().hours(), 9);
    }

    proptest! {
        #[test]
        fn persisted_value_reads_back(n in -12i64..=14) {
            let mut sel = selector();
            sel.on_slider(n).unwrap();

            let reloaded = OffsetSelector::init(sel.store().clone(), OFFSET_KEY, 0);
            prop_assert_eq!(reloaded.offset().hours() as i64, n);
        }
    }
}
