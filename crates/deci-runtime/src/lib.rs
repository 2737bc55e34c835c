//! Decimal Clock Runtime - offset selection and the frame loop
//!
//! This crate wires the clock together:
//! 1. Load configuration and install logging
//! 2. Resolve the starting offset (stored preference, detected, UTC)
//! 3. Accept offset changes from the slider, manual entry and zone list
//! 4. Persist every accepted change
//! 5. Read clock, convert, draw, repeat

pub mod config;
pub mod frame;
pub mod logging;
pub mod preference;
pub mod selector;

pub use config::*;
pub use frame::*;
pub use logging::*;
pub use preference::*;
pub use selector::*;

use deci_core::DeciResult;
use deci_time::detect_local_offset_hours;

/// Open the configured preference file and resolve the starting offset
pub fn open_selector(config: &ClockConfig) -> DeciResult<SharedSelector<JsonFileStore>> {
    let store = JsonFileStore::open(&config.preference_path)?;
    let selector = OffsetSelector::init(store, &config.preference_key, detect_local_offset_hours());
    Ok(selector.shared())
}
