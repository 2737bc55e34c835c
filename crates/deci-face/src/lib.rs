//! Decimal Clock Face - rendering of the decimal dial
//!
//! The renderer is pure presentation: given a `TimeSystem` and a
//! `DecimalTime` it draws one frame onto a `Surface` and formats the text
//! readouts. It never mutates clock state.
//!
//! Surfaces provided here:
//! - `DisplayList`: records draw operations
//! - `CellCanvas`: rasterizes into terminal character cells

pub mod cell;
pub mod dial;
pub mod display_list;
pub mod readout;
pub mod surface;

pub use cell::*;
pub use dial::*;
pub use display_list::*;
pub use readout::*;
pub use surface::*;
