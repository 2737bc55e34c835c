//! Decimal Clock Core - Fundamental types
//!
//! This crate defines the types shared by every other crate:
//! - Time systems (hours per day, units per hour, subunits per unit)
//! - UTC offsets (display-only hour shifts in [-12, 14])
//! - Decimal time breakdowns produced once per frame
//! - Colours and the common error type

pub mod color;
pub mod error;
pub mod offset;
pub mod system;
pub mod time;

pub use color::*;
pub use error::*;
pub use offset::*;
pub use system::*;
pub use time::*;
