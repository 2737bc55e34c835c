//! Decimal Clock Time - conversion from wall-clock instants to decimal time
//!
//! This crate implements the per-frame time pipeline:
//! - Wall clocks: system time, fixed time for tests and replays
//! - Zone parts: time-of-day of an instant shifted by a UTC offset
//! - Decimal conversion: zone parts expressed in a `TimeSystem`
//! - Hand fractions consumed by the renderer

pub mod clock;
pub mod convert;

pub use clock::*;
pub use convert::*;
