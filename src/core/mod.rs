//! Engine services plus the clock and path helpers they depend on.

pub mod clock;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
