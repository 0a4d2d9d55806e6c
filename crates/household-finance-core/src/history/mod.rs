//! Static reference data behind the US / Russia / Ukraine history browser.
//!
//! Nothing in the finance modules depends on this. The browser's widget state
//! lives with the caller as a [`territory::YearStepper`]; every function here
//! is a pure lookup over fixed tables.

pub mod territory;
pub mod treaties;
