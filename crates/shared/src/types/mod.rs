//! Common value types shared across crates.

pub mod amount;

pub use amount::{MAX_SCALE, is_valid_scale};
