//! Configuration types
//!
//! Board-agnostic configuration structures. With the `serde` feature they
//! deserialize from TOML (or any serde format); missing keys fall back to
//! the defaults.

pub mod board;
pub mod timing;

pub use board::*;
pub use timing::*;
