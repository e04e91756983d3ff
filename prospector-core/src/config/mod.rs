//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills them from the
//! embedded `scanner.toml`.

pub mod types;

pub use types::*;
