//! Screen state machine
//!
//! Navigation is an explicit, finite and deterministic function of the
//! current screen and a swipe direction.

pub mod channel;
pub mod events;
pub mod machine;

pub use channel::ChannelFilter;
pub use events::{ChannelStep, Navigation};
pub use machine::ScreenState;
