//! Layout allocators
//!
//! Pure geometry and palette functions used by the screens. Nothing in here
//! touches the surface.

pub mod battery;
pub mod color;
pub mod dial;
pub mod layers;

pub use battery::{BatteryLayout, BatterySlot, BatteryTracker, BatteryUpdate, SlotState};
pub use dial::{DialWindow, SlotStyle, DIAL_SLOTS};
pub use layers::{fixed_change, list_label_x, FixedChange, Side};
