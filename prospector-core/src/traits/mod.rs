//! Collaborator traits
//!
//! These traits define the interface between the display engine and the
//! board: backlight, light sensor, keyboard table and platform services.

pub mod backlight;
pub mod platform;
pub mod roster;
pub mod sensor;

pub use backlight::{clamp_brightness, Backlight, BacklightError, InvertedBacklight};
pub use platform::{Platform, RebootMode};
pub use roster::{KeyboardRoster, RosterEntry};
pub use sensor::{LightRange, LightSensor, NoSensor, SensorError};
