//! Screen state definition
//!
//! Exactly one screen is current at any time and owns every widget on the
//! surface.

use prospector_display::Color;
use prospector_protocol::SwipeDirection;

use super::events::{ChannelStep, Navigation};

/// Screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenState {
    /// Live keyboard status
    Main,
    /// Brightness, battery widget and layer display options
    DisplaySettings,
    /// Bootloader and reset actions
    SystemSettings,
    /// Pick which scanned keyboard to track
    KeyboardSelect,
    /// Territory simulation
    PongWars,
}

impl ScreenState {
    /// Background the surface is cleared to before building this screen
    pub fn background(&self) -> Color {
        match self {
            ScreenState::Main => Color::BLACK,
            ScreenState::DisplaySettings
            | ScreenState::SystemSettings
            | ScreenState::KeyboardSelect => Color::hex(0x0A0A0A),
            ScreenState::PongWars => Color::hex(0x1A1A2E),
        }
    }

    /// Check if this screen has touch controls
    pub fn needs_touch(&self) -> bool {
        !matches!(self, ScreenState::Main)
    }

    /// Check if mailbox snapshots are drained while this screen is current
    pub fn consumes_telemetry(&self) -> bool {
        matches!(self, ScreenState::Main)
    }

    /// Process a swipe and return what the UI loop should do
    pub fn on_swipe(self, direction: SwipeDirection) -> Navigation {
        use Navigation::*;
        use ScreenState::*;
        use SwipeDirection::*;

        match (self, direction) {
            // Main fans out in all four directions
            (Main, Down) => Goto(DisplaySettings),
            (Main, Up) => Goto(KeyboardSelect),
            (Main, Right) => Goto(SystemSettings),
            (Main, Left) => Goto(PongWars),

            // Each side screen returns with the opposite swipe
            (DisplaySettings, Up) => Goto(Main),
            (KeyboardSelect, Down) => Goto(Main),
            (SystemSettings, Left) => Goto(Main),
            (PongWars, Right) => Goto(Main),

            // Horizontal swipes on the picker step the channel filter
            (KeyboardSelect, Left) => Channel(ChannelStep::Previous),
            (KeyboardSelect, Right) => Channel(ChannelStep::Next),

            // Default: stay on the current screen
            _ => Stay,
        }
    }
}
