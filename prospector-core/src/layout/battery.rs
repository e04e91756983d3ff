//! Keyboard battery row layout
//!
//! The row holds up to four slots anchored to the bottom center. Geometry is
//! a pure function of how many batteries report a level.

use prospector_protocol::MAX_BATTERIES;

/// Bar offset from the bottom edge
pub const BAR_Y: i16 = -33;
/// Percentage, name and "×" offset from the bottom edge
pub const LABEL_Y: i16 = -42;
pub const BAR_HEIGHT: u16 = 4;

const WIDTHS: [u16; MAX_BATTERIES] = [165, 110, 70, 52];

const OFFSETS: [[i16; MAX_BATTERIES]; MAX_BATTERIES] = [
    [0, 0, 0, 0],
    [-70, 70, 0, 0],
    [-90, 0, 90, 0],
    [-100, -35, 35, 100],
];

const NAMES: [[&str; MAX_BATTERIES]; MAX_BATTERIES] = [
    ["", "", "", ""],
    ["L", "R", "", ""],
    ["L", "R", "Aux", ""],
    ["L", "R", "A1", "A2"],
];

/// Geometry of one battery slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySlot {
    /// Horizontal offset of the bar center from the screen center
    pub x_offset: i16,
    pub width: u16,
    /// Side label, empty for a single battery
    pub name: &'static str,
}

impl BatterySlot {
    /// Name label sits at the bar's left edge
    pub fn name_x(&self) -> i16 {
        self.x_offset - (self.width / 2) as i16
    }
}

/// Layout for a given battery count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLayout {
    count: u8,
    slots: [BatterySlot; MAX_BATTERIES],
}

impl BatteryLayout {
    /// Compute the layout; counts outside 1-4 are clamped
    pub fn for_count(count: u8) -> Self {
        let count = count.clamp(1, MAX_BATTERIES as u8);
        let row = count as usize - 1;
        let width = WIDTHS[row];
        let slots = core::array::from_fn(|i| BatterySlot {
            x_offset: OFFSETS[row][i],
            width,
            name: NAMES[row][i],
        });
        Self { count, slots }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// All four slots; those at or beyond `count` are hidden
    pub fn slots(&self) -> &[BatterySlot; MAX_BATTERIES] {
        &self.slots
    }

    pub fn is_visible(&self, slot: usize) -> bool {
        slot < self.count as usize
    }
}

/// What one slot should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotState {
    /// Bar and percentage
    Level(u8),
    /// Red bar and "×"
    Disconnected,
    /// Nothing
    Hidden,
}

/// Result of feeding battery values to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryUpdate {
    /// New geometry, present only when the active count changed to a
    /// non-zero value
    pub relayout: Option<BatteryLayout>,
    pub slots: [SlotState; MAX_BATTERIES],
}

/// Tracks the active battery count so layout is recomputed only on change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryTracker {
    /// `None` until the first update or after `invalidate`
    count: Option<u8>,
    values: [u8; MAX_BATTERIES],
}

impl Default for BatteryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryTracker {
    pub const fn new() -> Self {
        Self {
            count: None,
            values: [0; MAX_BATTERIES],
        }
    }

    /// Force the next update to recompute layout
    pub fn invalidate(&mut self) {
        self.count = None;
    }

    pub fn count(&self) -> Option<u8> {
        self.count
    }

    pub fn values(&self) -> [u8; MAX_BATTERIES] {
        self.values
    }

    /// Feed new battery values
    pub fn update(&mut self, values: [u8; MAX_BATTERIES]) -> BatteryUpdate {
        self.values = values;
        let count = values.iter().filter(|v| **v > 0).count() as u8;

        let mut relayout = None;
        if self.count != Some(count) {
            self.count = Some(count);
            if count > 0 {
                relayout = Some(BatteryLayout::for_count(count));
            }
        }

        let slots = core::array::from_fn(|i| {
            if i >= count as usize {
                SlotState::Hidden
            } else if values[i] > 0 {
                SlotState::Level(values[i])
            } else {
                SlotState::Disconnected
            }
        });

        BatteryUpdate { relayout, slots }
    }
}
