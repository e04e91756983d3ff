//! Layer dial ("slide" mode)
//!
//! A nine-slot window over the integer layer sequence. Slots 2-6 form the
//! large zone; the outer two slots on each side shrink and fade. The active
//! layer is kept inside the large zone by moving the window as little as
//! possible. Slots before layer 0 are left empty.

use prospector_display::{Color, Font};

use super::layers::LAYER_Y;

pub const DIAL_SLOTS: usize = 9;
pub const LARGE_ZONE_START: i32 = 2;
pub const LARGE_ZONE_END: i32 = 6;
pub const SLOT_SPACING: i16 = 34;
/// Center of slot 0
pub const DIAL_START_X: i16 = 140 - 4 * SLOT_SPACING;
/// Inactive slot color
pub const DIAL_INACTIVE_COLOR: Color = Color::rgb(80, 80, 80);

/// Static presentation of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotStyle {
    pub font: Font,
    pub width: u16,
    /// Opacity when not active (percent)
    pub opacity: u8,
    /// Smaller fonts sit lower to share a baseline
    pub y_adjust: i16,
    /// Edge slots are nudged inwards
    pub x_adjust: i16,
}

/// Style of slot `index` (0-8)
pub fn slot_style(index: usize) -> SlotStyle {
    match index {
        0 | 8 => SlotStyle {
            font: Font::Montserrat16,
            width: 22,
            opacity: 20,
            y_adjust: 6,
            x_adjust: if index == 0 { 4 } else { -4 },
        },
        1 | 7 => SlotStyle {
            font: Font::Montserrat20,
            width: 28,
            opacity: 40,
            y_adjust: 4,
            x_adjust: 0,
        },
        _ => SlotStyle {
            font: Font::Montserrat28,
            width: 34,
            opacity: 70,
            y_adjust: 0,
            x_adjust: 0,
        },
    }
}

/// Top-left position of slot `index`
pub fn slot_position(index: usize) -> (i16, i16) {
    let style = slot_style(index);
    let x = DIAL_START_X + index as i16 * SLOT_SPACING - (style.width / 2) as i16 + style.x_adjust;
    (x, LAYER_Y + style.y_adjust)
}

/// Window position over the layer sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DialWindow {
    /// Layer shown in slot 0; may be negative
    start: i32,
}

impl DialWindow {
    /// Fresh window with `active` at the left edge of the large zone
    pub fn centered_on(active: u8) -> Self {
        Self {
            start: active as i32 - LARGE_ZONE_START,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    /// Layer number shown in a slot
    pub fn slot_layer(&self, index: usize) -> i32 {
        self.start + index as i32
    }

    /// Slot currently holding `layer`
    pub fn slot_of(&self, layer: u8) -> i32 {
        layer as i32 - self.start
    }

    /// Shift the window so `layer` is in the large zone
    ///
    /// Returns how many slots the window moved (positive = rightwards).
    pub fn follow(&mut self, layer: u8) -> i32 {
        let slot = self.slot_of(layer);
        let new_start = if slot < LARGE_ZONE_START {
            layer as i32 - LARGE_ZONE_START
        } else if slot > LARGE_ZONE_END {
            layer as i32 - LARGE_ZONE_END
        } else {
            self.start
        };
        let moved = new_start - self.start;
        self.start = new_start;
        moved
    }
}

/// Grow the dial's color range to fit `layer`
///
/// Returns the new maximum.
pub fn grow_max(max_layer: u8, layer: u8) -> u8 {
    if layer >= max_layer {
        layer.saturating_add(1)
    } else {
        max_layer
    }
}
