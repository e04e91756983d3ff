//! Fixed layer list and over-max numeral
//!
//! Layers below the configured maximum are shown as a row of numerals with
//! the active one highlighted. Anything at or above the maximum collapses
//! into a single numeral that slides in and out as the layer changes.

use prospector_display::Color;

/// Top of the layer row
pub const LAYER_Y: i16 = 105;
/// Distance between numeral origins
pub const LIST_SPACING: i16 = 25;
pub const LIST_LABEL_WIDTH: u16 = 22;
/// Inactive numeral color
pub const LIST_INACTIVE_COLOR: Color = Color::rgb(40, 40, 40);
/// Inactive numeral opacity (percent)
pub const LIST_INACTIVE_OPACITY: u8 = 30;
/// Distance the list travels when sliding back in
pub const LIST_SLIDE_IN_OFFSET: i16 = 50;
/// Distance the over-max numeral travels when sliding
pub const OVER_MAX_SLIDE: i16 = 40;

/// Most numerals the list ever shows
pub const MAX_LIST_LAYERS: u8 = 10;
pub const MIN_LIST_LAYERS: u8 = 4;

/// X of numeral `index` in a list of `count` numerals
pub fn list_label_x(index: u8, count: u8) -> i16 {
    let count = count.clamp(1, MAX_LIST_LAYERS) as i16;
    let start = 140 - ((count - 1) * LIST_SPACING / 2) - (LIST_LABEL_WIDTH / 2) as i16;
    start + index as i16 * LIST_SPACING
}

/// Horizontal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Signed distance towards this side
    pub fn offset(self, distance: i16) -> i16 {
        match self {
            Side::Left => -distance,
            Side::Right => distance,
        }
    }
}

/// How the fixed-mode display reacts to a layer change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixedChange {
    /// Restyle the list; pulse the active numeral if the layer moved
    Highlight { layer: u8, pulse: bool },
    /// List slides out left, over-max numeral slides in from the right
    EnterOverMax { layer: u8 },
    /// Over-max numeral slides out right, list slides in from the left
    LeaveOverMax { layer: u8 },
    /// Old numeral slides out towards `exit`, new one enters from the other side
    OverMaxStep { layer: u8, exit: Side },
    /// Over-max and unchanged
    Unchanged,
}

/// Decide the fixed-mode transition from `previous` to `layer`
///
/// `showing_over_max` is the mode currently on screen.
pub fn fixed_change(showing_over_max: bool, previous: u8, layer: u8, max_layers: u8) -> FixedChange {
    let over_max = layer >= max_layers;
    match (showing_over_max, over_max) {
        (false, true) => FixedChange::EnterOverMax { layer },
        (true, false) => FixedChange::LeaveOverMax { layer },
        (true, true) if layer != previous => FixedChange::OverMaxStep {
            layer,
            // Rising layers push the old numeral out to the left
            exit: if layer > previous { Side::Left } else { Side::Right },
        },
        (true, true) => FixedChange::Unchanged,
        (false, false) => FixedChange::Highlight {
            layer,
            pulse: layer != previous,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_geometry() {
        // Seven numerals centered on x = 140
        assert_eq!(list_label_x(0, 7), 140 - 75 - 11);
        assert_eq!(list_label_x(6, 7), 140 - 75 - 11 + 150);
        let first = list_label_x(0, 7) + 11;
        let last = list_label_x(6, 7) + 11;
        assert_eq!(first + last, 280);
    }

    #[test]
    fn test_enter_and_leave_over_max() {
        assert_eq!(
            fixed_change(false, 2, 9, 7),
            FixedChange::EnterOverMax { layer: 9 }
        );
        assert_eq!(
            fixed_change(true, 9, 3, 7),
            FixedChange::LeaveOverMax { layer: 3 }
        );
    }

    #[test]
    fn test_over_max_step_direction() {
        assert_eq!(
            fixed_change(true, 8, 9, 7),
            FixedChange::OverMaxStep {
                layer: 9,
                exit: Side::Left
            }
        );
        assert_eq!(
            fixed_change(true, 9, 8, 7),
            FixedChange::OverMaxStep {
                layer: 8,
                exit: Side::Right
            }
        );
        assert_eq!(fixed_change(true, 9, 9, 7), FixedChange::Unchanged);
    }

    #[test]
    fn test_highlight_pulse_only_on_change() {
        assert_eq!(
            fixed_change(false, 1, 2, 7),
            FixedChange::Highlight { layer: 2, pulse: true }
        );
        assert_eq!(
            fixed_change(false, 2, 2, 7),
            FixedChange::Highlight { layer: 2, pulse: false }
        );
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Layer equal to the maximum is already over-max
        assert_eq!(
            fixed_change(false, 6, 7, 7),
            FixedChange::EnterOverMax { layer: 7 }
        );
    }

    #[test]
    fn test_side_offset() {
        assert_eq!(Side::Left.offset(OVER_MAX_SLIDE), -40);
        assert_eq!(Side::Right.offset(OVER_MAX_SLIDE), 40);
    }
}
