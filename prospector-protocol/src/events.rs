//! Swipe gestures from the touch panel

/// Swipe direction reported by the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwipeDirection {
    /// Finger moved towards the top edge
    Up,
    /// Finger moved towards the bottom edge
    Down,
    /// Finger moved towards the left edge
    Left,
    /// Finger moved towards the right edge
    Right,
}

// Wire format values (touch controller gesture register)
const SWIPE_UP: u8 = 0x01;
const SWIPE_DOWN: u8 = 0x02;
const SWIPE_LEFT: u8 = 0x03;
const SWIPE_RIGHT: u8 = 0x04;

impl SwipeDirection {
    /// Parse a gesture from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SWIPE_UP => Some(SwipeDirection::Up),
            SWIPE_DOWN => Some(SwipeDirection::Down),
            SWIPE_LEFT => Some(SwipeDirection::Left),
            SWIPE_RIGHT => Some(SwipeDirection::Right),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            SwipeDirection::Up => SWIPE_UP,
            SwipeDirection::Down => SWIPE_DOWN,
            SwipeDirection::Left => SWIPE_LEFT,
            SwipeDirection::Right => SWIPE_RIGHT,
        }
    }

    /// Returns true for left/right swipes
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }

    /// The swipe that undoes this one
    pub fn opposite(self) -> Self {
        match self {
            SwipeDirection::Up => SwipeDirection::Down,
            SwipeDirection::Down => SwipeDirection::Up,
            SwipeDirection::Left => SwipeDirection::Right,
            SwipeDirection::Right => SwipeDirection::Left,
        }
    }
}
