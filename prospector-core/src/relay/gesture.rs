//! Debounced swipe cell
//!
//! Holds at most one pending swipe. A swipe arriving while one is pending is
//! dropped, never queued. Uses a critical section rather than atomics so it
//! also works on cores without compare-and-swap.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use prospector_protocol::SwipeDirection;

pub struct GestureCell {
    pending: Mutex<CriticalSectionRawMutex, Cell<Option<SwipeDirection>>>,
}

impl GestureCell {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Store a swipe if the cell is empty
    ///
    /// Returns `false` when the swipe was coalesced into the pending one.
    pub fn offer(&self, direction: SwipeDirection) -> bool {
        self.pending.lock(|cell| {
            if cell.get().is_some() {
                false
            } else {
                cell.set(Some(direction));
                true
            }
        })
    }

    /// Read and clear the pending swipe
    pub fn take(&self) -> Option<SwipeDirection> {
        self.pending.lock(|cell| cell.take())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock(|cell| cell.get().is_some())
    }
}

impl Default for GestureCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_offer_when_empty() {
        let cell = GestureCell::new();
        assert!(cell.offer(SwipeDirection::Down));
        assert!(cell.is_pending());
        assert_eq!(cell.take(), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_second_offer_dropped() {
        let cell = GestureCell::new();
        assert!(cell.offer(SwipeDirection::Left));
        assert!(!cell.offer(SwipeDirection::Right));
        assert_eq!(cell.take(), Some(SwipeDirection::Left));
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn test_take_allows_next_offer() {
        let cell = GestureCell::new();
        cell.offer(SwipeDirection::Up);
        cell.take();
        assert!(cell.offer(SwipeDirection::Down));
        assert_eq!(cell.take(), Some(SwipeDirection::Down));
    }

    fn direction() -> impl Strategy<Value = SwipeDirection> {
        prop_oneof![
            Just(SwipeDirection::Up),
            Just(SwipeDirection::Down),
            Just(SwipeDirection::Left),
            Just(SwipeDirection::Right),
        ]
    }

    proptest! {
        /// Between two takes only the first offered swipe survives.
        #[test]
        fn first_offer_wins(burst in proptest::collection::vec(direction(), 1..16)) {
            let cell = GestureCell::new();
            let accepted = burst.iter().filter(|d| cell.offer(**d)).count();
            prop_assert_eq!(accepted, 1);
            prop_assert_eq!(cell.take(), Some(burst[0]));
            prop_assert_eq!(cell.take(), None);
        }
    }
}
