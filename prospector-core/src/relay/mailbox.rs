//! Single-slot overwrite mailbox
//!
//! Producers never block: `post` replaces whatever is waiting. The consumer
//! takes the whole value out in one critical section, so it never sees half
//! of one snapshot and half of another.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Latest-value-wins slot shared between a producer context and the UI loop
pub struct Mailbox<T> {
    slot: Signal<CriticalSectionRawMutex, T>,
}

impl<T: Send> Mailbox<T> {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Store a value, dropping any unread one
    pub fn post(&self, value: T) {
        self.slot.signal(value);
    }

    /// Move the pending value out, leaving the slot empty
    pub fn take(&self) -> Option<T> {
        self.slot.try_take()
    }

    /// Check for an unread value without consuming it
    pub fn is_pending(&self) -> bool {
        self.slot.signaled()
    }
}

impl<T: Send> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use prospector_protocol::SignalSnapshot;

    #[test]
    fn test_empty_mailbox() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_take_clears() {
        let mailbox = Mailbox::new();
        mailbox.post(7u32);
        assert!(mailbox.is_pending());
        assert_eq!(mailbox.take(), Some(7));
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_post_overwrites_unread() {
        let mailbox = Mailbox::new();
        mailbox.post(SignalSnapshot { rssi: -80, rate_x100: 100 });
        mailbox.post(SignalSnapshot { rssi: -55, rate_x100: 1234 });
        assert_eq!(
            mailbox.take(),
            Some(SignalSnapshot { rssi: -55, rate_x100: 1234 })
        );
    }

    proptest! {
        /// The consumer only ever sees the most recent complete write.
        #[test]
        fn latest_write_wins(writes in proptest::collection::vec((any::<i8>(), any::<i32>()), 1..32)) {
            let mailbox = Mailbox::new();
            for (rssi, rate_x100) in &writes {
                mailbox.post(SignalSnapshot { rssi: *rssi, rate_x100: *rate_x100 });
            }
            let (rssi, rate_x100) = writes[writes.len() - 1];
            prop_assert_eq!(mailbox.take(), Some(SignalSnapshot { rssi, rate_x100 }));
            prop_assert_eq!(mailbox.take(), None);
        }

        /// Interleaved takes observe each value at most once.
        #[test]
        fn interleaved_takes(ops in proptest::collection::vec(proptest::option::of(any::<u16>()), 0..64)) {
            let mailbox = Mailbox::new();
            let mut expected = None;
            for op in ops {
                match op {
                    Some(value) => {
                        mailbox.post(value);
                        expected = Some(value);
                    }
                    None => {
                        prop_assert_eq!(mailbox.take(), expected.take());
                    }
                }
            }
        }
    }
}
