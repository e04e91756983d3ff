//! Cross-context update relay
//!
//! Producer contexts (BLE scanner worker, fuel gauge, touch interrupt) talk to
//! the UI loop only through the primitives in this module:
//!
//! - three overwrite mailboxes, one per snapshot kind, so a burst of one kind
//!   never starves another
//! - a debounced gesture cell
//! - two flags: transition-in-progress and simulation-active
//!
//! `Relay::new` is `const`, so firmware holds a single `static`.

pub mod gesture;
pub mod mailbox;

use core::sync::atomic::{AtomicBool, Ordering};

use prospector_protocol::{BatterySnapshot, SignalSnapshot, SwipeDirection, TelemetrySnapshot};

pub use gesture::GestureCell;
pub use mailbox::Mailbox;

pub struct Relay {
    pub telemetry: Mailbox<TelemetrySnapshot>,
    pub signal: Mailbox<SignalSnapshot>,
    pub battery: Mailbox<BatterySnapshot>,
    pub gesture: GestureCell,
    transition_busy: AtomicBool,
    simulation_active: AtomicBool,
}

impl Relay {
    pub const fn new() -> Self {
        Self {
            telemetry: Mailbox::new(),
            signal: Mailbox::new(),
            battery: Mailbox::new(),
            gesture: GestureCell::new(),
            transition_busy: AtomicBool::new(false),
            simulation_active: AtomicBool::new(false),
        }
    }

    /// Producer entry: keyboard telemetry
    pub fn publish_telemetry(&self, snapshot: TelemetrySnapshot) {
        self.telemetry.post(snapshot);
    }

    /// Producer entry: link quality
    pub fn publish_signal(&self, snapshot: SignalSnapshot) {
        self.signal.post(snapshot);
    }

    /// Producer entry: scanner battery
    pub fn publish_battery(&self, snapshot: BatterySnapshot) {
        self.battery.post(snapshot);
    }

    /// Producer entry: swipe from the touch listener
    ///
    /// Returns `false` when a swipe was already pending.
    pub fn offer_swipe(&self, direction: SwipeDirection) -> bool {
        self.gesture.offer(direction)
    }

    /// A screen transition is tearing down or building widgets
    pub fn is_busy(&self) -> bool {
        self.transition_busy.load(Ordering::Acquire)
    }

    /// Mark a transition in progress until the guard is dropped
    ///
    /// Only the UI loop calls this; producers merely read the flag, so a
    /// plain load/store pair is sufficient.
    pub fn begin_transition(&self) -> BusyGuard<'_> {
        self.transition_busy.store(true, Ordering::Release);
        BusyGuard {
            flag: &self.transition_busy,
        }
    }

    /// Pong Wars owns the surface; producers may skip telemetry work
    pub fn is_simulation_active(&self) -> bool {
        self.simulation_active.load(Ordering::Acquire)
    }

    pub fn set_simulation_active(&self, active: bool) {
        self.simulation_active.store(active, Ordering::Release);
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the transition flag on every exit path
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RELAY: Relay = Relay::new();

    #[test]
    fn test_static_relay() {
        RELAY.publish_battery(BatterySnapshot::new(80));
        assert_eq!(RELAY.battery.take(), Some(BatterySnapshot::new(80)));
    }

    #[test]
    fn test_mailboxes_independent() {
        let relay = Relay::new();
        relay.publish_signal(SignalSnapshot::default());
        relay.publish_telemetry(TelemetrySnapshot::named("Corne"));
        assert!(relay.telemetry.is_pending());
        assert!(relay.signal.is_pending());
        assert!(!relay.battery.is_pending());

        relay.telemetry.take();
        assert!(relay.signal.is_pending());
    }

    #[test]
    fn test_busy_guard_clears_on_drop() {
        let relay = Relay::new();
        {
            let _guard = relay.begin_transition();
            assert!(relay.is_busy());
        }
        assert!(!relay.is_busy());
    }

    #[test]
    fn test_busy_guard_clears_on_early_return() {
        fn build(relay: &Relay, fail: bool) -> Result<(), ()> {
            let _guard = relay.begin_transition();
            if fail {
                return Err(());
            }
            Ok(())
        }

        let relay = Relay::new();
        assert!(build(&relay, true).is_err());
        assert!(!relay.is_busy());
    }

    #[test]
    fn test_simulation_flag() {
        let relay = Relay::new();
        relay.set_simulation_active(true);
        assert!(relay.is_simulation_active());
        relay.set_simulation_active(false);
        assert!(!relay.is_simulation_active());
    }

    #[test]
    fn test_offer_swipe_debounced() {
        let relay = Relay::new();
        assert!(relay.offer_swipe(SwipeDirection::Up));
        assert!(!relay.offer_swipe(SwipeDirection::Down));
    }
}
