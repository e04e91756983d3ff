//! Cross-transition display cache
//!
//! The last values drained from the mailboxes. Main is rebuilt from here on
//! every return, so nothing waits for the next snapshot.

use heapless::String;
use prospector_protocol::{BatterySnapshot, SignalSnapshot, TelemetrySnapshot, MAX_NAME_LEN};

/// How a telemetry snapshot relates to the cached one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryChange {
    /// Every keyboard timed out; the cache went back to "Scanning..."
    Reset,
    /// A different keyboard is being tracked
    KeyboardChanged,
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct DisplayCache {
    telemetry: TelemetrySnapshot,
    signal: SignalSnapshot,
    scanner_battery: Option<BatterySnapshot>,
    last_keyboard: String<MAX_NAME_LEN>,
}

impl DisplayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a telemetry snapshot
    pub fn apply_telemetry(&mut self, snapshot: TelemetrySnapshot) -> TelemetryChange {
        if snapshot.no_keyboards {
            self.telemetry = TelemetrySnapshot::default();
            self.last_keyboard.clear();
            return TelemetryChange::Reset;
        }

        let change = if snapshot.device_name != self.last_keyboard {
            self.last_keyboard = snapshot.device_name.clone();
            TelemetryChange::KeyboardChanged
        } else {
            TelemetryChange::Updated
        };
        self.telemetry = snapshot;
        change
    }

    pub fn apply_signal(&mut self, snapshot: SignalSnapshot) {
        self.signal = snapshot;
    }

    pub fn apply_battery(&mut self, snapshot: BatterySnapshot) {
        self.scanner_battery = Some(snapshot);
    }

    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }

    pub fn signal(&self) -> &SignalSnapshot {
        &self.signal
    }

    /// `None` until the fuel gauge first reports
    pub fn scanner_battery(&self) -> Option<BatterySnapshot> {
        self.scanner_battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_change_detected_once() {
        let mut cache = DisplayCache::new();
        assert_eq!(
            cache.apply_telemetry(TelemetrySnapshot::named("Corne")),
            TelemetryChange::KeyboardChanged
        );
        assert_eq!(
            cache.apply_telemetry(TelemetrySnapshot::named("Corne")),
            TelemetryChange::Updated
        );
        assert_eq!(
            cache.apply_telemetry(TelemetrySnapshot::named("Lily58")),
            TelemetryChange::KeyboardChanged
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut cache = DisplayCache::new();
        let mut snapshot = TelemetrySnapshot::named("Corne");
        snapshot.layer = 3;
        snapshot.wpm = 80;
        snapshot.batteries = [90, 80, 0, 0];
        cache.apply_telemetry(snapshot);

        assert_eq!(
            cache.apply_telemetry(TelemetrySnapshot::no_keyboards()),
            TelemetryChange::Reset
        );
        let t = cache.telemetry();
        assert!(t.device_name.is_empty());
        assert_eq!((t.layer, t.wpm, t.batteries), (0, 0, [0; 4]));
        assert!(!t.no_keyboards);

        // Same keyboard coming back counts as a change
        assert_eq!(
            cache.apply_telemetry(TelemetrySnapshot::named("Corne")),
            TelemetryChange::KeyboardChanged
        );
    }

    #[test]
    fn test_signal_and_battery() {
        let mut cache = DisplayCache::new();
        assert_eq!(cache.scanner_battery(), None);
        assert_eq!(cache.signal().rate(), None);
        cache.apply_battery(BatterySnapshot::new(42));
        cache.apply_signal(SignalSnapshot {
            rssi: -55,
            rate_x100: 1000,
        });
        assert_eq!(cache.scanner_battery(), Some(BatterySnapshot::new(42)));
        assert_eq!(cache.signal().rssi, -55);
    }
}
