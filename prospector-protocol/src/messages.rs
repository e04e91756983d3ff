//! Snapshot types handed from producer contexts to the display core
//!
//! - `TelemetrySnapshot`: everything known about the tracked keyboard
//! - `SignalSnapshot`: advertisement RSSI and reception rate
//! - `BatterySnapshot`: the scanner's own fuel gauge

use heapless::String;

/// Maximum keyboard name length in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Number of battery slots reported per keyboard (central + peripherals)
pub const MAX_BATTERIES: usize = 4;

/// Highest reception rate that still renders as a number (hundredths of Hz)
pub const MAX_RATE_X100: i32 = 99_990;

/// Connection flags of the tracked keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transport {
    /// Keyboard is plugged in over USB and HID-ready
    pub usb_ready: bool,
    /// Active BLE profile is connected
    pub ble_connected: bool,
    /// Active BLE profile has a bond
    pub ble_bonded: bool,
}

/// HID modifier bitmask (left/right variants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const LCTL: u8 = 1 << 0;
    pub const LSFT: u8 = 1 << 1;
    pub const LALT: u8 = 1 << 2;
    pub const LGUI: u8 = 1 << 3;
    pub const RCTL: u8 = 1 << 4;
    pub const RSFT: u8 = 1 << 5;
    pub const RALT: u8 = 1 << 6;
    pub const RGUI: u8 = 1 << 7;

    /// Either control key held
    pub fn ctrl(&self) -> bool {
        self.0 & (Self::LCTL | Self::RCTL) != 0
    }

    /// Either shift key held
    pub fn shift(&self) -> bool {
        self.0 & (Self::LSFT | Self::RSFT) != 0
    }

    /// Either alt key held
    pub fn alt(&self) -> bool {
        self.0 & (Self::LALT | Self::RALT) != 0
    }

    /// Either GUI (super/command) key held
    pub fn gui(&self) -> bool {
        self.0 & (Self::LGUI | Self::RGUI) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Keyboard state as decoded from the latest advertisement
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    /// Advertised keyboard name (empty when unknown)
    pub device_name: String<MAX_NAME_LEN>,
    /// Highest active layer
    pub layer: u8,
    /// Words per minute
    pub wpm: u16,
    /// USB/BLE connection flags
    pub transport: Transport,
    /// Active BLE profile index
    pub profile: u8,
    /// Held modifiers
    pub modifiers: Modifiers,
    /// Battery percentages; 0 means the slot is empty or disconnected
    pub batteries: [u8; MAX_BATTERIES],
    /// Scanner timed out waiting for any keyboard
    pub no_keyboards: bool,
}

impl TelemetrySnapshot {
    /// Snapshot signalling that no keyboard has been heard recently
    pub fn no_keyboards() -> Self {
        Self {
            no_keyboards: true,
            ..Self::default()
        }
    }

    /// Build a snapshot with the given device name
    ///
    /// Names longer than `MAX_NAME_LEN` are truncated on a char boundary.
    pub fn named(name: &str) -> Self {
        let mut snapshot = Self::default();
        snapshot.set_name(name);
        snapshot
    }

    /// Replace the device name, truncating if needed
    pub fn set_name(&mut self, name: &str) {
        self.device_name.clear();
        for c in name.chars() {
            if self.device_name.push(c).is_err() {
                break;
            }
        }
    }

    /// Clamp a raw layer index into the 0-255 range carried by snapshots
    pub fn clamp_layer(raw: i32) -> u8 {
        raw.clamp(0, u8::MAX as i32) as u8
    }
}

/// Link quality of the tracked keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalSnapshot {
    /// Received signal strength (dBm)
    pub rssi: i8,
    /// Advertisement reception rate in hundredths of Hz; negative = unknown
    pub rate_x100: i32,
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self {
            rssi: -100,
            rate_x100: -1,
        }
    }
}

impl SignalSnapshot {
    /// Build a snapshot from a floating-point rate
    ///
    /// NaN, negative and implausibly large rates are stored as unknown.
    pub fn from_hz(rssi: i8, rate_hz: f32) -> Self {
        let rate_x100 = if rate_hz.is_nan() || rate_hz < 0.0 || rate_hz > 999.9 {
            -1
        } else {
            (rate_hz * 100.0) as i32
        };
        Self { rssi, rate_x100 }
    }

    /// Returns the rate when it can be displayed
    pub fn rate(&self) -> Option<i32> {
        if (0..=MAX_RATE_X100).contains(&self.rate_x100) {
            Some(self.rate_x100)
        } else {
            None
        }
    }
}

/// Scanner fuel gauge reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySnapshot {
    /// State of charge (0-100)
    pub level: u8,
}

impl BatterySnapshot {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }
}
