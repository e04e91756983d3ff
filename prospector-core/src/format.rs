//! Label text formatting
//!
//! All functions write into bounded `heapless` strings; capacities are sized
//! for the worst case so writes never truncate.

use core::fmt::Write;

use heapless::String;
use prospector_protocol::{Modifiers, SignalSnapshot, Transport};

use crate::state::ChannelFilter;

/// Short numeric label ("100%", "-100dBm", "255")
pub type Short = String<12>;

/// Icon-font glyphs for Ctrl, Shift, Alt and GUI
pub const MOD_GLYPHS: [&str; 4] = ["\u{F0634}", "\u{F0636}", "\u{F0635}", "\u{F0633}"];

/// Shown when no rate has been received
pub const UNKNOWN_RATE: &str = "-.--Hz";

/// Link rate with one decimal: 1234 -> "12.3Hz"
pub fn rate(signal: &SignalSnapshot) -> Short {
    let mut s = Short::new();
    match signal.rate() {
        Some(r) => {
            let _ = write!(s, "{}.{}Hz", r / 100, (r % 100) / 10);
        }
        None => {
            let _ = s.push_str(UNKNOWN_RATE);
        }
    }
    s
}

pub fn rssi(dbm: i8) -> Short {
    let mut s = Short::new();
    let _ = write!(s, "{}dBm", dbm);
    s
}

pub fn percent(value: u8) -> Short {
    let mut s = Short::new();
    let _ = write!(s, "{}%", value);
    s
}

pub fn number(value: u32) -> Short {
    let mut s = Short::new();
    let _ = write!(s, "{}", value);
    s
}

/// Recolor-markup transport text
///
/// USB wins over BLE. BLE is green when connected, blue when only bonded.
pub fn transport(transport: &Transport, profile: u8) -> String<40> {
    let mut s = String::new();
    if transport.usb_ready {
        let _ = s.push_str("#ffffff USB#");
    } else {
        let color = if transport.ble_connected {
            "00ff00"
        } else if transport.ble_bonded {
            "4A90E2"
        } else {
            "ffffff"
        };
        let _ = write!(s, "#{} BLE#\n#ffffff {}#", color, profile);
    }
    s
}

/// Glyphs for the held modifier groups, left and right merged
pub fn modifiers(mods: Modifiers) -> String<20> {
    let mut s = String::new();
    let held = [mods.ctrl(), mods.shift(), mods.alt(), mods.gui()];
    for (glyph, on) in MOD_GLYPHS.iter().zip(held) {
        if on {
            let _ = s.push_str(glyph);
        }
    }
    s
}

/// Channel badge text: "All" or the channel number
pub fn channel_badge(filter: ChannelFilter) -> Short {
    if filter.is_all() {
        let mut s = Short::new();
        let _ = s.push_str("All");
        s
    } else {
        number(filter.value() as u32)
    }
}

/// Main screen channel label: "Ch:All" or "Ch:N"
pub fn channel_label(filter: ChannelFilter) -> Short {
    let mut s = Short::new();
    let _ = write!(s, "Ch:{}", channel_badge(filter));
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        let mut signal = SignalSnapshot::default();
        assert_eq!(rate(&signal).as_str(), "-.--Hz");
        signal.rate_x100 = 1234;
        assert_eq!(rate(&signal).as_str(), "12.3Hz");
        signal.rate_x100 = 5;
        assert_eq!(rate(&signal).as_str(), "0.0Hz");
        signal.rate_x100 = 1_000_000;
        assert_eq!(rate(&signal).as_str(), "-.--Hz");
    }

    #[test]
    fn test_simple_numbers() {
        assert_eq!(rssi(-67).as_str(), "-67dBm");
        assert_eq!(rssi(-128).as_str(), "-128dBm");
        assert_eq!(percent(100).as_str(), "100%");
        assert_eq!(number(255).as_str(), "255");
    }

    #[test]
    fn test_transport() {
        let usb = Transport {
            usb_ready: true,
            ble_connected: true,
            ble_bonded: true,
        };
        assert_eq!(transport(&usb, 2).as_str(), "#ffffff USB#");

        let connected = Transport {
            usb_ready: false,
            ble_connected: true,
            ble_bonded: true,
        };
        assert_eq!(
            transport(&connected, 1).as_str(),
            "#00ff00 BLE#\n#ffffff 1#"
        );

        let bonded = Transport {
            ble_bonded: true,
            ..Transport::default()
        };
        assert_eq!(transport(&bonded, 0).as_str(), "#4A90E2 BLE#\n#ffffff 0#");
        assert_eq!(
            transport(&Transport::default(), 4).as_str(),
            "#ffffff BLE#\n#ffffff 4#"
        );
    }

    #[test]
    fn test_modifiers_order() {
        let mods = Modifiers(Modifiers::RGUI | Modifiers::LCTL | Modifiers::RALT);
        let text = modifiers(mods);
        let expected = ["\u{F0634}", "\u{F0635}", "\u{F0633}"].concat();
        assert_eq!(text.as_str(), expected);
        assert!(modifiers(Modifiers::default()).is_empty());
    }

    #[test]
    fn test_channel_text() {
        assert_eq!(channel_label(ChannelFilter::ALL).as_str(), "Ch:All");
        assert_eq!(channel_label(ChannelFilter::new(3)).as_str(), "Ch:3");
        assert_eq!(channel_badge(ChannelFilter::new(0)).as_str(), "0");
    }
}
