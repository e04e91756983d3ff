//! Color tables and level-to-color mappings

use prospector_display::Color;

/// Per-layer colors for layers 0-9
const LAYER_COLORS: [u32; 10] = [
    0xFF9B9B, 0xFFD93D, 0x6BCF7F, 0x4D96FF, 0xB19CD9, 0xFF6B9D, 0xFF9F43, 0x87CEEB, 0xF0E68C,
    0xDDA0DD,
];

/// Channel badge colors for channels 1-9
const CHANNEL_COLORS: [u32; 9] = [
    0xFF6B6B, 0xFFA94D, 0xFFE066, 0x69DB7C, 0x4DABF7, 0xB197FC, 0xF783AC, 0x66D9E8, 0xDEE2E6,
];

/// Scanner battery is drawn in this color while USB powered
pub const CHARGING_COLOR: Color = Color::hex(0x007FFF);

/// Selection and "All" accent
pub const ACCENT_BLUE: Color = Color::hex(0x4A90E2);

/// Layer highlight color; layers beyond 9 are white
pub fn layer_color(layer: u8) -> Color {
    LAYER_COLORS
        .get(layer as usize)
        .map(|c| Color::hex(*c))
        .unwrap_or(Color::WHITE)
}

/// Channel badge color; channel 0 and "all" are gray
pub fn channel_color(channel: u8) -> Color {
    match channel {
        1..=9 => Color::hex(CHANNEL_COLORS[channel as usize - 1]),
        _ => Color::hex(0x808080),
    }
}

/// Scanner battery color by state of charge
pub fn scanner_battery_color(level: u8) -> Color {
    match level {
        80.. => Color::hex(0x00FF00),
        60..=79 => Color::hex(0x7FFF00),
        40..=59 => Color::hex(0xFFFF00),
        20..=39 => Color::hex(0xFF7F00),
        _ => Color::hex(0xFF0000),
    }
}

/// Keyboard battery bar color by state of charge
pub fn keyboard_battery_color(level: u8) -> Color {
    match level {
        80.. => Color::hex(0x00CC66),
        60..=79 => Color::hex(0x66CC00),
        40..=59 => Color::hex(0xFFCC00),
        20..=39 => Color::hex(0xFF8800),
        _ => Color::hex(0xFF3333),
    }
}

/// Battery icon glyph (symbol font) by state of charge
pub fn battery_icon(level: u8) -> &'static str {
    match level {
        80.. => "\u{F240}",
        60..=79 => "\u{F241}",
        40..=59 => "\u{F242}",
        20..=39 => "\u{F243}",
        _ => "\u{F244}",
    }
}

/// Lightning glyph shown in front of the battery icon while charging
pub const CHARGE_GLYPH: &str = "\u{F0E7}";

/// Signal bars (0-5) for an RSSI reading
pub fn rssi_bars(rssi: i8) -> u8 {
    match rssi {
        -50.. => 5,
        -60..=-51 => 4,
        -70..=-61 => 3,
        -80..=-71 => 2,
        -90..=-81 => 1,
        _ => 0,
    }
}

/// Main screen signal bar color: brighter gray for more bars
pub fn rssi_gray(bars: u8) -> Color {
    match bars {
        5.. => Color::hex(0xC0C0C0),
        4 => Color::hex(0xA0A0A0),
        3 => Color::hex(0x808080),
        2 => Color::hex(0x606060),
        1 => Color::hex(0x404040),
        0 => Color::hex(0x202020),
    }
}

/// Keyboard picker signal bar color
pub fn rssi_color(bars: u8) -> Color {
    match bars {
        5.. => Color::hex(0x00CC66),
        4 => Color::hex(0x66CC00),
        3 => Color::hex(0xFFCC00),
        2 => Color::hex(0xFF8800),
        1 => Color::hex(0xFF3333),
        0 => Color::hex(0x606060),
    }
}

/// Dial highlight: hue spread evenly over `max_layer`, pastel saturation
pub fn hue_color(layer: u8, max_layer: u8) -> Color {
    let max = max_layer.max(1) as u32;
    let hue = (layer as u32 * 360 / max) % 360;
    hsv_to_rgb(hue as u16, 40, 100)
}

/// HSV to RGB with integer math
///
/// `hue` in degrees, `sat` and `val` in percent.
pub fn hsv_to_rgb(hue: u16, sat: u8, val: u8) -> Color {
    let hue = (hue % 360) as u32;
    let s = sat.min(100) as u32;
    let v = val.min(100) as u32 * 255 / 100;

    let sector = hue / 60;
    // Fraction through the sector, 0-59 scaled to 0-1000
    let f = (hue % 60) * 1000 / 60;

    let p = v * (100 - s) / 100;
    let q = v * (100_000 - s * f) / 100_000;
    let t = v * (100_000 - s * (1000 - f)) / 100_000;

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::rgb(r as u8, g as u8, b as u8)
}
