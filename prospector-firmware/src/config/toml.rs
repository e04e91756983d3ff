//! Minimal TOML reader for `scanner.toml`
//!
//! Handles only the subset the scanner configuration uses and does NOT
//! support the full TOML spec.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs with integer, boolean or quoted string values
//! - `#` comments, whole-line or trailing
//!
//! Unknown sections and keys are skipped so older firmware accepts newer
//! files.

use prospector_core::config::ScannerConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Header without a closing bracket
    InvalidSection,
    /// Line that is neither a header nor `key = value`
    InvalidLine,
    /// Value of the wrong type for its key
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Brightness,
    Layers,
    System,
    Unknown,
}

/// Parse TOML text into a `ScannerConfig`
///
/// Keys that are absent keep their defaults. Values are not range-checked
/// here; see `super::validate`.
pub fn parse_config(input: &str) -> Result<ScannerConfig, ParseError> {
    let mut config = ScannerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    Ok(match name.trim() {
        "display" => Section::Display,
        "brightness" => Section::Brightness,
        "layers" => Section::Layers,
        "system" => Section::System,
        _ => Section::Unknown,
    })
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Channel is either a number or the string "all"
fn parse_channel(value: &str) -> Result<u8, ParseError> {
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if unquoted.eq_ignore_ascii_case("all") {
        return Ok(prospector_core::ChannelFilter::ALL_VALUE);
    }
    parse_int(unquoted)
}

fn apply_value(
    config: &mut ScannerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "battery_visible" => config.display.battery_visible = parse_bool(value)?,
            "inverted_backlight" => config.display.inverted_backlight = parse_bool(value)?,
            _ => {}
        },
        Section::Brightness => {
            let b = &mut config.brightness;
            match key {
                "manual" => b.manual = parse_int(value)?,
                "auto" => b.auto = parse_bool(value)?,
                "timeout" => b.timeout = parse_int(value)?,
                "fixed" => b.fixed = parse_int(value)?,
                "sensor_dark" => b.light.dark = parse_int(value)?,
                "sensor_bright" => b.light.bright = parse_int(value)?,
                "sensor_min" => b.light.min_brightness = parse_int(value)?,
                "sensor_max" => b.light.max_brightness = parse_int(value)?,
                _ => {}
            }
        }
        Section::Layers => match key {
            "max_layers" => config.layers.max_layers = parse_int(value)?,
            "slide_mode" => config.layers.slide_mode = parse_bool(value)?,
            "slide_max" => config.layers.slide_max = parse_int(value)?,
            _ => {}
        },
        Section::System => {
            if key == "channel" {
                config.system.channel = parse_channel(value)?;
            }
        }
        Section::Root | Section::Unknown => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("[layers]").unwrap(), Section::Layers);
        assert_eq!(parse_section_header("[ system ]").unwrap(), Section::System);
        assert_eq!(parse_section_header("[future]").unwrap(), Section::Unknown);
        assert_eq!(parse_section_header("[broken"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("manual = 40 # dim"), "manual = 40 ");
        assert_eq!(strip_comment(r##"name = "a#b""##), r##"name = "a#b""##);
        assert_eq!(strip_comment("# whole line"), "");
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
# Prospector scanner
[display]
battery_visible = false
inverted_backlight = true

[brightness]
manual = 40
auto = true
timeout = 5      # dim when idle
fixed = 0
sensor_dark = 10
sensor_bright = 500

[layers]
max_layers = 9
slide_mode = true
slide_max = 12

[system]
channel = "all"
"#;
        let config = parse_config(text).unwrap();
        assert!(!config.display.battery_visible);
        assert!(config.display.inverted_backlight);
        assert_eq!(config.brightness.manual, 40);
        assert!(config.brightness.auto);
        assert_eq!(config.brightness.timeout, 5);
        assert_eq!(config.brightness.light.bright, 500);
        assert_eq!(config.layers.max_layers, 9);
        assert!(config.layers.slide_mode);
        assert_eq!(config.layers.slide_max, 12);
        assert_eq!(config.system.channel, 10);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[system]\nchannel = 3\n").unwrap();
        assert_eq!(config.system.channel, 3);
        assert_eq!(config.brightness, ScannerConfig::default().brightness);
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let config = parse_config("[display]\nrotation = 90\n[future]\nx = \"y\"\n").unwrap();
        assert_eq!(config, ScannerConfig::default());
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(parse_config("[layers]\nmax_layers = many"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[layers]\nslide_mode = 1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[layers]\nslide_mode"), Err(ParseError::InvalidLine));
    }
}
