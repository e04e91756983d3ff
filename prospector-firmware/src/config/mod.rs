//! Configuration loading
//!
//! The configuration is `scanner.toml`, embedded at build time and parsed
//! by a small no_std reader. `build.rs` already rejects files the full TOML
//! parser cannot read, so a failure here means a value out of range.

pub mod toml;

use prospector_core::config::{
    ScannerConfig, MAX_MANUAL_BRIGHTNESS, MAX_MAX_LAYERS, MIN_MANUAL_BRIGHTNESS, MIN_MAX_LAYERS,
};
use prospector_core::ChannelFilter;

pub use self::toml::{parse_config, ParseError};

/// Embedded configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../../scanner.toml");

/// Why the embedded configuration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    Parse(ParseError),
    /// A value lies outside the range the UI can show
    OutOfRange(&'static str),
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parse and check a configuration file
pub fn load_config(input: &str) -> Result<ScannerConfig, ConfigError> {
    let config = parse_config(input)?;
    validate(&config)?;
    Ok(config)
}

/// Range checks the parser leaves out
pub fn validate(config: &ScannerConfig) -> Result<(), ConfigError> {
    let brightness = MIN_MANUAL_BRIGHTNESS..=MAX_MANUAL_BRIGHTNESS;
    let b = &config.brightness;
    if !brightness.contains(&b.manual) {
        return Err(ConfigError::OutOfRange("brightness.manual"));
    }
    if b.timeout > MAX_MANUAL_BRIGHTNESS {
        return Err(ConfigError::OutOfRange("brightness.timeout"));
    }
    if b.fixed > MAX_MANUAL_BRIGHTNESS {
        return Err(ConfigError::OutOfRange("brightness.fixed"));
    }
    if b.light.bright <= b.light.dark {
        return Err(ConfigError::OutOfRange("brightness.sensor_bright"));
    }

    let l = &config.layers;
    if !(MIN_MAX_LAYERS..=MAX_MAX_LAYERS).contains(&l.max_layers) {
        return Err(ConfigError::OutOfRange("layers.max_layers"));
    }
    if l.slide_max == 0 {
        return Err(ConfigError::OutOfRange("layers.slide_max"));
    }

    if config.system.channel > ChannelFilter::ALL_VALUE {
        return Err(ConfigError::OutOfRange("system.channel"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        assert!(load_config(EMBEDDED_CONFIG).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            load_config("[layers]\nmax_layers = 12\n"),
            Err(ConfigError::OutOfRange("layers.max_layers"))
        );
        assert_eq!(
            load_config("[brightness]\nmanual = 0\n"),
            Err(ConfigError::OutOfRange("brightness.manual"))
        );
        assert_eq!(
            load_config("[system]\nchannel = 11\n"),
            Err(ConfigError::OutOfRange("system.channel"))
        );
    }

    #[test]
    fn test_parse_errors_are_wrapped() {
        assert_eq!(
            load_config("[display\n"),
            Err(ConfigError::Parse(ParseError::InvalidSection))
        );
    }
}
