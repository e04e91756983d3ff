//! Configuration type definitions
//!
//! `ScannerConfig` is the build-time configuration embedded in the firmware
//! image. `DisplaySettings` is the runtime state the settings screen edits; it
//! starts from the config and survives screen transitions, but not power
//! cycles.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::ChannelFilter;
use crate::traits::LightRange;

/// Brightness slider range
pub const MIN_MANUAL_BRIGHTNESS: u8 = 1;
pub const MAX_MANUAL_BRIGHTNESS: u8 = 100;

/// "Max Layers" slider range
pub const MIN_MAX_LAYERS: u8 = 4;
pub const MAX_MAX_LAYERS: u8 = 10;

/// `[display]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Show the scanner's own battery at startup
    pub battery_visible: bool,
    /// Backlight PWM is active-low
    pub inverted_backlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            battery_visible: true,
            inverted_backlight: true,
        }
    }
}

/// `[brightness]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrightnessConfig {
    /// Initial manual brightness (percent)
    pub manual: u8,
    /// Start with auto brightness on
    pub auto: bool,
    /// Applied when every keyboard has timed out; 0 disables
    pub timeout: u8,
    /// Restored when a keyboard reappears; 0 disables
    pub fixed: u8,
    /// Sensor mapping for auto brightness
    pub light: LightRange,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            manual: 65,
            auto: false,
            timeout: 0,
            fixed: 0,
            light: LightRange::default(),
        }
    }
}

/// `[layers]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerConfig {
    /// Layers shown individually in fixed mode (4-10)
    pub max_layers: u8,
    /// Start in dial mode
    pub slide_mode: bool,
    /// Initial dial color range
    pub slide_max: u8,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            max_layers: 7,
            slide_mode: false,
            slide_max: 7,
        }
    }
}

/// `[system]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemConfig {
    /// Initial channel filter; 10 shows all channels
    pub channel: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel: ChannelFilter::ALL_VALUE,
        }
    }
}

/// Complete scanner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerConfig {
    pub display: DisplayConfig,
    pub brightness: BrightnessConfig,
    pub layers: LayerConfig,
    pub system: SystemConfig,
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull every value into its valid range
    pub fn normalized(mut self) -> Self {
        let b = &mut self.brightness;
        b.manual = b.manual.clamp(MIN_MANUAL_BRIGHTNESS, MAX_MANUAL_BRIGHTNESS);
        b.timeout = b.timeout.min(MAX_MANUAL_BRIGHTNESS);
        b.fixed = b.fixed.min(MAX_MANUAL_BRIGHTNESS);

        let l = &mut self.layers;
        l.max_layers = l.max_layers.clamp(MIN_MAX_LAYERS, MAX_MAX_LAYERS);
        l.slide_max = l.slide_max.max(1);

        self.system.channel = ChannelFilter::new(self.system.channel).value();
        self
    }

    /// Brightness for the no-keyboards state, if configured
    pub fn timeout_brightness(&self) -> Option<u8> {
        (self.brightness.timeout > 0).then_some(self.brightness.timeout)
    }

    /// Brightness restored when a keyboard reappears, if configured
    pub fn fixed_brightness(&self) -> Option<u8> {
        (self.brightness.fixed > 0).then_some(self.brightness.fixed)
    }
}

/// Runtime display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    pub auto_brightness: bool,
    /// 1-100
    pub manual_brightness: u8,
    pub battery_visible: bool,
    /// 4-10
    pub max_layers: u8,
    /// Dial instead of fixed list
    pub slide_mode: bool,
    /// Dial color range; grows with the highest layer seen
    pub slide_max: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::from_config(&ScannerConfig::default())
    }
}

impl DisplaySettings {
    pub fn from_config(config: &ScannerConfig) -> Self {
        let config = config.normalized();
        Self {
            auto_brightness: config.brightness.auto,
            manual_brightness: config.brightness.manual,
            battery_visible: config.display.battery_visible,
            max_layers: config.layers.max_layers,
            slide_mode: config.layers.slide_mode,
            slide_max: config.layers.slide_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.manual_brightness, 65);
        assert_eq!(settings.max_layers, 7);
        assert_eq!(settings.slide_max, 7);
        assert!(!settings.auto_brightness);
        assert!(!settings.slide_mode);
        assert_eq!(ScannerConfig::default().system.channel, 10);
    }

    #[test]
    fn test_normalized_clamps() {
        let mut config = ScannerConfig::new();
        config.brightness.manual = 0;
        config.layers.max_layers = 20;
        config.system.channel = 42;
        let config = config.normalized();
        assert_eq!(config.brightness.manual, 1);
        assert_eq!(config.layers.max_layers, 10);
        assert_eq!(config.system.channel, 10);
    }

    #[test]
    fn test_optional_brightness() {
        let mut config = ScannerConfig::new();
        assert_eq!(config.timeout_brightness(), None);
        assert_eq!(config.fixed_brightness(), None);
        config.brightness.timeout = 5;
        config.brightness.fixed = 80;
        assert_eq!(config.timeout_brightness(), Some(5));
        assert_eq!(config.fixed_brightness(), Some(80));
    }
}
