//! Ambient light sensor trait

/// Errors that can occur reading the light sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No sensor fitted or it failed to initialize
    NotPresent,
    /// Bus transaction failed
    Bus,
    /// Conversion not finished yet
    NotReady,
}

/// Raw range mapped onto the brightness scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightRange {
    /// Reading at or below which the minimum brightness is used
    pub dark: u16,
    /// Reading at or above which the maximum brightness is used
    pub bright: u16,
    pub min_brightness: u8,
    pub max_brightness: u8,
}

impl Default for LightRange {
    fn default() -> Self {
        Self {
            dark: 0,
            bright: 1000,
            min_brightness: 10,
            max_brightness: 100,
        }
    }
}

impl LightRange {
    /// Linear map from a raw reading to a brightness percentage
    pub fn map(&self, raw: u16) -> u8 {
        let min = self.min_brightness.clamp(1, 100) as u32;
        let max = (self.max_brightness.clamp(1, 100) as u32).max(min);
        if self.bright <= self.dark || raw <= self.dark {
            return min as u8;
        }
        if raw >= self.bright {
            return max as u8;
        }
        let span = (self.bright - self.dark) as u32;
        let pos = (raw - self.dark) as u32;
        (min + (max - min) * pos / span) as u8
    }
}

/// Ambient light sensor
pub trait LightSensor {
    /// Whether a sensor was detected at startup
    fn is_available(&self) -> bool;

    /// Read the raw light level
    fn read(&mut self) -> Result<u16, SensorError>;

    /// Mapping used for auto brightness
    fn range(&self) -> LightRange {
        LightRange::default()
    }

    /// Brightness percentage for a raw reading
    fn map_to_brightness(&self, raw: u16) -> u8 {
        self.range().map(raw)
    }
}

/// Stand-in for boards without a sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl LightSensor for NoSensor {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&mut self) -> Result<u16, SensorError> {
        Err(SensorError::NotPresent)
    }
}
