//! Backlight trait

/// Errors from the backlight driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightError {
    /// PWM or LED device not ready
    NotReady,
    /// Driver rejected the duty cycle
    Rejected,
}

/// Lowest brightness ever applied; 0% would look like a dead screen
pub const MIN_BRIGHTNESS: u8 = 1;

/// Backlight driver
///
/// Takes logical brightness: 100 is brightest.
pub trait Backlight {
    /// Apply a brightness percentage (1-100)
    fn set_brightness(&mut self, percent: u8) -> Result<(), BacklightError>;
}

/// Clamp a requested brightness into the range drivers receive
pub fn clamp_brightness(percent: u8) -> u8 {
    percent.clamp(MIN_BRIGHTNESS, 100)
}

/// Adapter for backlight circuits where a higher duty cycle means darker
pub struct InvertedBacklight<B> {
    inner: B,
}

impl<B: Backlight> InvertedBacklight<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Backlight> Backlight for InvertedBacklight<B> {
    fn set_brightness(&mut self, percent: u8) -> Result<(), BacklightError> {
        self.inner.set_brightness(100 - clamp_brightness(percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        duty: Option<u8>,
    }

    impl Backlight for Recorder {
        fn set_brightness(&mut self, percent: u8) -> Result<(), BacklightError> {
            self.duty = Some(percent);
            Ok(())
        }
    }

    #[test]
    fn test_inverted_mapping() {
        let mut backlight = InvertedBacklight::new(Recorder::default());
        backlight.set_brightness(100).unwrap();
        assert_eq!(backlight.inner.duty, Some(0));
        backlight.set_brightness(65).unwrap();
        assert_eq!(backlight.inner.duty, Some(35));
        // Zero is raised to the minimum first
        backlight.set_brightness(0).unwrap();
        assert_eq!(backlight.into_inner().duty, Some(99));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_brightness(0), 1);
        assert_eq!(clamp_brightness(150), 100);
        assert_eq!(clamp_brightness(42), 42);
    }
}
