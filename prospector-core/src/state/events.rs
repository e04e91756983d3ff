//! Outcomes of a swipe

use super::machine::ScreenState;

/// Channel filter adjustment on the keyboard picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStep {
    /// Swipe right
    Next,
    /// Swipe left
    Previous,
}

/// What a swipe asks the UI loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Navigation {
    /// No table entry for this swipe on the current screen
    Stay,
    /// Tear down the current screen and build another
    Goto(ScreenState),
    /// Stay on the keyboard picker and step the channel filter
    Channel(ChannelStep),
}

impl Navigation {
    /// Check if this navigation changes the screen
    pub fn is_transition(&self) -> bool {
        matches!(self, Navigation::Goto(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transition() {
        assert!(Navigation::Goto(ScreenState::Main).is_transition());
        assert!(!Navigation::Stay.is_transition());
        assert!(!Navigation::Channel(ChannelStep::Next).is_transition());
    }
}
