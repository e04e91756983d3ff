//! Keyboard channel filter

/// Channel shown on the keyboard picker
///
/// Channels 0-9 select keyboards advertising that channel; 10 is the
/// "all" sentinel and is only ever used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelFilter(u8);

impl Default for ChannelFilter {
    fn default() -> Self {
        Self::ALL
    }
}

impl ChannelFilter {
    /// Sentinel value matching every channel
    pub const ALL_VALUE: u8 = 10;
    pub const ALL: ChannelFilter = ChannelFilter(Self::ALL_VALUE);

    /// Build a filter, mapping anything above 9 to "all"
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::ALL_VALUE))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL_VALUE
    }

    /// Whether a keyboard on `channel` passes the filter
    pub fn matches(&self, channel: u8) -> bool {
        self.is_all() || self.0 == channel
    }

    /// Step up, wrapping "all" back to 0
    pub fn next(self) -> Self {
        if self.0 >= Self::ALL_VALUE {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Step down, wrapping 0 to "all"
    pub fn previous(self) -> Self {
        if self.0 == 0 {
            Self::ALL
        } else {
            Self(self.0 - 1)
        }
    }
}
