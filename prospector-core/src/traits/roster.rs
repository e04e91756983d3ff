//! Scanned keyboard roster
//!
//! The BLE scanner keeps its own table of keyboards it has heard. The picker
//! screen reads entries and writes back the selection and the channel
//! filter, which the scanner applies to the advertisements it accepts.

use heapless::String;
use prospector_protocol::MAX_NAME_LEN;

/// One keyboard as seen by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RosterEntry {
    /// Slot in the scanner's table
    pub index: usize,
    /// Advertised name; may be empty
    pub name: String<MAX_NAME_LEN>,
    pub rssi: i8,
    /// Advertised channel, 0-9
    pub channel: u8,
}

impl RosterEntry {
    pub fn new(index: usize, name: &str, rssi: i8, channel: u8) -> Self {
        let mut n = String::new();
        for c in name.chars() {
            if n.push(c).is_err() {
                break;
            }
        }
        Self {
            index,
            name: n,
            rssi,
            channel,
        }
    }

    /// Name to display
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown"
        } else {
            self.name.as_str()
        }
    }
}

/// Access to the scanner's keyboard table
pub trait KeyboardRoster {
    /// Number of table slots
    fn capacity(&self) -> usize;

    /// Active keyboard in slot `index`, if any
    fn entry(&self, index: usize) -> Option<RosterEntry>;

    /// Slot currently tracked for the main screen
    fn selected(&self) -> Option<usize>;

    /// Track a different keyboard
    fn select(&mut self, index: usize);

    /// Channel filter the scanner should apply, 0-9 or 10 for all
    fn set_channel(&mut self, channel: u8);
}
