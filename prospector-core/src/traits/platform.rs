//! Platform services

/// Reboot target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RebootMode {
    /// Into the USB mass-storage bootloader
    Bootloader,
    /// Plain warm reset
    Warm,
}

/// Board services the core needs besides the display
pub trait Platform {
    /// Milliseconds since boot
    fn uptime_ms(&self) -> u64;

    /// Whether the scanner is running from USB power
    fn usb_powered(&self) -> bool;

    /// Reboot; returns only where rebooting is not possible (host tests)
    fn reboot(&mut self, mode: RebootMode);

    /// Version shown on the system screen
    fn firmware_version(&self) -> &'static str;
}
