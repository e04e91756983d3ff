//! Board collaborators for the RP2040 reference scanner
//!
//! Backlight on PWM, an optional APDS9960 ambient light sensor on I2C0, VBUS
//! sense for the charge indicator, and the shared keyboard roster the BLE
//! scanner fills.

use core::cell::RefCell;

use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;
use embedded_hal::i2c::I2c;
use embedded_hal::pwm::SetDutyCycle;

use prospector_core::ChannelFilter;
use prospector_core::traits::{
    clamp_brightness, Backlight, BacklightError, InvertedBacklight, KeyboardRoster, LightRange,
    LightSensor, Platform, RebootMode, RosterEntry, SensorError,
};

/// Version string on the system screen
pub const FIRMWARE_VERSION: &str = concat!("Prospector Scanner v", env!("CARGO_PKG_VERSION"));

/// Keyboards the scanner tracks at once
pub const MAX_KEYBOARDS: usize = 8;

/// Backlight driven by one PWM channel
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_brightness(&mut self, percent: u8) -> Result<(), BacklightError> {
        self.pwm
            .set_duty_cycle_percent(clamp_brightness(percent))
            .map_err(|_| BacklightError::Rejected)
    }
}

/// Backlight with the polarity chosen by `scanner.toml`
pub enum BoardBacklight<P> {
    Normal(PwmBacklight<P>),
    Inverted(InvertedBacklight<PwmBacklight<P>>),
}

impl<P: SetDutyCycle> BoardBacklight<P> {
    pub fn new(pwm: P, inverted: bool) -> Self {
        let backlight = PwmBacklight::new(pwm);
        if inverted {
            BoardBacklight::Inverted(InvertedBacklight::new(backlight))
        } else {
            BoardBacklight::Normal(backlight)
        }
    }
}

impl<P: SetDutyCycle> Backlight for BoardBacklight<P> {
    fn set_brightness(&mut self, percent: u8) -> Result<(), BacklightError> {
        match self {
            BoardBacklight::Normal(b) => b.set_brightness(percent),
            BoardBacklight::Inverted(b) => b.set_brightness(percent),
        }
    }
}

const APDS9960_ADDR: u8 = 0x39;
const REG_ENABLE: u8 = 0x80;
const REG_ATIME: u8 = 0x81;
const REG_CONTROL: u8 = 0x8F;
const REG_ID: u8 = 0x92;
const REG_STATUS: u8 = 0x93;
const REG_CDATAL: u8 = 0x94;

/// Known part IDs
const APDS9960_IDS: [u8; 3] = [0xAB, 0x9C, 0xA8];

/// Power on, ALS enabled
const ENABLE_PON_AEN: u8 = 0x03;
/// 103 ms integration
const ATIME_103MS: u8 = 0xDB;
/// 4x ALS gain
const AGAIN_4X: u8 = 0x01;
const STATUS_AVALID: u8 = 0x01;

/// Clear-channel reading of an APDS9960
///
/// Probed once at startup; a board without the part reports unavailable
/// and the settings screen greys out the Auto switch.
pub struct Apds9960<I> {
    i2c: I,
    present: bool,
    range: LightRange,
}

impl<I: I2c> Apds9960<I> {
    pub fn new(mut i2c: I, range: LightRange) -> Self {
        let present = Self::init(&mut i2c).is_ok();
        Self {
            i2c,
            present,
            range,
        }
    }

    fn init(i2c: &mut I) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        i2c.write_read(APDS9960_ADDR, &[REG_ID], &mut id)
            .map_err(|_| SensorError::Bus)?;
        if !APDS9960_IDS.contains(&id[0]) {
            return Err(SensorError::NotPresent);
        }
        for (reg, value) in [
            (REG_ATIME, ATIME_103MS),
            (REG_CONTROL, AGAIN_4X),
            (REG_ENABLE, ENABLE_PON_AEN),
        ] {
            i2c.write(APDS9960_ADDR, &[reg, value])
                .map_err(|_| SensorError::Bus)?;
        }
        Ok(())
    }
}

impl<I: I2c> LightSensor for Apds9960<I> {
    fn is_available(&self) -> bool {
        self.present
    }

    fn read(&mut self) -> Result<u16, SensorError> {
        if !self.present {
            return Err(SensorError::NotPresent);
        }
        let mut status = [0u8; 1];
        self.i2c
            .write_read(APDS9960_ADDR, &[REG_STATUS], &mut status)
            .map_err(|_| SensorError::Bus)?;
        if status[0] & STATUS_AVALID == 0 {
            return Err(SensorError::NotReady);
        }
        let mut data = [0u8; 2];
        self.i2c
            .write_read(APDS9960_ADDR, &[REG_CDATAL], &mut data)
            .map_err(|_| SensorError::Bus)?;
        Ok(u16::from_le_bytes(data))
    }

    fn range(&self) -> LightRange {
        self.range
    }
}

pub struct RpPlatform {
    vbus: Input<'static>,
}

impl RpPlatform {
    /// `vbus` is the VBUS sense pin (GPIO24 on a Pico)
    pub fn new(vbus: Input<'static>) -> Self {
        Self { vbus }
    }
}

impl Platform for RpPlatform {
    fn uptime_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn usb_powered(&self) -> bool {
        self.vbus.is_high()
    }

    fn reboot(&mut self, mode: RebootMode) {
        match mode {
            RebootMode::Bootloader => embassy_rp::rom_data::reset_to_usb_boot(0, 0),
            RebootMode::Warm => cortex_m::peripheral::SCB::sys_reset(),
        }
    }

    fn firmware_version(&self) -> &'static str {
        FIRMWARE_VERSION
    }
}

const EMPTY_SLOT: Option<RosterEntry> = None;

/// Keyboards heard by the scanner and the one being tracked
struct RosterTable {
    slots: [Option<RosterEntry>; MAX_KEYBOARDS],
    selected: Option<usize>,
    /// Channel filter picked on the display, 10 for all
    channel: u8,
}

static ROSTER: Mutex<CriticalSectionRawMutex, RefCell<RosterTable>> =
    Mutex::new(RefCell::new(RosterTable {
        slots: [EMPTY_SLOT; MAX_KEYBOARDS],
        selected: None,
        channel: ChannelFilter::ALL_VALUE,
    }));

/// Scanner side: a keyboard advertised
///
/// Returns `false` if `index` is outside the table.
pub fn report_keyboard(entry: RosterEntry) -> bool {
    ROSTER.lock(|table| {
        let mut table = table.borrow_mut();
        let index = entry.index;
        match table.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(entry);
                true
            }
            None => false,
        }
    })
}

/// Scanner side: a keyboard timed out
pub fn forget_keyboard(index: usize) {
    ROSTER.lock(|table| {
        if let Some(slot) = table.borrow_mut().slots.get_mut(index) {
            *slot = None;
        }
    });
}

/// Keyboard the scanner should forward telemetry for
pub fn selected_keyboard() -> Option<usize> {
    ROSTER.lock(|table| table.borrow().selected)
}

/// Scanner side: channel filter for advertisements, 10 accepts all
pub fn runtime_channel() -> u8 {
    ROSTER.lock(|table| table.borrow().channel)
}

/// UI side of the shared roster
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedRoster;

impl KeyboardRoster for SharedRoster {
    fn capacity(&self) -> usize {
        MAX_KEYBOARDS
    }

    fn entry(&self, index: usize) -> Option<RosterEntry> {
        ROSTER.lock(|table| table.borrow().slots.get(index).cloned().flatten())
    }

    fn selected(&self) -> Option<usize> {
        selected_keyboard()
    }

    fn select(&mut self, index: usize) {
        ROSTER.lock(|table| table.borrow_mut().selected = Some(index));
    }

    fn set_channel(&mut self, channel: u8) {
        ROSTER.lock(|table| table.borrow_mut().channel = channel);
    }
}
