//! Prospector - Keyboard Scanner Display Firmware
//!
//! Main firmware binary for RP2040-based scanner boards. Brings up the
//! backlight, light sensor and VBUS sense, then hands everything to the UI
//! loop. BLE scanning, fuel gauge and touch drivers feed it through
//! `prospector_firmware::channels`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use prospector_core::config::ScannerConfig;
use prospector_core::traits::LightSensor;
use prospector_core::App;
use prospector_display::Scene;

use prospector_firmware::board::{Apds9960, BoardBacklight, RpPlatform, SharedRoster};
use prospector_firmware::config::{load_config, EMBEDDED_CONFIG};
use prospector_firmware::tasks::{self, ScannerApp};

/// PWM wrap value; ~1.9 kHz at the default 125 MHz clock
const BACKLIGHT_PWM_TOP: u16 = 0xFFFF;

/// Ambient light sensor bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

static APP: StaticCell<ScannerApp> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Prospector firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match load_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            warn!("Embedded config rejected: {:?}, using defaults", e);
            ScannerConfig::default()
        }
    };

    // Backlight on GPIO13 (PWM slice 6, output B)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = BACKLIGHT_PWM_TOP;
    pwm_config.compare_b = 0;
    let pwm = Pwm::new_output_b(p.PWM_SLICE6, p.PIN_13, pwm_config);
    let (_, pwm_b) = pwm.split();
    let pwm_b = unwrap!(pwm_b);
    let backlight = BoardBacklight::new(pwm_b, config.display.inverted_backlight);
    info!(
        "Backlight initialized (inverted={})",
        config.display.inverted_backlight
    );

    // APDS9960 on I2C0 (SDA GPIO4, SCL GPIO5)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let sensor = Apds9960::new(i2c, config.brightness.light);
    if sensor.is_available() {
        info!("Ambient light sensor found");
    } else {
        info!("No ambient light sensor, auto brightness disabled");
    }

    // VBUS sense on GPIO24
    let vbus = Input::new(p.PIN_24, Pull::None);
    let platform = RpPlatform::new(vbus);

    let app = APP.init_with(|| {
        App::new(
            Scene::new(),
            backlight,
            sensor,
            SharedRoster,
            platform,
            &config,
        )
    });

    spawner.spawn(tasks::ui_task(app)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
