//! UI loop task
//!
//! The single consumer of the relay. Ticks the display engine every 10 ms
//! and hands it touch events as they arrive; nothing else touches a widget.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Instant, Ticker};

use prospector_core::{App, Notice, Notices};
use prospector_display::Scene;

use crate::board::{Apds9960, BoardBacklight, RpPlatform, SharedRoster};
use crate::channels::{RELAY, UI_EVENTS};

/// Loop period
pub const TICK_INTERVAL_MS: u64 = 10;

/// Widget slots; Pong Wars is the largest screen
pub const SCENE_CAPACITY: usize = 160;

pub type ScannerApp = App<
    Scene<SCENE_CAPACITY>,
    BoardBacklight<PwmOutput<'static>>,
    Apds9960<I2c<'static, I2C0, Blocking>>,
    SharedRoster,
    RpPlatform,
>;

#[embassy_executor::task]
pub async fn ui_task(app: &'static mut ScannerApp) {
    info!("UI task started");

    log_notices(&app.start(now_ms()));

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        let notices = match select(ticker.next(), UI_EVENTS.receive()).await {
            Either::First(()) => app.tick(&RELAY, now_ms()),
            Either::Second(event) => {
                trace!("UI event: {:?}", event);
                app.handle_ui_event(event, now_ms())
            }
        };
        log_notices(&notices);
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn log_notices(notices: &Notices) {
    for notice in notices {
        match notice {
            Notice::Transition { from, to } => info!("Screen {:?} -> {:?}", from, to),
            Notice::GestureIgnored { direction, reason } => {
                debug!("Swipe {:?} ignored: {:?}", direction, reason)
            }
            Notice::ChannelChanged(channel) => info!("Channel filter: {}", channel.value()),
            Notice::ResetToScanning => info!("No keyboards, back to scanning"),
            Notice::KeyboardChanged => info!("Tracking a different keyboard"),
            Notice::BrightnessApplied(level) => debug!("Brightness {}%", level),
            Notice::Reboot(mode) => warn!("Rebooting: {:?}", mode),
            Notice::Error(e) => warn!("UI error: {:?}", e),
        }
    }
}
