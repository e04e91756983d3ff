//! Producer entry points
//!
//! Everything outside the UI loop talks to it through the statics here. The
//! functions never block and never touch a widget; they are safe to call
//! from interrupt handlers and other executors.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use prospector_core::Relay;
use prospector_display::UiEvent;
use prospector_protocol::{BatterySnapshot, SignalSnapshot, SwipeDirection, TelemetrySnapshot};

/// Touch events queued for the UI loop
const UI_EVENT_CHANNEL_SIZE: usize = 8;

/// Mailboxes, swipe cell and loop flags
pub static RELAY: Relay = Relay::new();

/// Clicks, presses and toggles from the touch driver
pub static UI_EVENTS: Channel<CriticalSectionRawMutex, UiEvent, UI_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Latest status of the tracked keyboard
pub fn publish_telemetry(snapshot: TelemetrySnapshot) {
    RELAY.publish_telemetry(snapshot);
}

/// Link quality, about once a second
pub fn publish_signal(snapshot: SignalSnapshot) {
    RELAY.publish_signal(snapshot);
}

/// Scanner's own battery from the fuel gauge
pub fn publish_battery(snapshot: BatterySnapshot) {
    RELAY.publish_battery(snapshot);
}

/// Swipe from the touch listener
///
/// Returns `false` if the swipe was coalesced into one still pending.
pub fn on_swipe(direction: SwipeDirection) -> bool {
    RELAY.offer_swipe(direction)
}

/// Queue a touch event, dropping it if the loop is far behind
pub fn post_ui_event(event: UiEvent) -> bool {
    UI_EVENTS.try_send(event).is_ok()
}
