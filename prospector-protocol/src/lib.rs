//! Prospector scanner inbound data contract
//!
//! This crate defines everything a producer context hands to the display
//! core: keyboard telemetry, link signal quality, the scanner's own battery
//! level and swipe gestures.
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────┐  TelemetrySnapshot  ┌─────────┐
//! │ BLE scanner  │ ──────────────────▶ │         │
//! │ worker       │  SignalSnapshot     │  Relay  │ ──▶ UI loop
//! ├──────────────┤ ──────────────────▶ │ (mail-  │
//! │ Fuel gauge   │  BatterySnapshot    │  boxes) │
//! ├──────────────┤ ──────────────────▶ │         │
//! │ Touch panel  │  SwipeDirection     │         │
//! └──────────────┘ ──────────────────▶ └─────────┘
//! ```
//!
//! Every type here is `Copy` or a bounded `heapless` value so producers never
//! allocate.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod messages;

pub use events::SwipeDirection;
pub use messages::{
    BatterySnapshot, Modifiers, SignalSnapshot, TelemetrySnapshot, Transport, MAX_BATTERIES,
    MAX_NAME_LEN,
};
