//! Board-agnostic core of the Prospector scanner display
//!
//! Everything between the scanner's producers and the render surface that
//! does not depend on a particular board:
//!
//! - Relay: latest-value mailboxes, the swipe cell and the transition flag
//! - Screen state machine and channel filter
//! - Layout allocators for the battery row and the layer display
//! - Animator and slider drag handling
//! - Pong Wars simulation
//! - Screens and the application controller driving them
//! - Configuration types and collaborator traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod anim;
pub mod app;
pub mod cache;
pub mod config;
pub mod format;
pub mod layout;
pub mod pong;
pub mod relay;
pub mod screens;
pub mod slider;
pub mod state;
pub mod traits;

pub use app::{App, IgnoreReason, Notice, Notices, UiError};
pub use relay::Relay;
pub use state::{ChannelFilter, ScreenState};
