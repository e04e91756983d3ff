//! Render surface abstraction for the Prospector scanner
//!
//! This crate provides:
//! - `Surface` trait: retained-mode widget operations (create, style, delete)
//! - `UiEvent` enum: touch events routed back from the toolkit
//! - `Scene`: a headless, generation-checked widget arena implementing `Surface`
//!
//! # Architecture
//!
//! The display core never draws pixels. It builds and mutates a widget tree
//! through `Surface`; a toolkit port (or `Scene`, for host tests and headless
//! builds) owns the actual objects. Widget handles carry a generation so that
//! a handle kept past its widget's deletion is detected instead of aliasing a
//! newer widget in the same slot.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
pub mod scene;
pub mod surface;

// Re-export key types
pub use input::{Point, UiEvent};
pub use scene::{Node, Scene, TEXT_CAPACITY};
pub use surface::{
    Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, TextAlign, Transform, WidgetId,
    WidgetKind, SCREEN_HEIGHT, SCREEN_WIDTH,
};
