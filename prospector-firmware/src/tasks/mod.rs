//! Embassy async tasks

pub mod ui;

pub use ui::{ui_task, ScannerApp, SCENE_CAPACITY, TICK_INTERVAL_MS};
