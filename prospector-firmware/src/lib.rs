//! Prospector scanner display firmware
//!
//! Embassy glue around `prospector-core`. Producer contexts (BLE scanner,
//! fuel gauge, touch driver) reach the UI loop only through `channels`.

#![no_std]

pub mod board;
pub mod channels;
pub mod config;
pub mod tasks;
