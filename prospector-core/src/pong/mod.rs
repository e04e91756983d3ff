//! Pong Wars
//!
//! Deterministic grid-and-ball simulation shown on its own screen.

pub mod engine;
pub mod palette;
pub mod rng;

pub use engine::{Ball, Engine, StepReport, CELL_COUNT, STEP_MS};
pub use palette::Palette;
pub use rng::Lcg;
