//! Pong Wars simulation
//!
//! Two balls paint a 12x9 grid. A ball entering a cell owned by the other
//! team converts it and bounces off at a randomly perturbed angle. The engine
//! is plain data: it never touches the surface, and each step reports which
//! cells changed owner so only those need repainting.

use heapless::Vec;

use super::palette::{Palette, PALETTES};
use super::rng::Lcg;

pub const GRID_W: usize = 12;
pub const GRID_H: usize = 9;
pub const CELL_COUNT: usize = GRID_W * GRID_H;
pub const CELL_SIZE: i16 = 20;

pub const ARENA_W: i16 = GRID_W as i16 * CELL_SIZE;
pub const ARENA_H: i16 = GRID_H as i16 * CELL_SIZE;
/// Arena origin on screen
pub const ARENA_X: i16 = 20;
pub const ARENA_Y: i16 = 30;

pub const BALL_COUNT: usize = 2;
pub const BALL_RADIUS: i16 = 6;

/// Base speed range, velocity units (px/10 per step)
pub const MIN_SPEED: i16 = 40;
pub const MAX_SPEED: i16 = 60;

/// Fixed step period
pub const STEP_MS: u64 = 33;
/// Scores are redrawn every this many steps
pub const SCORE_EVERY: u32 = 10;

/// Top-left of a cell inside the arena
pub fn cell_origin(index: usize) -> (i16, i16) {
    let x = (index % GRID_W) as i16 * CELL_SIZE;
    let y = (index / GRID_W) as i16 * CELL_SIZE;
    (x, y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ball {
    /// Center, arena pixels
    pub x: i16,
    pub y: i16,
    /// Velocity in tenths of a pixel per step
    pub dx: i16,
    pub dy: i16,
    pub team: u8,
}

impl Ball {
    /// Top-left of the ball widget inside the arena
    pub fn origin(&self) -> (i16, i16) {
        (self.x - BALL_RADIUS, self.y - BALL_RADIUS)
    }
}

/// What changed during one step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Cells that changed owner
    pub converted: Vec<usize, BALL_COUNT>,
    /// Score labels are due for a redraw
    pub scores_due: bool,
}

pub struct Engine {
    grid: [u8; CELL_COUNT],
    balls: [Ball; BALL_COUNT],
    scores: [u16; 2],
    palette: u8,
    base_speed: i16,
    frame: u32,
    rng: Lcg,
}

impl Engine {
    pub fn new(seed: u32) -> Self {
        let mut engine = Self {
            grid: [0; CELL_COUNT],
            balls: [Ball::default(); BALL_COUNT],
            scores: [0; 2],
            palette: 0,
            base_speed: MIN_SPEED,
            frame: 0,
            rng: Lcg::new(seed),
        };
        engine.reset(seed);
        engine
    }

    /// Start a new round
    ///
    /// The grid is split down the middle. Random draws happen in a fixed
    /// order: palette, base speed, then angle and per-axis jitter for each
    /// ball.
    pub fn reset(&mut self, seed: u32) {
        self.rng.reseed(seed);
        self.frame = 0;

        for (i, cell) in self.grid.iter_mut().enumerate() {
            *cell = if i % GRID_W < GRID_W / 2 { 0 } else { 1 };
        }
        let half = (CELL_COUNT / 2) as u16;
        self.scores = [half, CELL_COUNT as u16 - half];

        self.palette = self.rng.below(PALETTES.len() as u32) as u8;
        self.base_speed = MIN_SPEED + self.rng.below((MAX_SPEED - MIN_SPEED + 1) as u32) as i16;

        for (i, ball) in self.balls.iter_mut().enumerate() {
            let angle = self.rng.below(8);
            let vx = self.base_speed + self.rng.below(10) as i16 - 5;
            let vy = self.base_speed + self.rng.below(10) as i16 - 5;
            // The angle only picks the vertical sign: ball 0 always heads
            // right and ball 1 left
            let sy = if angle % 4 < 2 { 1 } else { -1 };
            let dx = if i == 0 { vx } else { -vx };

            *ball = Ball {
                x: if i == 0 { ARENA_W / 4 } else { ARENA_W * 3 / 4 },
                y: ARENA_H / 2,
                dx,
                dy: vy * sy,
                team: i as u8,
            };
        }
    }

    /// Advance one fixed step
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        self.frame = self.frame.wrapping_add(1);

        for i in 0..BALL_COUNT {
            let mut ball = self.balls[i];
            let mut x = ball.x + ball.dx / 10;
            let mut y = ball.y + ball.dy / 10;

            if x < BALL_RADIUS {
                x = BALL_RADIUS;
                ball.dx = -ball.dx;
            } else if x > ARENA_W - BALL_RADIUS {
                x = ARENA_W - BALL_RADIUS;
                ball.dx = -ball.dx;
            }
            if y < BALL_RADIUS {
                y = BALL_RADIUS;
                ball.dy = -ball.dy;
            } else if y > ARENA_H - BALL_RADIUS {
                y = ARENA_H - BALL_RADIUS;
                ball.dy = -ball.dy;
            }

            let gx = (x / CELL_SIZE) as usize;
            let gy = (y / CELL_SIZE) as usize;
            if gx < GRID_W && gy < GRID_H {
                let index = gy * GRID_W + gx;
                if self.grid[index] != ball.team {
                    let gained = ball.team as usize & 1;
                    self.grid[index] = ball.team;
                    self.scores[gained] += 1;
                    self.scores[1 - gained] -= 1;
                    let _ = report.converted.push(index);

                    match self.rng.below(3) {
                        0 => ball.dx = -ball.dx,
                        1 => ball.dy = -ball.dy,
                        _ => {
                            ball.dx = -ball.dx;
                            ball.dy = -ball.dy;
                        }
                    }
                }
            }

            ball.x = x;
            ball.y = y;
            self.balls[i] = ball;
        }

        report.scores_due = self.frame % SCORE_EVERY == 0;
        report
    }

    /// Owning team of a cell
    pub fn cell(&self, index: usize) -> u8 {
        self.grid[index]
    }

    pub fn balls(&self) -> &[Ball; BALL_COUNT] {
        &self.balls
    }

    /// Cell count per team
    pub fn scores(&self) -> [u16; 2] {
        self.scores
    }

    pub fn palette(&self) -> &'static Palette {
        &PALETTES[self.palette as usize % PALETTES.len()]
    }

    pub fn palette_index(&self) -> u8 {
        self.palette
    }

    pub fn base_speed(&self) -> i16 {
        self.base_speed
    }

    /// Steps since the last reset
    pub fn frame(&self) -> u32 {
        self.frame
    }
}
