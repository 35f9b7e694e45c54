//! Bumper Pong - a breakout/pong hybrid with bumpers and bricks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (contact response, ball lifecycle, variants)
//! - `settings`: Data-driven game tuning

pub mod settings;
pub mod sim;

pub use settings::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the arcade host loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 650.0;
    pub const GAME_HEIGHT: f32 = 768.0;
    pub const WALL_WIDTH: f32 = 30.0;
    /// Gap left in a boundary wall so the ball can drop out
    pub const HOLE_WIDTH: f32 = 150.0;

    /// Ball defaults
    pub const BALL_SPAWN_X: f32 = 100.0;
    pub const BALL_SPAWN_Y: f32 = 200.0;
    pub const BALL_SPAWN_VX: f32 = 700.0;
    pub const BALL_SPAWN_VY: f32 = 530.0;
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_GRAVITY: f32 = 1400.0;
    /// Fraction of velocity kept after one second of damping
    pub const BALL_DRAG: f32 = 0.5;
    pub const BALL_MAX_SPEED: f32 = 2000.0;
    /// Below this speed a ball near an exit is considered stuck
    pub const BALL_RESET_SPEED: f32 = 8.0;
    pub const STUCK_MARGIN: f32 = 70.0;
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;
    /// Overspeed balls are rescaled to this fraction of the max speed
    pub const OVERSPEED_FRACTION: f32 = 0.7;
    pub const RESPAWN_DELAY_MS: f32 = 1500.0;

    /// Paddle defaults
    pub const PADDLE_SPAWN_X: f32 = 400.0;
    pub const PADDLE_SPAWN_Y: f32 = 710.0;
    pub const PADDLE_ACCEL: f32 = 4000.0;
    pub const PADDLE_DRAG: f32 = 0.0002;
    pub const PADDLE_MAX_SPEED: f32 = 2000.0;
    pub const PADDLE_BOUNCE: f32 = 0.34;
    /// Speed added to the ball on an edge hit (additive)
    pub const PADDLE_BOOST: f32 = 850.0;
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Floor on ball speed leaving a paddle edge hit
    pub const PADDLE_MIN_SPEED: f32 = 300.0;
    /// Cap on horizontal ball speed after a side hit
    pub const MAX_BALL_VX: f32 = 750.0;

    /// Bumper defaults
    pub const BUMPER_RADIUS: f32 = 18.0;
    /// Speed multiplier applied on bumper contact
    pub const BUMPER_BOOST: f32 = 2.6;
    /// Outer bumpers sit this far from the side edges, the third is centered
    pub const BUMPER_INSET: f32 = 150.0;
    pub const BUMPER_Y: f32 = 350.0;

    /// Brick grid defaults
    pub const BRICK_WIDTH: f32 = 28.0;
    pub const BRICK_HEIGHT: f32 = 24.0;
    pub const BRICK_ROW_XS: [f32; 2] = [105.0, 113.0];
    pub const BRICK_ROW_YS: [f32; 2] = [95.0, 123.0];
    pub const BRICK_SPACING: f32 = 4.0;
    pub const BRICKS_PER_ROW: u32 = 14;
}

/// Swap the x and y components
#[inline]
pub fn transpose(v: Vec2) -> Vec2 {
    Vec2::new(v.y, v.x)
}

/// Sign of a value as -1, 0 or 1 (zero maps to zero, unlike `f32::signum`)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
