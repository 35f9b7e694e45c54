//! Game tuning and configuration
//!
//! Every gameplay constant lives in [`Tuning`] so variants and tests can
//! tweak values without touching the simulation code. Persisted as JSON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug)]
pub enum TuningError {
    /// Reading or writing the tuning file failed
    Io(std::io::Error),
    /// The tuning file is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid {
        /// Offending field
        field: &'static str,
        /// What the field must satisfy
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "tuning file i/o failed: {e}"),
            Self::Parse(e) => write!(f, "tuning file is malformed: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Gameplay constants, grouped by entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub game_width: f32,
    pub game_height: f32,
    pub wall_width: f32,
    pub hole_width: f32,

    // === Ball ===
    pub ball_spawn: (f32, f32),
    pub ball_spawn_vel: (f32, f32),
    pub ball_radius: f32,
    /// Downward acceleration for variants that use gravity
    pub ball_gravity: f32,
    pub ball_drag: f32,
    pub ball_max_speed: f32,
    pub ball_reset_speed: f32,
    pub stuck_margin: f32,
    pub out_of_bounds_margin: f32,
    pub overspeed_fraction: f32,
    pub respawn_delay_ms: f32,

    // === Paddle ===
    pub paddle_spawn: (f32, f32),
    pub paddle_accel: f32,
    pub paddle_drag: f32,
    pub paddle_max_speed: f32,
    pub paddle_bounce: f32,
    pub paddle_boost: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_min_speed: f32,
    pub max_ball_vx: f32,
    /// Random rebound perturbation (radians) for variants that enable it
    pub angle_jitter: f32,

    // === Bumpers ===
    pub bumper_radius: f32,
    pub bumper_boost: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_spacing: f32,
    pub bricks_per_row: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            wall_width: WALL_WIDTH,
            hole_width: HOLE_WIDTH,

            ball_spawn: (BALL_SPAWN_X, BALL_SPAWN_Y),
            ball_spawn_vel: (BALL_SPAWN_VX, BALL_SPAWN_VY),
            ball_radius: BALL_RADIUS,
            ball_gravity: BALL_GRAVITY,
            ball_drag: BALL_DRAG,
            ball_max_speed: BALL_MAX_SPEED,
            ball_reset_speed: BALL_RESET_SPEED,
            stuck_margin: STUCK_MARGIN,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
            overspeed_fraction: OVERSPEED_FRACTION,
            respawn_delay_ms: RESPAWN_DELAY_MS,

            paddle_spawn: (PADDLE_SPAWN_X, PADDLE_SPAWN_Y),
            paddle_accel: PADDLE_ACCEL,
            paddle_drag: PADDLE_DRAG,
            paddle_max_speed: PADDLE_MAX_SPEED,
            paddle_bounce: PADDLE_BOUNCE,
            paddle_boost: PADDLE_BOOST,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_min_speed: PADDLE_MIN_SPEED,
            max_ball_vx: MAX_BALL_VX,
            angle_jitter: 0.08,

            bumper_radius: BUMPER_RADIUS,
            bumper_boost: BUMPER_BOOST,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_spacing: BRICK_SPACING,
            bricks_per_row: BRICKS_PER_ROW,
        }
    }
}

impl Tuning {
    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let scalars = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("wall_width", self.wall_width),
            ("hole_width", self.hole_width),
            ("ball_spawn.x", self.ball_spawn.0),
            ("ball_spawn.y", self.ball_spawn.1),
            ("ball_spawn_vel.x", self.ball_spawn_vel.0),
            ("ball_spawn_vel.y", self.ball_spawn_vel.1),
            ("ball_radius", self.ball_radius),
            ("ball_gravity", self.ball_gravity),
            ("ball_drag", self.ball_drag),
            ("ball_max_speed", self.ball_max_speed),
            ("ball_reset_speed", self.ball_reset_speed),
            ("stuck_margin", self.stuck_margin),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
            ("overspeed_fraction", self.overspeed_fraction),
            ("respawn_delay_ms", self.respawn_delay_ms),
            ("paddle_spawn.x", self.paddle_spawn.0),
            ("paddle_spawn.y", self.paddle_spawn.1),
            ("paddle_accel", self.paddle_accel),
            ("paddle_drag", self.paddle_drag),
            ("paddle_max_speed", self.paddle_max_speed),
            ("paddle_bounce", self.paddle_bounce),
            ("paddle_boost", self.paddle_boost),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_min_speed", self.paddle_min_speed),
            ("max_ball_vx", self.max_ball_vx),
            ("angle_jitter", self.angle_jitter),
            ("bumper_radius", self.bumper_radius),
            ("bumper_boost", self.bumper_boost),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("brick_spacing", self.brick_spacing),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("ball_radius", self.ball_radius),
            ("ball_max_speed", self.ball_max_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("max_ball_vx", self.max_ball_vx),
            ("bumper_radius", self.bumper_radius),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        if self.hole_width < 0.0 || self.hole_width >= self.game_width.min(self.game_height) {
            return Err(TuningError::Invalid {
                field: "hole_width",
                reason: "must be non-negative and narrower than the playfield",
            });
        }
        if self.bumper_boost <= 1.0 {
            return Err(TuningError::Invalid {
                field: "bumper_boost",
                reason: "must be greater than one",
            });
        }
        if self.overspeed_fraction <= 0.0 || self.overspeed_fraction > 1.0 {
            return Err(TuningError::Invalid {
                field: "overspeed_fraction",
                reason: "must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.ball_drag) || !(0.0..=1.0).contains(&self.paddle_drag) {
            return Err(TuningError::Invalid {
                field: "drag",
                reason: "damping factors must be in [0, 1]",
            });
        }
        if self.respawn_delay_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "respawn_delay_ms",
                reason: "must not be negative",
            });
        }

        Ok(())
    }

    /// Load tuning from a JSON file (missing fields take defaults)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Write tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Tuning saved to {}", path.as_ref().display());
        Ok(())
    }
}
