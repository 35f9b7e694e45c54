//! Simulation context and entity types
//!
//! Everything the controllers mutate lives in [`SimContext`], which is passed
//! explicitly to each of them. No global scene state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::correction::{ContactAxis, PaddleRule, Zone};
use super::paddle::PaddleLink;
use crate::settings::Tuning;

/// Stable entity identifier (allocated per context, never reused)
pub type EntityId = u32;

/// An axis-aligned rectangle stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    /// Build from the top-left corner (y grows downward)
    pub fn from_corner(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x + w / 2.0, y + h / 2.0), Vec2::new(w, h))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Closest point inside the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fraction of velocity kept per second (1.0 = no damping)
    pub drag: f32,
    /// Downward acceleration, if this variant uses gravity
    pub gravity: Option<f32>,
    pub max_speed: f32,
    /// Spawn state restored on every respawn
    pub spawn_pos: Vec2,
    pub spawn_vel: Vec2,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        let spawn_pos = Vec2::new(tuning.ball_spawn.0, tuning.ball_spawn.1);
        let spawn_vel = Vec2::new(tuning.ball_spawn_vel.0, tuning.ball_spawn_vel.1);
        Self {
            pos: spawn_pos,
            vel: spawn_vel,
            radius: tuning.ball_radius,
            drag: tuning.ball_drag,
            gravity: None,
            max_speed: tuning.ball_max_speed,
            spawn_pos,
            spawn_vel,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Put the ball back at its spawn position and velocity
    pub fn respawn(&mut self) {
        self.pos = self.spawn_pos;
        self.vel = self.spawn_vel;
    }
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Restitution against the playfield bounds
    pub bounce: f32,
    /// Fraction of long-axis velocity kept per second while not accelerating
    pub drag: f32,
    pub max_speed: f32,
    /// Length along the long axis
    pub width: f32,
    /// Thickness across the long axis
    pub height: f32,
    /// Which world axis the paddle's long face runs along
    pub axis: ContactAxis,
    /// How the paddle is driven
    pub link: PaddleLink,
}

impl Paddle {
    pub fn new(id: EntityId, pos: Vec2, axis: ContactAxis, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            bounce: tuning.paddle_bounce,
            drag: tuning.paddle_drag,
            max_speed: tuning.paddle_max_speed,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            axis,
            link: PaddleLink::Driven,
        }
    }

    pub fn with_link(mut self, link: PaddleLink) -> Self {
        self.link = link;
        self
    }

    /// World-space bounding rectangle
    pub fn rect(&self) -> Rect {
        let size = self.axis.to_world(Vec2::new(self.width, self.height));
        Rect::new(self.pos, size)
    }
}

/// A static round bumper that boosts the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// Component-wise velocity multiplier applied on contact
    pub boost: f32,
}

/// A one-shot brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub rect: Rect,
    pub alive: bool,
}

/// A static piece of the playfield boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: EntityId,
    pub rect: Rect,
}

/// A side of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Things that happened during a tick, drained by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PaddleHit { paddle: EntityId, zone: Option<Zone> },
    BumperHit { bumper: EntityId },
    BrickDestroyed { brick: EntityId },
    RespawnScheduled,
    Respawned,
    StuckReset,
    Overspeed { speed: f32 },
    VariantChanged { index: usize, name: &'static str },
}

/// Owned simulation context shared by every controller
#[derive(Debug, Clone)]
pub struct SimContext {
    pub tuning: Tuning,
    pub ball: Ball,
    /// Sorted by id; index order is the contact detection order
    pub paddles: Vec<Paddle>,
    pub bumpers: Vec<Bumper>,
    pub bricks: Vec<Brick>,
    pub walls: Vec<WallSegment>,
    /// Edges with a hole the ball can leave through
    pub exits: Vec<Edge>,
    /// Active paddle edge-hit rule
    pub paddle_rule: PaddleRule,
    /// Seed the RNG was created from; rebuilds reuse it
    pub seed: u64,
    pub rng: Pcg32,
    next_id: EntityId,
}

impl SimContext {
    /// Empty playfield with a ball at its spawn point
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            ball: Ball::new(&tuning),
            tuning,
            paddles: Vec::new(),
            bumpers: Vec::new(),
            bricks: Vec::new(),
            walls: Vec::new(),
            exits: Vec::new(),
            paddle_rule: PaddleRule::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Region the paddles are confined to (inside the walls)
    pub fn paddle_bounds(&self) -> Rect {
        let t = &self.tuning;
        Rect::from_corner(
            t.wall_width,
            t.wall_width,
            t.game_width - 2.0 * t.wall_width,
            t.game_height - 2.0 * t.wall_width,
        )
    }

    /// Signed distance from `pos` to a playfield edge (positive = inside)
    pub fn distance_to_edge(&self, pos: Vec2, edge: Edge) -> f32 {
        match edge {
            Edge::Top => pos.y,
            Edge::Bottom => self.tuning.game_height - pos.y,
            Edge::Left => pos.x,
            Edge::Right => self.tuning.game_width - pos.x,
        }
    }

    /// Whether the ball is within `margin` of any exit edge
    pub fn ball_near_exit(&self, margin: f32) -> bool {
        self.exits
            .iter()
            .any(|&edge| self.distance_to_edge(self.ball.pos, edge) < margin)
    }

    /// Whether the ball has left the playfield by more than `margin`
    pub fn ball_out_of_bounds(&self, margin: f32) -> bool {
        let p = self.ball.pos;
        p.x < -margin
            || p.y < -margin
            || p.x > self.tuning.game_width + margin
            || p.y > self.tuning.game_height + margin
    }

    pub fn paddle_index(&self, id: EntityId) -> Option<usize> {
        self.paddles.iter().position(|p| p.id == id)
    }

    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}
