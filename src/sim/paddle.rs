//! Paddle motion: input-driven acceleration and linked (mirrored) paddles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::SimContext;

/// How a paddle gets its motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleLink {
    /// Accelerated by player input
    #[default]
    Driven,
    /// Mirrors paddle `source` across the vertical center line
    MirrorX { source: usize },
    /// Side paddle whose y follows paddle `source`'s x, scaled to the
    /// playfield height; `mirrored` flips it top-to-bottom
    Transpose { source: usize, mirrored: bool },
}

impl PaddleLink {
    pub fn is_driven(&self) -> bool {
        matches!(self, PaddleLink::Driven)
    }
}

/// Long-axis acceleration for a directional input snapshot
#[inline]
pub fn acceleration_for(left: bool, right: bool, accel: f32) -> f32 {
    if left {
        -accel
    } else if right {
        accel
    } else {
        0.0
    }
}

/// Set every driven paddle's acceleration from the input snapshot
pub fn apply_input(ctx: &mut SimContext, left: bool, right: bool) {
    let along = acceleration_for(left, right, ctx.tuning.paddle_accel);
    for paddle in ctx.paddles.iter_mut().filter(|p| p.link.is_driven()) {
        paddle.accel = paddle.axis.to_world(Vec2::new(along, 0.0));
    }
}

/// Copy motion from source paddles into linked paddles
pub fn resolve_links(ctx: &mut SimContext) {
    let width = ctx.tuning.game_width;
    let height = ctx.tuning.game_height;
    let scale = height / width;

    for i in 0..ctx.paddles.len() {
        let link = ctx.paddles[i].link;
        let (pos, vel) = match link {
            PaddleLink::Driven => continue,
            PaddleLink::MirrorX { source } => {
                let Some(src) = ctx.paddles.get(source) else {
                    continue;
                };
                let own = &ctx.paddles[i];
                (
                    Vec2::new(width - src.pos.x, own.pos.y),
                    Vec2::new(-src.vel.x, 0.0),
                )
            }
            PaddleLink::Transpose { source, mirrored } => {
                let Some(src) = ctx.paddles.get(source) else {
                    continue;
                };
                let own = &ctx.paddles[i];
                let (y, vy) = if mirrored {
                    (height - src.pos.x * scale, -src.vel.x * scale)
                } else {
                    (src.pos.x * scale, src.vel.x * scale)
                };
                (Vec2::new(own.pos.x, y), Vec2::new(0.0, vy))
            }
        };
        let paddle = &mut ctx.paddles[i];
        paddle.pos = pos;
        paddle.vel = vel;
        paddle.accel = Vec2::ZERO;
    }
}
