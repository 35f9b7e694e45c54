//! Game variants: which entities exist and which contact handlers are bound
//!
//! A variant is chosen once when the scene is built. Cycling tears the scene
//! down and builds the next one.

use glam::Vec2;

use super::contact::{ContactBindings, ContactKind, paddle_handler, wall_handler};
use super::correction::{ContactAxis, PaddleRule};
use super::paddle::{self, PaddleLink};
use super::state::{Brick, Bumper, Edge, Paddle, Rect, SimContext, WallSegment};
use crate::consts::{BRICK_ROW_XS, BRICK_ROW_YS, BUMPER_INSET, BUMPER_Y};

/// Number of built-in variants
pub const VARIANT_COUNT: usize = 4;

/// A game mode
pub trait Variant: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Populate an empty context and return the contact bindings to use
    fn build(&self, ctx: &mut SimContext) -> ContactBindings;

    /// Per-tick variant behaviour, run after the host integrates motion
    fn update(&self, ctx: &mut SimContext) {
        paddle::resolve_links(ctx);
    }
}

/// Variant at `index`, wrapping around the variant count
pub fn variant_for(index: usize) -> Box<dyn Variant> {
    match index % VARIANT_COUNT {
        0 => Box::new(Classic),
        1 => Box::new(Bricks),
        2 => Box::new(Duel),
        _ => Box::new(Arena),
    }
}

/// Index after `index`
#[inline]
pub fn next_index(index: usize) -> usize {
    (index + 1) % VARIANT_COUNT
}

/// One paddle, plain reflection rule, drop-out hole in the floor
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl Variant for Classic {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn build(&self, ctx: &mut SimContext) -> ContactBindings {
        build_walls(ctx, &[Edge::Bottom]);
        add_paddle(ctx, bottom_paddle_pos(ctx), ContactAxis::Horizontal, PaddleLink::Driven);
        ctx.paddle_rule = PaddleRule::Coarse;
        ctx.ball.gravity = None;
        ctx.ball.drag = 1.0;
        paddle_and_walls()
    }
}

/// The full brick game: zoned paddle, bumpers, brick grid, gravity
#[derive(Debug, Clone, Copy, Default)]
pub struct Bricks;

impl Variant for Bricks {
    fn name(&self) -> &'static str {
        "bricks"
    }

    fn build(&self, ctx: &mut SimContext) -> ContactBindings {
        build_walls(ctx, &[Edge::Bottom]);
        add_paddle(ctx, bottom_paddle_pos(ctx), ContactAxis::Horizontal, PaddleLink::Driven);
        add_bumpers(ctx);
        add_brick_grid(ctx);
        ctx.paddle_rule = PaddleRule::Zoned { jitter: 0.0 };
        ctx.ball.gravity = Some(ctx.tuning.ball_gravity);
        ctx.ball.drag = ctx.tuning.ball_drag;
        ContactBindings::standard()
    }
}

/// Two opposing paddles, holes top and bottom, jittered rebounds
#[derive(Debug, Clone, Copy, Default)]
pub struct Duel;

impl Variant for Duel {
    fn name(&self) -> &'static str {
        "duel"
    }

    fn build(&self, ctx: &mut SimContext) -> ContactBindings {
        build_walls(ctx, &[Edge::Top, Edge::Bottom]);
        let bottom = bottom_paddle_pos(ctx);
        let source = add_paddle(ctx, bottom, ContactAxis::Horizontal, PaddleLink::Driven);
        let top = Vec2::new(ctx.tuning.game_width - bottom.x, edge_offset(ctx));
        add_paddle(ctx, top, ContactAxis::Horizontal, PaddleLink::MirrorX { source });
        ctx.paddle_rule = PaddleRule::Zoned {
            jitter: ctx.tuning.angle_jitter,
        };
        ctx.ball.gravity = None;
        ctx.ball.drag = 1.0;
        paddle_and_walls()
    }
}

/// Four paddles guarding four holes; side paddles are vertical
#[derive(Debug, Clone, Copy, Default)]
pub struct Arena;

impl Variant for Arena {
    fn name(&self) -> &'static str {
        "arena"
    }

    fn build(&self, ctx: &mut SimContext) -> ContactBindings {
        build_walls(ctx, &[Edge::Top, Edge::Bottom, Edge::Left, Edge::Right]);
        let (w, h) = (ctx.tuning.game_width, ctx.tuning.game_height);
        let offset = edge_offset(ctx);
        let bottom = bottom_paddle_pos(ctx);

        let source = add_paddle(ctx, bottom, ContactAxis::Horizontal, PaddleLink::Driven);
        add_paddle(
            ctx,
            Vec2::new(w - bottom.x, offset),
            ContactAxis::Horizontal,
            PaddleLink::MirrorX { source },
        );
        add_paddle(
            ctx,
            Vec2::new(offset, h / 2.0),
            ContactAxis::Vertical,
            PaddleLink::Transpose {
                source,
                mirrored: false,
            },
        );
        add_paddle(
            ctx,
            Vec2::new(w - offset, h / 2.0),
            ContactAxis::Vertical,
            PaddleLink::Transpose {
                source,
                mirrored: true,
            },
        );
        ctx.paddle_rule = PaddleRule::Zoned { jitter: 0.0 };
        ctx.ball.gravity = None;
        ctx.ball.drag = 1.0;
        paddle_and_walls()
    }
}

fn paddle_and_walls() -> ContactBindings {
    ContactBindings::new()
        .bind(ContactKind::BallPaddle, paddle_handler)
        .bind(ContactKind::BallWall, wall_handler)
}

fn bottom_paddle_pos(ctx: &SimContext) -> Vec2 {
    Vec2::new(ctx.tuning.paddle_spawn.0, ctx.tuning.paddle_spawn.1)
}

/// Distance of the driven paddle from its edge, reused for the other sides
fn edge_offset(ctx: &SimContext) -> f32 {
    ctx.tuning.game_height - ctx.tuning.paddle_spawn.1
}

fn add_paddle(ctx: &mut SimContext, pos: Vec2, axis: ContactAxis, link: PaddleLink) -> usize {
    let id = ctx.next_entity_id();
    let paddle = Paddle::new(id, pos, axis, &ctx.tuning).with_link(link);
    ctx.paddles.push(paddle);
    ctx.paddles.len() - 1
}

/// Boundary walls, split around a centered hole on every exit edge
pub fn build_walls(ctx: &mut SimContext, exits: &[Edge]) {
    let t = &ctx.tuning;
    let (w, h, ww, hole) = (t.game_width, t.game_height, t.wall_width, t.hole_width);

    let mut rects = Vec::new();
    for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
        let open = exits.contains(&edge);
        // (start, length) along the edge
        let (start, length) = match edge {
            Edge::Top | Edge::Bottom => (0.0, w),
            Edge::Left | Edge::Right => (ww, h - 2.0 * ww),
        };
        let spans = if open {
            let piece = (length - hole) / 2.0;
            vec![(start, piece), (start + piece + hole, piece)]
        } else {
            vec![(start, length)]
        };
        for (from, len) in spans {
            let rect = match edge {
                Edge::Top => Rect::from_corner(from, 0.0, len, ww),
                Edge::Bottom => Rect::from_corner(from, h - ww, len, ww),
                Edge::Left => Rect::from_corner(0.0, from, ww, len),
                Edge::Right => Rect::from_corner(w - ww, from, ww, len),
            };
            rects.push(rect);
        }
    }

    for rect in rects {
        let id = ctx.next_entity_id();
        ctx.walls.push(WallSegment { id, rect });
    }
    ctx.exits = exits.to_vec();
}

/// Three bumpers in a row across the middle
pub fn add_bumpers(ctx: &mut SimContext) {
    let w = ctx.tuning.game_width;
    for x in [BUMPER_INSET, w / 2.0, w - BUMPER_INSET] {
        let id = ctx.next_entity_id();
        ctx.bumpers.push(Bumper {
            id,
            pos: Vec2::new(x, BUMPER_Y),
            radius: ctx.tuning.bumper_radius,
            boost: ctx.tuning.bumper_boost,
        });
    }
}

/// Two staggered rows of bricks near the top
pub fn add_brick_grid(ctx: &mut SimContext) {
    let size = Vec2::new(ctx.tuning.brick_width, ctx.tuning.brick_height);
    let step = ctx.tuning.brick_width + ctx.tuning.brick_spacing;
    for (x0, y) in BRICK_ROW_XS.into_iter().zip(BRICK_ROW_YS) {
        for i in 0..ctx.tuning.bricks_per_row {
            let id = ctx.next_entity_id();
            ctx.bricks.push(Brick {
                id,
                rect: Rect::new(Vec2::new(x0 + step * i as f32, y), size),
                alive: true,
            });
        }
    }
    log::debug!("Brick grid built with {} bricks", ctx.bricks.len());
}
