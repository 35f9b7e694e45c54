//! Contact dispatch: routes each detected ball contact to its handler
//!
//! The host step detects contacts and performs any elastic separation first;
//! handlers bound here then adjust the ball on top of that. Unbound contact
//! kinds get the host response only.

use super::correction::{self, BallKinematics, PaddleKinematics, PaddleParams};
use super::state::{EntityId, GameEvent, SimContext};

/// What the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    BallPaddle,
    BallWall,
    BallBumper,
    BallBrick,
}

impl ContactKind {
    pub const ALL: [ContactKind; 4] = [
        ContactKind::BallPaddle,
        ContactKind::BallWall,
        ContactKind::BallBumper,
        ContactKind::BallBrick,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            ContactKind::BallPaddle => 0,
            ContactKind::BallWall => 1,
            ContactKind::BallBumper => 2,
            ContactKind::BallBrick => 3,
        }
    }
}

/// A single contact reported by the host step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactKind,
    /// Entity the ball touched
    pub other: EntityId,
}

/// Handler invoked synchronously for a contact
pub type ContactHandler = fn(&mut SimContext, EntityId) -> Option<GameEvent>;

/// Contact-kind → handler table, fixed when a variant is built
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactBindings {
    handlers: [Option<ContactHandler>; 4],
}

impl ContactBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table: every kind bound to its stock handler
    pub fn standard() -> Self {
        Self::new()
            .bind(ContactKind::BallPaddle, paddle_handler)
            .bind(ContactKind::BallWall, wall_handler)
            .bind(ContactKind::BallBumper, bumper_handler)
            .bind(ContactKind::BallBrick, brick_handler)
    }

    pub fn bind(mut self, kind: ContactKind, handler: ContactHandler) -> Self {
        self.handlers[kind.index()] = Some(handler);
        self
    }

    pub fn unbind(mut self, kind: ContactKind) -> Self {
        self.handlers[kind.index()] = None;
        self
    }

    pub fn is_bound(&self, kind: ContactKind) -> bool {
        self.handlers[kind.index()].is_some()
    }

    /// Run the handler bound to this contact's kind, if any
    pub fn dispatch(&self, ctx: &mut SimContext, contact: Contact) -> Option<GameEvent> {
        let handler = self.handlers[contact.kind.index()]?;
        handler(ctx, contact.other)
    }
}

/// Ball hit a paddle: apply the active paddle rule
pub fn paddle_handler(ctx: &mut SimContext, paddle_id: EntityId) -> Option<GameEvent> {
    let paddle = &ctx.paddles[ctx.paddle_index(paddle_id)?];
    let paddle = PaddleKinematics {
        pos: paddle.pos,
        vel: paddle.vel,
        axis: paddle.axis,
    };
    let ball = BallKinematics {
        pos: ctx.ball.pos,
        vel: ctx.ball.vel,
        radius: ctx.ball.radius,
    };
    let params = PaddleParams::from_tuning(&ctx.tuning);

    let out = correction::paddle_contact(ball, paddle, ctx.paddle_rule, &params, &mut ctx.rng);
    ctx.ball.pos = out.pos;
    ctx.ball.vel = out.vel;

    Some(GameEvent::PaddleHit {
        paddle: paddle_id,
        zone: out.zone,
    })
}

/// Ball hit a bumper: boost the (already reflected) velocity
pub fn bumper_handler(ctx: &mut SimContext, bumper_id: EntityId) -> Option<GameEvent> {
    let bumper = ctx.bumpers.iter().find(|b| b.id == bumper_id)?;
    ctx.ball.vel = correction::bumper_velocity(ctx.ball.vel, bumper.boost);
    Some(GameEvent::BumperHit { bumper: bumper_id })
}

/// Ball hit a brick: the brick is gone
pub fn brick_handler(ctx: &mut SimContext, brick_id: EntityId) -> Option<GameEvent> {
    let index = ctx.bricks.iter().position(|b| b.id == brick_id && b.alive)?;
    let mut brick = ctx.bricks.remove(index);
    brick.alive = false;
    log::debug!(
        "Brick {} destroyed, {} left",
        brick.id,
        ctx.live_bricks()
    );
    Some(GameEvent::BrickDestroyed { brick: brick.id })
}

/// Ball hit a wall: the host's elastic reflection is the whole response
pub fn wall_handler(_ctx: &mut SimContext, _wall_id: EntityId) -> Option<GameEvent> {
    None
}
