//! Ball lifecycle: stuck-ball escape, overspeed clamp, and delayed respawn
//!
//! Checked once per tick, after contacts are resolved, in this order:
//! 1. stuck near an exit → reset immediately
//! 2. faster than the cap → rescale to a fraction of the cap
//! 3. outside the playfield → schedule one delayed respawn

use super::correction::clamp_overspeed;
use super::state::{GameEvent, SimContext};
use super::timer::{TimerAction, TimerHandle, Timers};

/// Tracks the ball's single pending respawn
#[derive(Debug, Clone, Default)]
pub struct BallLifecycle {
    respawn: Option<TimerHandle>,
}

impl BallLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a delayed respawn is waiting to fire
    pub fn respawn_pending(&self) -> bool {
        self.respawn.is_some()
    }

    /// Run the per-tick checks
    pub fn update(&mut self, ctx: &mut SimContext, timers: &mut Timers, events: &mut Vec<GameEvent>) {
        let speed = ctx.ball.speed();

        if speed < ctx.tuning.ball_reset_speed && ctx.ball_near_exit(ctx.tuning.stuck_margin) {
            log::info!(
                "Ball stuck at ({:.1}, {:.1}) with speed {:.2}, resetting",
                ctx.ball.pos.x,
                ctx.ball.pos.y,
                speed
            );
            self.reset(ctx, timers);
            events.push(GameEvent::StuckReset);
            return;
        }

        if let Some(vel) = clamp_overspeed(
            ctx.ball.vel,
            ctx.ball.max_speed,
            ctx.tuning.overspeed_fraction,
        ) {
            log::debug!("Ball overspeed {:.0}, clamped to {:.0}", speed, vel.length());
            ctx.ball.vel = vel;
            events.push(GameEvent::Overspeed { speed });
        }

        if self.respawn.is_none() && ctx.ball_out_of_bounds(ctx.tuning.out_of_bounds_margin) {
            let delay = ctx.tuning.respawn_delay_ms;
            self.respawn = Some(timers.schedule_once(delay, TimerAction::RespawnBall));
            log::info!("Ball left play, respawning in {delay} ms");
            events.push(GameEvent::RespawnScheduled);
        }
    }

    /// Handle a fired timer. Timers this lifecycle no longer owns are ignored.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        action: TimerAction,
        ctx: &mut SimContext,
        events: &mut Vec<GameEvent>,
    ) {
        match action {
            TimerAction::RespawnBall => {
                if self.respawn != Some(handle) {
                    return;
                }
                self.respawn = None;
                ctx.ball.respawn();
                log::info!("Ball respawned");
                events.push(GameEvent::Respawned);
            }
        }
    }

    /// Reset the ball to its spawn state now, cancelling any pending respawn.
    /// Safe to call repeatedly.
    pub fn reset(&mut self, ctx: &mut SimContext, timers: &mut Timers) {
        if let Some(handle) = self.respawn.take() {
            timers.cancel(handle);
        }
        ctx.ball.respawn();
    }
}
