//! Fixed timestep simulation tick
//!
//! [`Scene`] owns the simulation context and runs one step per call:
//! host step → contact handlers → due timers → ball lifecycle → paddle input.

use super::arcade;
use super::contact::{ContactBindings, ContactKind};
use super::lifecycle::BallLifecycle;
use super::paddle;
use super::state::{GameEvent, SimContext};
use super::timer::Timers;
use super::variant::{self, Variant};
use crate::settings::{Tuning, TuningError};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional signals, sampled once per tick
    pub left: bool,
    pub right: bool,
    /// Put the ball back at its spawn point (new game)
    pub reset_ball: bool,
    /// Switch to the next variant
    pub cycle_variant: bool,
}

/// A running game: one variant's entities, bindings, and ball lifecycle
#[derive(Debug)]
pub struct Scene {
    /// Simulation state, exposed for inspection and tests
    pub ctx: SimContext,
    /// Simulation tick counter since the last (re)build
    pub time_ticks: u64,
    variant_index: usize,
    variant: Box<dyn Variant>,
    bindings: ContactBindings,
    lifecycle: BallLifecycle,
    timers: Timers,
    events: Vec<GameEvent>,
}

impl Scene {
    /// Validate the tuning and build variant 0
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_variant(tuning, seed, 0)
    }

    /// Validate the tuning and build the given variant
    pub fn with_variant(tuning: Tuning, seed: u64, variant_id: usize) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut scene = Self {
            ctx: SimContext::new(tuning, seed),
            time_ticks: 0,
            variant_index: 0,
            variant: variant::variant_for(0),
            bindings: ContactBindings::new(),
            lifecycle: BallLifecycle::new(),
            timers: Timers::new(),
            events: Vec::new(),
        };
        scene.initialize(variant_id);
        Ok(scene)
    }

    /// Tear down and build the variant at `variant_id` (wrapped to the
    /// variant count). Pending timers are dropped and the RNG is reseeded.
    pub fn initialize(&mut self, variant_id: usize) {
        let index = variant_id % variant::VARIANT_COUNT;
        let variant = variant::variant_for(index);

        self.ctx = SimContext::new(self.ctx.tuning.clone(), self.ctx.seed);
        self.timers.clear();
        self.lifecycle = BallLifecycle::new();
        self.time_ticks = 0;
        self.bindings = variant.build(&mut self.ctx);

        log::info!(
            "Variant {} ({}) built: {} paddles, {} bumpers, {} bricks, {} walls",
            index,
            variant.name(),
            self.ctx.paddles.len(),
            self.ctx.bumpers.len(),
            self.ctx.bricks.len(),
            self.ctx.walls.len()
        );
        self.events.push(GameEvent::VariantChanged {
            index,
            name: variant.name(),
        });
        self.variant_index = index;
        self.variant = variant;
    }

    /// Advance to the next variant and rebuild
    pub fn cycle_variant(&mut self) {
        self.initialize(variant::next_index(self.variant_index));
    }

    /// Reset the ball to its spawn state, cancelling any pending respawn
    pub fn reset_ball(&mut self) {
        self.lifecycle.reset(&mut self.ctx, &mut self.timers);
    }

    /// Advance the simulation by one fixed timestep of `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if input.cycle_variant {
            self.cycle_variant();
            return;
        }
        if input.reset_ball {
            self.reset_ball();
        }

        self.time_ticks += 1;

        // Host step: integrate, follow links, detect and separate contacts
        arcade::integrate(&mut self.ctx, dt);
        self.variant.update(&mut self.ctx);
        let contacts = arcade::collide(&mut self.ctx);

        for contact in contacts {
            if let Some(event) = self.bindings.dispatch(&mut self.ctx, contact) {
                self.events.push(event);
            }
        }

        for (handle, action) in self.timers.advance(dt as f64 * 1000.0) {
            self.lifecycle
                .on_timer(handle, action, &mut self.ctx, &mut self.events);
        }

        self.lifecycle
            .update(&mut self.ctx, &mut self.timers, &mut self.events);

        paddle::apply_input(&mut self.ctx, input.left, input.right);
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn variant_index(&self) -> usize {
        self.variant_index
    }

    pub fn variant_name(&self) -> &'static str {
        self.variant.name()
    }

    pub fn respawn_pending(&self) -> bool {
        self.lifecycle.respawn_pending()
    }

    /// True for a brick variant once every brick is gone
    pub fn bricks_cleared(&self) -> bool {
        self.bindings.is_bound(ContactKind::BallBrick) && self.ctx.live_bricks() == 0
    }
}
