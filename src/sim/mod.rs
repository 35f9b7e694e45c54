//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (paddles, walls, bumpers, bricks)
//! - No rendering or platform dependencies

pub mod arcade;
pub mod contact;
pub mod correction;
pub mod lifecycle;
pub mod paddle;
pub mod state;
pub mod tick;
pub mod timer;
pub mod variant;

pub use contact::{Contact, ContactBindings, ContactKind};
pub use correction::{ContactAxis, PaddleRule, Zone};
pub use lifecycle::BallLifecycle;
pub use paddle::PaddleLink;
pub use state::{Ball, Brick, Bumper, Edge, EntityId, GameEvent, Paddle, Rect, SimContext, WallSegment};
pub use tick::{Scene, TickInput};
pub use timer::{TimerAction, TimerHandle, Timers};
pub use variant::{VARIANT_COUNT, Variant, variant_for};
