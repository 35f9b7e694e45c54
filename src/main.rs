//! Bumper Pong entry point
//!
//! Runs every variant headless with a scripted paddle that chases the ball,
//! logging the game events each one produces.
//!
//! Usage: `bumper-pong [tuning.json] [seconds-per-variant]`

use bumper_pong::Tuning;
use bumper_pong::consts::{MAX_SUBSTEPS, SIM_DT};
use bumper_pong::sim::{GameEvent, Scene, TickInput, VARIANT_COUNT};

/// Simulated display refresh driving the fixed-step accumulator
const FRAME_DT: f32 = 1.0 / 50.0;
/// Paddle dead zone around the ball's x position
const TRACK_DEAD_ZONE: f32 = 10.0;

#[derive(Debug, Default)]
struct Tally {
    paddle_hits: u32,
    bumper_hits: u32,
    bricks: u32,
    respawns: u32,
    stuck: u32,
    overspeed: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PaddleHit { .. } => self.paddle_hits += 1,
            GameEvent::BumperHit { .. } => self.bumper_hits += 1,
            GameEvent::BrickDestroyed { .. } => self.bricks += 1,
            GameEvent::Respawned => self.respawns += 1,
            GameEvent::StuckReset => self.stuck += 1,
            GameEvent::Overspeed { .. } => self.overspeed += 1,
            GameEvent::RespawnScheduled | GameEvent::VariantChanged { .. } => {}
        }
    }
}

/// Steer the driven paddle toward the ball
fn chase_ball(scene: &Scene) -> TickInput {
    let Some(paddle) = scene.ctx.paddles.first() else {
        return TickInput::default();
    };
    let dx = scene.ctx.ball.pos.x - paddle.pos.x;
    TickInput {
        left: dx < -TRACK_DEAD_ZONE,
        right: dx > TRACK_DEAD_ZONE,
        ..Default::default()
    }
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match Tuning::load(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Failed to load tuning from {path}: {e}, using defaults");
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Bumper Pong (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let tuning = load_tuning(args.get(1).map(String::as_str));
    let seconds: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(30.0);
    let seed = 0x5eed_b0b;

    let mut scene = match Scene::new(tuning, seed) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(1);
        }
    };

    let frames = (seconds / FRAME_DT).ceil() as u32;
    for _ in 0..VARIANT_COUNT {
        let mut tally = Tally::default();
        let mut accumulator = 0.0;

        for _ in 0..frames {
            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = chase_ball(&scene);
                scene.tick(&input, SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }
            for event in scene.drain_events() {
                tally.record(&event);
            }
            if scene.bricks_cleared() {
                log::info!("All bricks cleared after {} ticks", scene.time_ticks);
                break;
            }
        }

        println!(
            "{:<8} ticks={:<6} paddle={:<4} bumper={:<4} bricks={:<3} respawns={:<3} stuck={:<3} overspeed={}",
            scene.variant_name(),
            scene.time_ticks,
            tally.paddle_hits,
            tally.bumper_hits,
            tally.bricks,
            tally.respawns,
            tally.stuck,
            tally.overspeed
        );
        scene.cycle_variant();
    }
}
