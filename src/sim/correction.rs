//! Velocity corrections applied when the ball touches something
//!
//! Pure functions: each takes the ball's incoming kinematic state plus the
//! contact geometry and produces an outgoing velocity (and, for paddle edge
//! hits, a corrected position so the ball does not sink into the paddle).
//!
//! Paddle math is written for a horizontal paddle in screen space (y grows
//! downward). Vertical paddles go through the same code in a transposed frame,
//! see [`ContactAxis`].

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;
use crate::{sign, transpose};

/// Where on the paddle's long face the ball landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    LongLeft,
    ShortLeft,
    ShortRight,
    LongRight,
}

impl Zone {
    /// Edge fraction beyond which a hit counts as a long (edge) hit
    pub const LONG_THRESHOLD: f32 = 0.4;

    /// Classify the signed offset of the contact point, as a fraction of the
    /// paddle width. Total: anything not matched (including NaN) is `ShortLeft`.
    pub fn classify(fraction: f32) -> Zone {
        if fraction > Self::LONG_THRESHOLD {
            Zone::LongRight
        } else if fraction < -Self::LONG_THRESHOLD {
            Zone::LongLeft
        } else if fraction > 0.0 {
            Zone::ShortRight
        } else {
            Zone::ShortLeft
        }
    }
}

/// Which rule handles a hit on a paddle's long face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaddleRule {
    /// Zone-based angle remap with additive boost and a speed floor.
    /// `jitter` adds a uniform random perturbation (radians) to the rebound.
    Zoned { jitter: f32 },
    /// Plain vertical reflection with a coarse left/right push
    Coarse,
}

impl Default for PaddleRule {
    fn default() -> Self {
        PaddleRule::Zoned { jitter: 0.0 }
    }
}

/// Axis the paddle's long face runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactAxis {
    /// Long face along x (top/bottom paddles)
    #[default]
    Horizontal,
    /// Long face along y (left/right paddles)
    Vertical,
}

impl ContactAxis {
    /// World vector into the paddle-local frame (long axis = x)
    #[inline]
    pub fn to_local(self, v: Vec2) -> Vec2 {
        match self {
            ContactAxis::Horizontal => v,
            ContactAxis::Vertical => transpose(v),
        }
    }

    /// Paddle-local vector back to world space
    #[inline]
    pub fn to_world(self, v: Vec2) -> Vec2 {
        // transposition is its own inverse
        self.to_local(v)
    }
}

/// Paddle constants the correction math needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleParams {
    pub width: f32,
    pub half_height: f32,
    pub boost: f32,
    pub min_speed: f32,
    pub max_side_speed: f32,
}

impl PaddleParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.paddle_width,
            half_height: tuning.paddle_height / 2.0,
            boost: tuning.paddle_boost,
            min_speed: tuning.paddle_min_speed,
            max_side_speed: tuning.max_ball_vx,
        }
    }
}

/// Ball state going into (and coming out of) a correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallKinematics {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Paddle state at the moment of contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleKinematics {
    pub pos: Vec2,
    pub vel: Vec2,
    pub axis: ContactAxis,
}

/// Outcome of a paddle contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleCorrection {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Zone hit on the long face; `None` for side hits and the coarse rule
    pub zone: Option<Zone>,
}

/// True when the ball struck the long face rather than the short side
#[inline]
pub fn is_edge_hit(ball_y: f32, paddle_y: f32, radius: f32, half_height: f32) -> bool {
    (ball_y - paddle_y).abs() > radius + half_height - 1.0
}

/// Ball y just clear of the paddle, on the side it approached from
#[inline]
pub fn push_out_y(ball_y: f32, paddle_y: f32, radius: f32, half_height: f32) -> f32 {
    let clearance = radius + half_height + 1.0;
    if ball_y > paddle_y {
        paddle_y + clearance
    } else {
        paddle_y - clearance
    }
}

/// Steer the rebound angle according to the zone hit.
///
/// `angle` is measured with y up (`atan2(-vy, vx)`), so a ball leaving the top
/// face has an angle in (0, π). Long hits flatten the rebound toward the edge
/// that was hit; short hits keep the mirror reflection.
pub fn remap_angle(zone: Zone, angle: f32) -> f32 {
    match zone {
        Zone::LongRight => {
            let mut a = angle;
            if a > FRAC_PI_2 {
                a = (PI - a) / 1.4;
            }
            a / 1.4
        }
        Zone::LongLeft => {
            if angle < FRAC_PI_2 {
                PI - angle / 1.4
            } else {
                angle + (PI - angle) / 4.0
            }
        }
        Zone::ShortLeft | Zone::ShortRight => angle,
    }
}

/// Wrap an angle into (-π, π]
#[inline]
fn wrap_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Zoned long-face response in the paddle-local frame.
///
/// `fraction` is the contact offset over paddle width; `jitter` is an already
/// sampled angle perturbation (0.0 for none). The outgoing speed is the
/// incoming speed plus the paddle boost, never below the paddle minimum.
pub fn zoned_edge_velocity(vel: Vec2, fraction: f32, params: &PaddleParams, jitter: f32) -> Vec2 {
    let zone = Zone::classify(fraction);

    let reflected = Vec2::new(vel.x, -vel.y);
    let mut speed = reflected.length();
    let angle = wrap_angle(remap_angle(zone, (-reflected.y).atan2(reflected.x)));

    let angle = if jitter != 0.0 {
        // never jitter the ball back into the paddle
        if reflected.y <= 0.0 {
            (angle + jitter).clamp(0.0, PI)
        } else {
            (angle + jitter).clamp(-PI, 0.0)
        }
    } else {
        angle
    };

    speed += params.boost;
    speed = speed.max(params.min_speed);

    Vec2::new(speed * angle.cos(), -speed * angle.sin())
}

/// Coarse long-face response: reflect vertically, then push the ball toward
/// the side of the paddle it landed on. Hits near the middle keep their vx.
pub fn coarse_edge_velocity(vel: Vec2, ball_x: f32, paddle_x: f32, radius: f32) -> Vec2 {
    let vx = if ball_x > paddle_x + radius {
        vel.x.abs()
    } else if ball_x < paddle_x - radius {
        -vel.x.abs()
    } else {
        vel.x
    };
    Vec2::new(vx, -vel.y)
}

/// Short-face response along the long axis.
///
/// A paddle moving the same way as the ball carries it: the result is the
/// negated sum of both velocities. Otherwise the ball simply bounces.
/// Either way the result is clamped to `±max`.
pub fn side_velocity(ball_vx: f32, paddle_vx: f32, max: f32) -> f32 {
    let vx = if sign(ball_vx) == sign(paddle_vx) {
        -(ball_vx + paddle_vx)
    } else {
        -ball_vx
    };
    vx.clamp(-max, max)
}

/// Full paddle contact: picks edge or side handling, runs it in the paddle's
/// local frame and maps the result back to world space.
pub fn paddle_contact<R: Rng>(
    ball: BallKinematics,
    paddle: PaddleKinematics,
    rule: PaddleRule,
    params: &PaddleParams,
    rng: &mut R,
) -> PaddleCorrection {
    let axis = paddle.axis;
    let paddle_pos = axis.to_local(paddle.pos);
    let paddle_vel = axis.to_local(paddle.vel);
    let mut pos = axis.to_local(ball.pos);
    let mut vel = axis.to_local(ball.vel);

    // Underside hits are solved as top-face hits mirrored across the paddle
    let underside = pos.y > paddle_pos.y;
    if underside {
        pos.y = 2.0 * paddle_pos.y - pos.y;
        vel.y = -vel.y;
    }

    let (mut out_pos, mut out_vel, zone) =
        if is_edge_hit(pos.y, paddle_pos.y, ball.radius, params.half_height) {
            let y = push_out_y(pos.y, paddle_pos.y, ball.radius, params.half_height);
            let out_pos = Vec2::new(pos.x, y);
            match rule {
                PaddleRule::Zoned { jitter } => {
                    let fraction = (pos.x - paddle_pos.x) / params.width;
                    let sampled = if jitter > 0.0 {
                        rng.random_range(-jitter..=jitter)
                    } else {
                        0.0
                    };
                    let out_vel = zoned_edge_velocity(vel, fraction, params, sampled);
                    (out_pos, out_vel, Some(Zone::classify(fraction)))
                }
                PaddleRule::Coarse => {
                    let out_vel = coarse_edge_velocity(vel, pos.x, paddle_pos.x, ball.radius);
                    (out_pos, out_vel, None)
                }
            }
        } else {
            let vx = side_velocity(vel.x, paddle_vel.x, params.max_side_speed);
            (pos, Vec2::new(vx, vel.y), None)
        };

    if underside {
        out_pos.y = 2.0 * paddle_pos.y - out_pos.y;
        out_vel.y = -out_vel.y;
    }

    PaddleCorrection {
        pos: axis.to_world(out_pos),
        vel: axis.to_world(out_vel),
        zone,
    }
}

/// Bumper response: the host has already reflected the ball elastically,
/// this scales the reflected velocity.
#[inline]
pub fn bumper_velocity(vel: Vec2, boost: f32) -> Vec2 {
    vel * boost
}

/// Rescale an overspeed velocity to `fraction * max`, keeping its direction.
/// Returns `None` when the speed is within the cap.
pub fn clamp_overspeed(vel: Vec2, max: f32, fraction: f32) -> Option<Vec2> {
    if vel.length() <= max {
        return None;
    }
    let angle = vel.y.atan2(vel.x);
    let speed = fraction * max;
    Some(Vec2::new(speed * angle.cos(), speed * angle.sin()))
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> PaddleParams {
        PaddleParams::from_tuning(&Tuning::default())
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(Zone::classify(0.41), Zone::LongRight);
        assert_eq!(Zone::classify(-0.41), Zone::LongLeft);
        assert_eq!(Zone::classify(0.1), Zone::ShortRight);
        assert_eq!(Zone::classify(-0.1), Zone::ShortLeft);
        // boundaries
        assert_eq!(Zone::classify(0.4), Zone::ShortRight);
        assert_eq!(Zone::classify(-0.4), Zone::ShortLeft);
        assert_eq!(Zone::classify(0.0), Zone::ShortLeft);
        assert_eq!(Zone::classify(f32::NAN), Zone::ShortLeft);
    }

    #[test]
    fn test_edge_hit_threshold() {
        // radius 10 + half height 6 - 1 = 15
        assert!(is_edge_hit(684.0, 700.0, 10.0, 6.0));
        assert!(!is_edge_hit(685.0, 700.0, 10.0, 6.0));
        assert!(!is_edge_hit(700.0, 700.0, 10.0, 6.0));
    }

    #[test]
    fn test_push_out_sides() {
        assert_eq!(push_out_y(690.0, 700.0, 10.0, 6.0), 683.0);
        assert_eq!(push_out_y(710.0, 700.0, 10.0, 6.0), 717.0);
    }

    #[test]
    fn test_short_zone_is_mirror_reflection_plus_boost() {
        let p = params();
        let out = zoned_edge_velocity(Vec2::new(300.0, 400.0), 0.1, &p, 0.0);
        // speed 500 + 850 boost, direction mirrored vertically
        assert!((out.length() - 1350.0).abs() < 0.01);
        assert!((out.x / out.length() - 0.6).abs() < 1e-4);
        assert!((out.y / out.length() + 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_long_right_flattens_toward_right() {
        let p = params();
        // coming down and slightly right
        let out = zoned_edge_velocity(Vec2::new(50.0, 500.0), 0.45, &p, 0.0);
        assert!(out.x > 0.0, "should leave to the right");
        assert!(out.y < 0.0, "should leave upward");
        let expected = 500.0f32.atan2(50.0) / 1.4;
        let angle = (-out.y).atan2(out.x);
        assert!((angle - expected).abs() < 1e-4);
    }

    #[test]
    fn test_long_right_folds_leftward_rebound() {
        // ball travelling down-left rebounds up-left; LongRight folds and divides twice
        let a = 3.0 * PI / 4.0;
        let remapped = remap_angle(Zone::LongRight, a);
        assert!((remapped - (PI - a) / 1.4 / 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_long_left_flattens_toward_left() {
        let p = params();
        let out = zoned_edge_velocity(Vec2::new(0.0, 500.0), -0.45, &p, 0.0);
        assert!(out.x < 0.0, "should leave to the left");
        assert!(out.y < 0.0, "should leave upward");
        assert!((remap_angle(Zone::LongLeft, 2.0) - (2.0 + (PI - 2.0) / 4.0)).abs() < 1e-6);
    }

    #[test]
    fn test_speed_floor_applies() {
        let p = PaddleParams {
            boost: 0.0,
            ..params()
        };
        let out = zoned_edge_velocity(Vec2::new(10.0, 10.0), 0.0, &p, 0.0);
        assert!((out.length() - p.min_speed).abs() < 0.01);
    }

    #[test]
    fn test_coarse_rule() {
        let v = Vec2::new(-200.0, 300.0);
        assert_eq!(coarse_edge_velocity(v, 450.0, 400.0, 10.0), Vec2::new(200.0, -300.0));
        assert_eq!(coarse_edge_velocity(v, 350.0, 400.0, 10.0), Vec2::new(-200.0, -300.0));
        assert_eq!(coarse_edge_velocity(v, 405.0, 400.0, 10.0), Vec2::new(-200.0, -300.0));
    }

    #[test]
    fn test_side_velocity_same_direction_carries() {
        assert_eq!(side_velocity(300.0, 200.0, 750.0), -500.0);
        assert_eq!(side_velocity(600.0, 400.0, 750.0), -750.0);
    }

    #[test]
    fn test_side_velocity_opposite_direction_bounces() {
        assert_eq!(side_velocity(300.0, -200.0, 750.0), -300.0);
        assert_eq!(side_velocity(-900.0, 100.0, 750.0), 750.0);
    }

    #[test]
    fn test_paddle_contact_side_hit_keeps_position_and_vy() {
        let ball = BallKinematics {
            pos: Vec2::new(345.0, 712.0),
            vel: Vec2::new(300.0, 50.0),
            radius: 10.0,
        };
        let paddle = PaddleKinematics {
            pos: Vec2::new(400.0, 710.0),
            vel: Vec2::new(200.0, 0.0),
            axis: ContactAxis::Horizontal,
        };
        let out = paddle_contact(ball, paddle, PaddleRule::default(), &params(), &mut rng());
        assert_eq!(out.pos, ball.pos);
        assert_eq!(out.vel, Vec2::new(-500.0, 50.0));
        assert_eq!(out.zone, None);
    }

    #[test]
    fn test_paddle_contact_top_hit_repositions() {
        let ball = BallKinematics {
            pos: Vec2::new(448.0, 694.0),
            vel: Vec2::new(0.0, 400.0),
            radius: 10.0,
        };
        let paddle = PaddleKinematics {
            pos: Vec2::new(400.0, 710.0),
            vel: Vec2::ZERO,
            axis: ContactAxis::Horizontal,
        };
        let out = paddle_contact(ball, paddle, PaddleRule::default(), &params(), &mut rng());
        assert_eq!(out.pos, Vec2::new(448.0, 693.0));
        assert_eq!(out.zone, Some(Zone::LongRight));
        assert!(out.vel.y < 0.0);
        assert!(out.vel.x > 0.0);
    }

    #[test]
    fn test_vertical_paddle_matches_transposed_horizontal() {
        let p = params();
        let ball = BallKinematics {
            pos: Vec2::new(696.0, 430.0),
            vel: Vec2::new(400.0, 120.0),
            radius: 10.0,
        };
        let paddle = PaddleKinematics {
            pos: Vec2::new(710.0, 400.0),
            vel: Vec2::new(0.0, 50.0),
            axis: ContactAxis::Horizontal,
        };
        let flipped_ball = BallKinematics {
            pos: transpose(ball.pos),
            vel: transpose(ball.vel),
            ..ball
        };
        let flipped_paddle = PaddleKinematics {
            pos: transpose(paddle.pos),
            vel: transpose(paddle.vel),
            axis: ContactAxis::Vertical,
        };
        let a = paddle_contact(ball, paddle, PaddleRule::default(), &p, &mut rng());
        let b = paddle_contact(flipped_ball, flipped_paddle, PaddleRule::default(), &p, &mut rng());
        assert!((transpose(a.vel) - b.vel).length() < 1e-3);
        assert!((transpose(a.pos) - b.pos).length() < 1e-3);
        assert_eq!(a.zone, b.zone);
    }

    #[test]
    fn test_jitter_is_seeded() {
        let p = params();
        let ball = BallKinematics {
            pos: Vec2::new(410.0, 694.0),
            vel: Vec2::new(100.0, 400.0),
            radius: 10.0,
        };
        let paddle = PaddleKinematics {
            pos: Vec2::new(400.0, 710.0),
            vel: Vec2::ZERO,
            axis: ContactAxis::Horizontal,
        };
        let rule = PaddleRule::Zoned { jitter: 0.2 };
        let a = paddle_contact(ball, paddle, rule, &p, &mut Pcg32::seed_from_u64(42));
        let b = paddle_contact(ball, paddle, rule, &p, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
        let plain = paddle_contact(ball, paddle, PaddleRule::default(), &p, &mut rng());
        assert!((a.vel.length() - plain.vel.length()).abs() < 0.01);
        assert!(a.vel.y < 0.0);
    }

    fn top_paddle() -> PaddleKinematics {
        PaddleKinematics {
            pos: Vec2::new(400.0, 58.0),
            vel: Vec2::ZERO,
            axis: ContactAxis::Horizontal,
        }
    }

    fn bottom_paddle() -> PaddleKinematics {
        PaddleKinematics {
            pos: Vec2::new(400.0, 710.0),
            vel: Vec2::ZERO,
            axis: ContactAxis::Horizontal,
        }
    }

    #[test]
    fn test_jittered_underside_hit_leaves_downward() {
        let ball = BallKinematics {
            pos: Vec2::new(355.0, 74.0),
            vel: Vec2::new(-100.0, -400.0),
            radius: 10.0,
        };
        for seed in 0..32 {
            let out = paddle_contact(
                ball,
                top_paddle(),
                PaddleRule::Zoned { jitter: 0.08 },
                &params(),
                &mut Pcg32::seed_from_u64(seed),
            );
            assert_eq!(out.zone, Some(Zone::LongLeft));
            assert!(out.vel.y > 0.5 * out.vel.length(), "vel {:?}", out.vel);
            assert!(out.vel.x < 0.0);
            assert_eq!(out.pos, Vec2::new(355.0, 75.0));
        }
    }

    #[test]
    fn test_underside_hit_mirrors_top_face_hit() {
        let p = params();
        let below = BallKinematics {
            pos: Vec2::new(355.0, 694.0),
            vel: Vec2::new(-800.0, 100.0),
            radius: 10.0,
        };
        let above = BallKinematics {
            pos: Vec2::new(355.0, 74.0),
            vel: Vec2::new(-800.0, -100.0),
            radius: 10.0,
        };
        let bottom = paddle_contact(below, bottom_paddle(), PaddleRule::default(), &p, &mut rng());
        let top = paddle_contact(above, top_paddle(), PaddleRule::default(), &p, &mut rng());

        assert_eq!(bottom.zone, Some(Zone::LongLeft));
        assert_eq!(top.zone, Some(Zone::LongLeft));
        assert!(bottom.vel.x < 0.0 && bottom.vel.y < 0.0);
        assert!(top.vel.x < 0.0 && top.vel.y > 0.0);
        assert!((top.vel - Vec2::new(bottom.vel.x, -bottom.vel.y)).length() < 1e-3);
        assert_eq!(top.pos, Vec2::new(355.0, 75.0));
    }

    #[test]
    fn test_left_vertical_paddle_sends_ball_right() {
        // left-wall paddle, ball on its inner side
        let ball = BallKinematics {
            pos: Vec2::new(74.0, 400.0),
            vel: Vec2::new(-400.0, 120.0),
            radius: 10.0,
        };
        let paddle = PaddleKinematics {
            pos: Vec2::new(58.0, 384.0),
            vel: Vec2::ZERO,
            axis: ContactAxis::Vertical,
        };
        let out = paddle_contact(ball, paddle, PaddleRule::default(), &params(), &mut rng());
        assert_eq!(out.zone, Some(Zone::ShortRight));
        assert!(out.vel.x > 0.0);
        assert_eq!(out.pos, Vec2::new(75.0, 400.0));
    }

    #[test]
    fn test_bumper_boost_exact() {
        let out = bumper_velocity(Vec2::new(120.0, -45.0), 2.6);
        assert_eq!(out, Vec2::new(120.0 * 2.6, -45.0 * 2.6));
    }

    #[test]
    fn test_overspeed_clamp() {
        let vel = Vec2::new(1500.0, 2000.0); // speed 2500
        let out = clamp_overspeed(vel, 2000.0, 0.7).unwrap();
        assert!((out.length() - 1400.0).abs() < 0.01);
        assert!((out.y.atan2(out.x) - vel.y.atan2(vel.x)).abs() < 1e-5);
        assert!(clamp_overspeed(Vec2::new(1000.0, 0.0), 2000.0, 0.7).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_edge_hit_speed_is_finite_and_floored(
            vx in -3000.0f32..3000.0,
            vy in -3000.0f32..3000.0,
            fraction in -0.6f32..0.6,
            jitter in -0.3f32..0.3,
        ) {
            let p = params();
            let out = zoned_edge_velocity(Vec2::new(vx, vy), fraction, &p, jitter);
            prop_assert!(out.x.is_finite() && out.y.is_finite());
            prop_assert!(out.length() >= p.min_speed - 0.01);
        }

        #[test]
        fn prop_top_face_rebound_leaves_upward(
            vx in -3000.0f32..3000.0,
            vy in 1.0f32..3000.0,
            fraction in -0.6f32..0.6,
        ) {
            let out = zoned_edge_velocity(Vec2::new(vx, vy), fraction, &params(), 0.0);
            prop_assert!(out.y <= 0.0);
        }

        #[test]
        fn prop_overspeed_preserves_direction(
            angle in -3.1f32..3.1,
            speed in 2001.0f32..20000.0,
        ) {
            let vel = Vec2::new(speed * angle.cos(), speed * angle.sin());
            let out = clamp_overspeed(vel, 2000.0, 0.7).unwrap();
            prop_assert!((out.length() - 1400.0).abs() < 0.1);
            prop_assert!(out.normalize().dot(vel.normalize()) > 0.9999);
        }

        #[test]
        fn prop_underside_rebound_leaves_downward(
            vx in -3000.0f32..3000.0,
            vy in -3000.0f32..-1.0,
            offset in -55.0f32..55.0,
            jitter in prop_oneof![Just(0.0f32), 0.01f32..0.3],
            seed in any::<u64>(),
        ) {
            let ball = BallKinematics {
                pos: Vec2::new(400.0 + offset, 74.0),
                vel: Vec2::new(vx, vy),
                radius: 10.0,
            };
            let rule = PaddleRule::Zoned { jitter };
            let out = paddle_contact(ball, top_paddle(), rule, &params(), &mut Pcg32::seed_from_u64(seed));
            prop_assert!(out.vel.y >= 0.0);
            prop_assert!(out.pos.y > 58.0);
        }

        #[test]
        fn prop_long_zones_steer_toward_their_end(
            vx in -3000.0f32..3000.0,
            vy in 1.0f32..3000.0,
            offset in 41.0f32..55.0,
            underside in any::<bool>(),
        ) {
            let p = params();
            for (dx, towards) in [(offset, 1.0f32), (-offset, -1.0)] {
                let (paddle, ball) = if underside {
                    (top_paddle(), BallKinematics {
                        pos: Vec2::new(400.0 + dx, 74.0),
                        vel: Vec2::new(vx, -vy),
                        radius: 10.0,
                    })
                } else {
                    (bottom_paddle(), BallKinematics {
                        pos: Vec2::new(400.0 + dx, 694.0),
                        vel: Vec2::new(vx, vy),
                        radius: 10.0,
                    })
                };
                let out = paddle_contact(ball, paddle, PaddleRule::default(), &p, &mut rng());
                prop_assert!(out.vel.x * towards > 0.0, "dx {} vel {:?}", dx, out.vel);
            }
        }

        #[test]
        fn prop_zone_matches_offset(fraction in -1.0f32..1.0) {
            let expected = if fraction > 0.4 {
                Zone::LongRight
            } else if fraction < -0.4 {
                Zone::LongLeft
            } else if fraction > 0.0 {
                Zone::ShortRight
            } else {
                Zone::ShortLeft
            };
            prop_assert_eq!(Zone::classify(fraction), expected);
        }

        #[test]
        fn prop_side_velocity_clamped(bvx in -5000.0f32..5000.0, pvx in -5000.0f32..5000.0) {
            let vx = side_velocity(bvx, pvx, 750.0);
            prop_assert!((-750.0..=750.0).contains(&vx));
        }
    }
}
