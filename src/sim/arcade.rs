//! Minimal arcade-physics host step
//!
//! Integrates the ball and paddles, detects ball contacts, and performs the
//! plain elastic response for solid colliders (walls, bumpers, bricks).
//! Paddle contacts are overlap-only: the paddle handler owns separation.
//!
//! Shapes are limited to what the game uses: one circle against
//! axis-aligned rectangles and static circles.

use glam::Vec2;

use super::contact::{Contact, ContactKind};
use super::correction::reflect_velocity;
use super::state::{Ball, Paddle, Rect, SimContext};

/// Contact geometry between the ball and a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Unit normal pointing from the collider toward the ball center
    pub normal: Vec2,
    /// How far the ball is inside the collider
    pub penetration: f32,
}

/// Ball vs rectangle overlap
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> Option<Overlap> {
    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist = delta.length();

    if dist > 1e-6 {
        if dist >= radius {
            return None;
        }
        return Some(Overlap {
            normal: delta / dist,
            penetration: radius - dist,
        });
    }

    // Center is inside the rectangle - push out along the shallowest side
    let (min, max) = (rect.min(), rect.max());
    let sides = [
        (center.x - min.x, Vec2::NEG_X),
        (max.x - center.x, Vec2::X),
        (center.y - min.y, Vec2::NEG_Y),
        (max.y - center.y, Vec2::Y),
    ];
    let (depth, normal) = sides
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::NEG_Y));
    Some(Overlap {
        normal,
        penetration: depth + radius,
    })
}

/// Ball vs static circle overlap
pub fn circle_circle_overlap(center: Vec2, radius: f32, other: Vec2, other_radius: f32) -> Option<Overlap> {
    let delta = center - other;
    let dist = delta.length();
    let reach = radius + other_radius;
    if dist >= reach {
        return None;
    }
    let normal = if dist > 1e-6 { delta / dist } else { Vec2::NEG_Y };
    Some(Overlap {
        normal,
        penetration: reach - dist,
    })
}

/// Push the ball out of a collider and reflect it (restitution 1)
pub fn separate(ball: &mut Ball, overlap: Overlap) {
    ball.pos += overlap.normal * overlap.penetration;
    if ball.vel.dot(overlap.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, overlap.normal);
    }
}

/// Apply gravity, damping and motion to the ball
pub fn integrate_ball(ball: &mut Ball, dt: f32) {
    if let Some(g) = ball.gravity {
        ball.vel.y += g * dt;
    }
    if ball.drag < 1.0 {
        ball.vel *= ball.drag.powf(dt);
    }
    ball.pos += ball.vel * dt;
}

/// Apply acceleration (or long-axis damping), speed cap, motion and the
/// playfield bounds to a paddle
pub fn integrate_paddle(paddle: &mut Paddle, bounds: &Rect, dt: f32) {
    let axis = paddle.axis;
    let mut vel = axis.to_local(paddle.vel);
    let accel = axis.to_local(paddle.accel);

    if accel.x != 0.0 {
        vel.x += accel.x * dt;
    } else {
        vel.x *= paddle.drag.powf(dt);
    }
    vel.y += accel.y * dt;
    paddle.vel = axis.to_world(vel).clamp_length_max(paddle.max_speed);
    paddle.pos += paddle.vel * dt;

    confine_paddle(paddle, bounds);
}

/// Keep a paddle inside `bounds`, bouncing off the edges
pub fn confine_paddle(paddle: &mut Paddle, bounds: &Rect) {
    let half = paddle.rect().half;
    let lo = bounds.min() + half;
    let hi = bounds.max() - half;

    if paddle.pos.x < lo.x {
        paddle.pos.x = lo.x;
        paddle.vel.x = paddle.vel.x.abs() * paddle.bounce;
    } else if paddle.pos.x > hi.x {
        paddle.pos.x = hi.x;
        paddle.vel.x = -paddle.vel.x.abs() * paddle.bounce;
    }
    if paddle.pos.y < lo.y {
        paddle.pos.y = lo.y;
        paddle.vel.y = paddle.vel.y.abs() * paddle.bounce;
    } else if paddle.pos.y > hi.y {
        paddle.pos.y = hi.y;
        paddle.vel.y = -paddle.vel.y.abs() * paddle.bounce;
    }
}

/// Integrate the ball and the driven paddles
pub fn integrate(ctx: &mut SimContext, dt: f32) {
    integrate_ball(&mut ctx.ball, dt);
    let bounds = ctx.paddle_bounds();
    for paddle in ctx.paddles.iter_mut().filter(|p| p.link.is_driven()) {
        integrate_paddle(paddle, &bounds, dt);
    }
}

/// Detect ball contacts in a stable order (paddles, walls, bumpers, bricks),
/// separating the ball from solid colliders as they are found
pub fn collide(ctx: &mut SimContext) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let radius = ctx.ball.radius;

    for paddle in &ctx.paddles {
        if circle_rect_overlap(ctx.ball.pos, radius, &paddle.rect()).is_some() {
            contacts.push(Contact {
                kind: ContactKind::BallPaddle,
                other: paddle.id,
            });
        }
    }

    for wall in &ctx.walls {
        if let Some(overlap) = circle_rect_overlap(ctx.ball.pos, radius, &wall.rect) {
            separate(&mut ctx.ball, overlap);
            contacts.push(Contact {
                kind: ContactKind::BallWall,
                other: wall.id,
            });
        }
    }

    for bumper in &ctx.bumpers {
        if let Some(overlap) = circle_circle_overlap(ctx.ball.pos, radius, bumper.pos, bumper.radius) {
            separate(&mut ctx.ball, overlap);
            contacts.push(Contact {
                kind: ContactKind::BallBumper,
                other: bumper.id,
            });
        }
    }

    for brick in ctx.bricks.iter().filter(|b| b.alive) {
        if let Some(overlap) = circle_rect_overlap(ctx.ball.pos, radius, &brick.rect) {
            separate(&mut ctx.ball, overlap);
            contacts.push(Contact {
                kind: ContactKind::BallBrick,
                other: brick.id,
            });
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::correction::ContactAxis;
    use crate::sim::state::{Bumper, WallSegment};

    #[test]
    fn test_circle_rect_overlap_outside_and_touching() {
        let rect = Rect::from_corner(0.0, 0.0, 100.0, 30.0);
        assert!(circle_rect_overlap(Vec2::new(50.0, 45.0), 10.0, &rect).is_none());

        let hit = circle_rect_overlap(Vec2::new(50.0, 36.0), 10.0, &rect).unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert!((hit.penetration - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_overlap_center_inside() {
        let rect = Rect::from_corner(0.0, 0.0, 100.0, 30.0);
        let hit = circle_rect_overlap(Vec2::new(50.0, 27.0), 10.0, &rect).unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert!((hit.penetration - 13.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_circle_overlap() {
        assert!(circle_circle_overlap(Vec2::new(0.0, 0.0), 10.0, Vec2::new(30.0, 0.0), 18.0).is_none());
        let hit = circle_circle_overlap(Vec2::new(0.0, 0.0), 10.0, Vec2::new(20.0, 0.0), 18.0).unwrap();
        assert_eq!(hit.normal, Vec2::NEG_X);
        assert!((hit.penetration - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_separate_reflects_only_when_approaching() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(&tuning);
        ball.pos = Vec2::new(0.0, 0.0);
        ball.vel = Vec2::new(100.0, 50.0);
        let overlap = Overlap {
            normal: Vec2::NEG_X,
            penetration: 2.0,
        };
        separate(&mut ball, overlap);
        assert_eq!(ball.pos, Vec2::new(-2.0, 0.0));
        assert_eq!(ball.vel, Vec2::new(-100.0, 50.0));

        // already leaving: no second flip
        separate(&mut ball, overlap);
        assert_eq!(ball.vel, Vec2::new(-100.0, 50.0));
    }

    #[test]
    fn test_ball_gravity_and_drag() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(&tuning);
        ball.vel = Vec2::new(100.0, 0.0);
        ball.gravity = Some(1000.0);
        ball.drag = 1.0;
        integrate_ball(&mut ball, 0.5);
        assert_eq!(ball.vel, Vec2::new(100.0, 500.0));

        ball.gravity = None;
        ball.drag = 0.5;
        ball.vel = Vec2::new(100.0, 0.0);
        integrate_ball(&mut ball, 1.0);
        assert!((ball.vel.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_acceleration_and_speed_cap() {
        let tuning = Tuning::default();
        let bounds = Rect::from_corner(30.0, 30.0, 590.0, 708.0);
        let mut paddle = Paddle::new(1, Vec2::new(300.0, 710.0), ContactAxis::Horizontal, &tuning);
        paddle.accel = Vec2::new(4000.0, 0.0);
        integrate_paddle(&mut paddle, &bounds, 0.1);
        assert!((paddle.vel.x - 400.0).abs() < 1e-3);

        paddle.accel = Vec2::new(400_000.0, 0.0);
        integrate_paddle(&mut paddle, &bounds, 0.1);
        assert!(paddle.vel.length() <= paddle.max_speed + 1e-3);
    }

    #[test]
    fn test_paddle_drag_without_input() {
        let tuning = Tuning::default();
        let bounds = Rect::from_corner(30.0, 30.0, 590.0, 708.0);
        let mut paddle = Paddle::new(1, Vec2::new(300.0, 710.0), ContactAxis::Horizontal, &tuning);
        paddle.vel = Vec2::new(500.0, 0.0);
        integrate_paddle(&mut paddle, &bounds, 1.0 / 60.0);
        assert!(paddle.vel.x < 500.0);
        assert!(paddle.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_bounces_off_bounds() {
        let tuning = Tuning::default();
        let bounds = Rect::from_corner(30.0, 30.0, 590.0, 708.0);
        let mut paddle = Paddle::new(1, Vec2::new(79.0, 710.0), ContactAxis::Horizontal, &tuning);
        paddle.vel = Vec2::new(-1000.0, 0.0);
        paddle.accel = Vec2::new(-4000.0, 0.0);
        integrate_paddle(&mut paddle, &bounds, 1.0 / 60.0);
        assert_eq!(paddle.pos.x, 80.0);
        assert!(paddle.vel.x > 0.0);
        assert!(paddle.vel.x <= 2000.0 * paddle.bounce);
    }

    #[test]
    fn test_collide_orders_and_separates() {
        let mut ctx = SimContext::new(Tuning::default(), 1);
        let wall_id = ctx.next_entity_id();
        ctx.walls.push(WallSegment {
            id: wall_id,
            rect: Rect::from_corner(0.0, 0.0, 650.0, 30.0),
        });
        let bumper_id = ctx.next_entity_id();
        ctx.bumpers.push(Bumper {
            id: bumper_id,
            pos: Vec2::new(400.0, 300.0),
            radius: 18.0,
            boost: 2.6,
        });

        ctx.ball.pos = Vec2::new(200.0, 35.0);
        ctx.ball.vel = Vec2::new(50.0, -300.0);
        let contacts = collide(&mut ctx);
        assert_eq!(
            contacts,
            vec![Contact {
                kind: ContactKind::BallWall,
                other: wall_id
            }]
        );
        assert_eq!(ctx.ball.pos.y, 40.0);
        assert_eq!(ctx.ball.vel, Vec2::new(50.0, 300.0));

        ctx.ball.pos = Vec2::new(400.0, 275.0);
        ctx.ball.vel = Vec2::new(0.0, 200.0);
        let contacts = collide(&mut ctx);
        assert_eq!(contacts[0].kind, ContactKind::BallBumper);
        assert_eq!(ctx.ball.vel, Vec2::new(0.0, -200.0));
    }
}
