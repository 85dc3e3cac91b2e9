//! Collision detection and response for axis-aligned play fields
//!
//! Deliberately simple: edge crossings, a one-sided paddle overlap test and
//! velocity sign flips. No continuous detection, no restitution.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::sign;

/// A field boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// The paddle face a ball can strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Horizontal paddle, struck from above (breakout)
    Top,
    /// Vertical paddle on the left side, struck from the right
    Right,
    /// Vertical paddle on the right side, struck from the left
    Left,
}

/// Whether the ball's edge facing `edge` is beyond that boundary
pub fn past_edge(ball: &Ball, field: Vec2, edge: Edge) -> bool {
    match edge {
        Edge::Left => ball.pos.x - ball.radius < 0.0,
        Edge::Right => ball.pos.x + ball.radius > field.x,
        Edge::Top => ball.pos.y - ball.radius < 0.0,
        Edge::Bottom => ball.pos.y + ball.radius > field.y,
    }
}

/// Whether the ball is travelling toward `edge`
pub fn moving_toward(ball: &Ball, edge: Edge) -> bool {
    match edge {
        Edge::Left => ball.vel.x < 0.0,
        Edge::Right => ball.vel.x > 0.0,
        Edge::Top => ball.vel.y < 0.0,
        Edge::Bottom => ball.vel.y > 0.0,
    }
}

/// Reflect off `edge` if the ball's leading edge has crossed it.
/// Returns true when a reflection happened.
pub fn reflect_off_wall(ball: &mut Ball, field: Vec2, edge: Edge) -> bool {
    if !(past_edge(ball, field, edge) && moving_toward(ball, edge)) {
        return false;
    }
    match edge {
        Edge::Left | Edge::Right => ball.vel.x = -ball.vel.x,
        Edge::Top | Edge::Bottom => ball.vel.y = -ball.vel.y,
    }
    true
}

/// One-sided paddle test: the ball edge nearest the paddle overlaps the
/// paddle's near extent, the ball center lies strictly within the paddle's
/// span on the other axis, and the ball is heading into the face.
pub fn paddle_hit(ball: &Ball, paddle: &Paddle, face: Face) -> bool {
    let within_x = ball.pos.x > paddle.pos.x && ball.pos.x < paddle.pos.x + paddle.size.x;
    let within_y = ball.pos.y > paddle.pos.y && ball.pos.y < paddle.pos.y + paddle.size.y;
    match face {
        Face::Top => ball.pos.y + ball.radius > paddle.pos.y && within_x && ball.vel.y > 0.0,
        Face::Right => {
            ball.pos.x - ball.radius < paddle.pos.x + paddle.size.x && within_y && ball.vel.x < 0.0
        }
        Face::Left => ball.pos.x + ball.radius > paddle.pos.x && within_y && ball.vel.x > 0.0,
    }
}

/// Paddle bounce response: flip the component along the face normal, then
/// push both components `increment` further in their current direction.
pub fn paddle_bounce(vel: Vec2, face: Face, increment: f32) -> Vec2 {
    let reflected = match face {
        Face::Top => Vec2::new(vel.x, -vel.y),
        Face::Right | Face::Left => Vec2::new(-vel.x, vel.y),
    };
    Vec2::new(
        reflected.x + increment * sign(reflected.x),
        reflected.y + increment * sign(reflected.y),
    )
}
