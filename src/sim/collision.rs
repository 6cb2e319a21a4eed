//! Collision helpers for projectiles
//!
//! Shots only ever meet two kinds of obstacle: the side walls, which they
//! bounce off, and round bubbles, which they stick to.

use glam::Vec2;

/// Result of a wall check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal (pointing back into the play field)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Do two circles overlap, after shrinking the combined radius by `slack`?
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, slack: f32) -> bool {
    let reach = ra + rb - slack;
    a.distance_squared(b) <= reach * reach
}

/// Check a circle against the left (x = 0) and right (x = width) walls
pub fn side_wall_collision(pos: Vec2, radius: f32, width: f32) -> CollisionResult {
    if pos.x < radius {
        return CollisionResult {
            hit: true,
            normal: Vec2::X,
            penetration: radius - pos.x,
        };
    }
    if pos.x > width - radius {
        return CollisionResult {
            hit: true,
            normal: Vec2::NEG_X,
            penetration: pos.x - (width - radius),
        };
    }
    CollisionResult::miss()
}

/// Move a circle one step, bouncing off the side walls.
///
/// A bounce clamps the circle back inside and only ever points the
/// horizontal velocity away from the wall it touched, so a shot pinned in a
/// corner cannot flip back and forth.
pub fn step_with_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32, dt: f32) -> bool {
    *pos += *vel * dt;

    let wall = side_wall_collision(*pos, radius, width);
    if !wall.hit {
        return false;
    }
    *pos += wall.normal * wall.penetration;
    if vel.dot(wall.normal) < 0.0 {
        *vel = reflect_velocity(*vel, wall.normal);
    }
    true
}
