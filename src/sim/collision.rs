//! Collision detection and response for circles and rectangles
//!
//! Balls, pucks and mallets are circles; paddles and bricks are axis-aligned
//! rectangles. Everything is in playfield coordinates (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Point strictly inside (edges excluded)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Overlap between this rectangle and a circle's bounding box
    pub fn overlaps_circle_bounds(&self, center: Vec2, radius: f32) -> bool {
        center.y + radius > self.y
            && center.y - radius < self.bottom()
            && center.x + radius > self.x
            && center.x - radius < self.right()
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the other body toward the moving body
    pub normal: Vec2,
    /// Overlap depth (for position correction)
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

/// Check whether circle `a` overlaps circle `b`.
///
/// The normal points from `b` to `a`. Coincident centres have no usable
/// normal and are reported as a miss.
pub fn circle_circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let distance = delta.length();
    let reach = a_radius + b_radius;

    if distance >= reach || distance <= f32::EPSILON {
        return CollisionResult::miss();
    }

    let normal = delta / distance;
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - distance,
    }
}

/// Tuning for an energetic circle/circle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseParams {
    pub restitution: f32,
    /// Post-hit speed floor
    pub min_speed: f32,
    /// Post-hit speed cap
    pub max_speed: f32,
}

/// Resolve a hit between a moving circle and a position-driven body.
///
/// `pos`/`vel` belong to the light body (puck); `other_vel` is the struck
/// body's derived velocity. The light body is pushed out of the overlap
/// first. Returns `false` when the bodies are already separating, in which
/// case velocity is left alone.
pub fn resolve_impulse(
    pos: &mut Vec2,
    vel: &mut Vec2,
    contact: &CollisionResult,
    other_vel: Vec2,
    params: &ImpulseParams,
) -> bool {
    if !contact.hit {
        return false;
    }
    let n = contact.normal;
    *pos += n * contact.penetration;

    let vel_along_normal = (*vel - other_vel).dot(n);
    if vel_along_normal > 0.0 {
        return false;
    }

    let j = -(1.0 + params.restitution) * vel_along_normal;
    *vel += n * j;

    let speed = vel.length();
    if speed < params.min_speed {
        // Too slow to feel like a hit: push along the normal up to the floor
        *vel = (*vel + n * params.min_speed).normalize_or(n) * params.min_speed;
    }
    *vel = vel.clamp_length_max(params.max_speed);
    true
}

/// Bounce velocity off a paddle with "english".
///
/// `offset` is the impact point relative to the paddle centre, normalised so
/// the paddle edges are ±1 (values beyond are allowed). The result always
/// points up and has magnitude `speed`.
pub fn paddle_english(offset: f32, speed: f32, english_factor: f32, max_vx_fraction: f32) -> Vec2 {
    let max_vx = speed * max_vx_fraction;
    let vx = (offset * speed * english_factor).clamp(-max_vx, max_vx);
    let vy = -(speed * speed - vx * vx).max(0.0).sqrt();
    Vec2::new(vx, vy)
}
