//! Playfield dimensions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PLAYFIELD_WIDTH, VIEWPORT_HEIGHT_RATIO, VIEWPORT_WIDTH_RATIO};

/// Rectangular playing area. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fit the playfield to a host viewport, capped at 800 wide and `max_height` tall
    pub fn fit_viewport(viewport_width: f32, viewport_height: f32, max_height: f32) -> Self {
        Self {
            width: (viewport_width * VIEWPORT_WIDTH_RATIO).min(MAX_PLAYFIELD_WIDTH),
            height: (viewport_height * VIEWPORT_HEIGHT_RATIO).min(max_height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Clamp a circle's centre so the whole circle stays inside
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, (self.width - radius).max(radius)),
            pos.y.clamp(radius, (self.height - radius).max(radius)),
        )
    }
}
