//! Neon Arcade - brick breaker and air hockey for a browser canvas
//!
//! Core modules:
//! - `sim`: Shared simulation plumbing (frame clock, collisions, events, randomness)
//! - `breakout`: Paddle-and-ball brick breaker
//! - `hockey`: Two-mallet air hockey with a reactive opponent
//! - `input`: Pointer/touch/keyboard adapters
//! - `driver`: Per-frame driver wiring clock, input, simulation and observers
//! - `persistence` / `highscores` / `settings` / `tuning`: Stored data and game balance
//! - `platform`: Browser/native storage backends

pub mod breakout;
pub mod driver;
pub mod highscores;
pub mod hockey;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use breakout::BrickBreaker;
pub use driver::{FrameDriver, Simulation};
pub use highscores::BestScore;
pub use hockey::Hockey;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, Observer, Outcome, Playfield, Side};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default cap on a single frame's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Below this dt a derived velocity would blow up
    pub const MIN_DT: f32 = 1.0e-4;
    /// Frame duration assumed when dt is too small to divide by
    pub const FALLBACK_DT: f32 = 1.0 / 60.0;

    /// Playfield fitting relative to the host viewport
    pub const VIEWPORT_WIDTH_RATIO: f32 = 0.95;
    pub const VIEWPORT_HEIGHT_RATIO: f32 = 0.8;
    pub const MAX_PLAYFIELD_WIDTH: f32 = 800.0;

    /// Brick breaker defaults (pixels, pixels/second)
    pub mod breakout {
        pub const PLAYFIELD_HEIGHT: f32 = 600.0;

        pub const PADDLE_WIDTH: f32 = 100.0;
        pub const PADDLE_HEIGHT: f32 = 15.0;
        /// Distance from the paddle's top edge to the bottom of the playfield
        pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
        pub const PADDLE_KEY_SPEED: f32 = 500.0;

        pub const BALL_RADIUS: f32 = 8.0;
        /// Ball spawns this far above the bottom edge
        pub const BALL_SPAWN_OFFSET: f32 = 40.0;
        pub const BASE_SPEED: f32 = 300.0;
        pub const MAX_SPEED: f32 = 800.0;
        /// Speed multiplier per destroyed brick
        pub const SPEED_GROWTH: f32 = 1.02;
        /// Horizontal velocity per unit of paddle offset, as a fraction of speed
        pub const ENGLISH_FACTOR: f32 = 0.8;
        /// |vx| never exceeds this fraction of speed after a paddle hit
        pub const MAX_VX_FRACTION: f32 = 0.9;
        /// Launch angle is drawn from [MIN, MIN + SPAN) degrees above horizontal
        pub const LAUNCH_MIN_DEG: f32 = 45.0;
        pub const LAUNCH_SPAN_DEG: f32 = 45.0;

        pub const BRICK_ROWS: u32 = 5;
        pub const BRICK_COLUMNS: u32 = 8;
        pub const BRICK_PADDING: f32 = 10.0;
        pub const BRICK_OFFSET_TOP: f32 = 50.0;
        pub const BRICK_OFFSET_LEFT: f32 = 35.0;
        pub const BRICK_HEIGHT: f32 = 20.0;

        pub const STARTING_LIVES: u32 = 3;
    }

    /// Air hockey defaults (pixels, pixels/second)
    pub mod hockey {
        pub const PLAYFIELD_HEIGHT: f32 = 500.0;

        pub const PUCK_RADIUS: f32 = 15.0;
        pub const MALLET_RADIUS: f32 = 25.0;
        /// Height of the goal mouth centred on each short edge
        pub const GOAL_SIZE: f32 = 120.0;
        pub const WIN_SCORE: u32 = 7;

        /// Fraction of puck velocity left after one second of sliding (0.99 per 60 Hz frame)
        pub const FRICTION_PER_SECOND: f32 = 0.547_156;
        /// Greater than one: hits add energy
        pub const RESTITUTION: f32 = 1.2;
        pub const MIN_HIT_SPEED: f32 = 240.0;
        pub const MAX_PUCK_SPEED: f32 = 900.0;

        /// Home positions as a fraction of table width
        pub const PLAYER_HOME_X: f32 = 0.1;
        pub const OPPONENT_HOME_X: f32 = 0.9;

        pub const OPPONENT_SPEED: f32 = 300.0;
        pub const OPPONENT_DEFENSIVE_FACTOR: f32 = 0.8;
        pub const OPPONENT_STRIKE_FACTOR: f32 = 1.2;
        /// Opponent only strikes when the puck is past this fraction of table width
        pub const OPPONENT_STRIKE_LINE: f32 = 0.6;
        pub const OPPONENT_DEAD_ZONE: f32 = 5.0;
        pub const OPPONENT_DEFENSIVE_DEAD_ZONE: f32 = 10.0;
    }
}

/// Rescale a velocity to the given speed, keeping its direction.
///
/// A zero vector has no direction and is returned unchanged.
#[inline]
pub fn with_speed(vel: Vec2, speed: f32) -> Vec2 {
    let current = vel.length();
    if current > 0.0 {
        vel * (speed / current)
    } else {
        vel
    }
}

/// Move `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    current + (target - current).clamp(-max_step, max_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_speed_keeps_direction() {
        let v = with_speed(Vec2::new(3.0, -4.0), 10.0);
        assert!((v.x - 6.0).abs() < 1e-5);
        assert!((v.y + 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_with_speed_zero_vector() {
        assert_eq!(with_speed(Vec2::ZERO, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_approach_does_not_overshoot() {
        assert_eq!(approach(0.0, 3.0, 5.0), 3.0);
        assert_eq!(approach(0.0, 10.0, 5.0), 5.0);
        assert_eq!(approach(10.0, 0.0, 4.0), 6.0);
    }
}
