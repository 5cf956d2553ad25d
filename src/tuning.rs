//! Data-driven game balance
//!
//! Every number the physics step reads lives here so hosts can ship a JSON
//! override without rebuilding. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::{breakout, hockey};
use crate::sim::ImpulseParams;

/// Brick breaker balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutTuning {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_offset: f32,
    pub paddle_key_speed: f32,

    pub ball_radius: f32,
    pub ball_spawn_offset: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_growth: f32,
    pub english_factor: f32,
    pub max_vx_fraction: f32,
    pub launch_min_deg: f32,
    pub launch_span_deg: f32,

    pub brick_rows: u32,
    pub brick_columns: u32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
    pub brick_height: f32,

    pub starting_lives: u32,
    /// Tallest playfield a viewport can produce
    pub max_height: f32,
}

impl Default for BreakoutTuning {
    fn default() -> Self {
        Self {
            paddle_width: breakout::PADDLE_WIDTH,
            paddle_height: breakout::PADDLE_HEIGHT,
            paddle_bottom_offset: breakout::PADDLE_BOTTOM_OFFSET,
            paddle_key_speed: breakout::PADDLE_KEY_SPEED,

            ball_radius: breakout::BALL_RADIUS,
            ball_spawn_offset: breakout::BALL_SPAWN_OFFSET,
            base_speed: breakout::BASE_SPEED,
            max_speed: breakout::MAX_SPEED,
            speed_growth: breakout::SPEED_GROWTH,
            english_factor: breakout::ENGLISH_FACTOR,
            max_vx_fraction: breakout::MAX_VX_FRACTION,
            launch_min_deg: breakout::LAUNCH_MIN_DEG,
            launch_span_deg: breakout::LAUNCH_SPAN_DEG,

            brick_rows: breakout::BRICK_ROWS,
            brick_columns: breakout::BRICK_COLUMNS,
            brick_padding: breakout::BRICK_PADDING,
            brick_offset_top: breakout::BRICK_OFFSET_TOP,
            brick_offset_left: breakout::BRICK_OFFSET_LEFT,
            brick_height: breakout::BRICK_HEIGHT,

            starting_lives: breakout::STARTING_LIVES,
            max_height: breakout::PLAYFIELD_HEIGHT,
        }
    }
}

impl BreakoutTuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Brick width that makes the grid span the playfield between its side offsets
    pub fn brick_width(&self, playfield_width: f32) -> f32 {
        let columns = self.brick_columns.max(1) as f32;
        let gaps = self.brick_padding * (columns - 1.0);
        ((playfield_width - self.brick_offset_left * 2.0 - gaps) / columns).max(0.0)
    }
}

/// Air hockey balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HockeyTuning {
    pub puck_radius: f32,
    pub mallet_radius: f32,
    pub goal_size: f32,
    pub win_score: u32,

    pub friction_per_second: f32,
    pub restitution: f32,
    pub min_hit_speed: f32,
    pub max_puck_speed: f32,

    pub player_home_x: f32,
    pub opponent_home_x: f32,

    pub opponent_speed: f32,
    pub opponent_defensive_factor: f32,
    pub opponent_strike_factor: f32,
    pub opponent_strike_line: f32,
    pub opponent_dead_zone: f32,
    pub opponent_defensive_dead_zone: f32,

    /// Tallest playfield a viewport can produce
    pub max_height: f32,
}

impl Default for HockeyTuning {
    fn default() -> Self {
        Self {
            puck_radius: hockey::PUCK_RADIUS,
            mallet_radius: hockey::MALLET_RADIUS,
            goal_size: hockey::GOAL_SIZE,
            win_score: hockey::WIN_SCORE,

            friction_per_second: hockey::FRICTION_PER_SECOND,
            restitution: hockey::RESTITUTION,
            min_hit_speed: hockey::MIN_HIT_SPEED,
            max_puck_speed: hockey::MAX_PUCK_SPEED,

            player_home_x: hockey::PLAYER_HOME_X,
            opponent_home_x: hockey::OPPONENT_HOME_X,

            opponent_speed: hockey::OPPONENT_SPEED,
            opponent_defensive_factor: hockey::OPPONENT_DEFENSIVE_FACTOR,
            opponent_strike_factor: hockey::OPPONENT_STRIKE_FACTOR,
            opponent_strike_line: hockey::OPPONENT_STRIKE_LINE,
            opponent_dead_zone: hockey::OPPONENT_DEAD_ZONE,
            opponent_defensive_dead_zone: hockey::OPPONENT_DEFENSIVE_DEAD_ZONE,

            max_height: hockey::PLAYFIELD_HEIGHT,
        }
    }
}

impl HockeyTuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn impulse(&self) -> ImpulseParams {
        ImpulseParams {
            restitution: self.restitution,
            min_speed: self.min_hit_speed,
            max_speed: self.max_puck_speed,
        }
    }
}
