//! Air hockey state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_DT, MIN_DT};
use crate::sim::{GameEvent, GamePhase, Outcome, Playfield, Side};
use crate::tuning::HockeyTuning;

/// The puck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Puck {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A position-driven mallet.
///
/// Mallets are set directly (pointer or AI), never integrated, so their
/// velocity is derived from how far they moved since the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mallet {
    pub side: Side,
    pub pos: Vec2,
    /// Position at the previous step
    pub last_pos: Vec2,
    /// Derived once per step from `pos - last_pos`
    pub vel: Vec2,
    pub radius: f32,
}

impl Mallet {
    pub fn new(side: Side, pos: Vec2, radius: f32) -> Self {
        Self {
            side,
            pos,
            last_pos: pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Teleport without implying any velocity
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.last_pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Allowed centre range: own half, full height, inset by the radius
    pub fn bounds(&self, field: &Playfield) -> (Vec2, Vec2) {
        let r = self.radius;
        let (min_x, max_x) = match self.side {
            Side::Player => (r, field.mid_x() - r),
            Side::Opponent => (field.mid_x() + r, field.width - r),
        };
        (
            Vec2::new(min_x, r),
            Vec2::new(max_x.max(min_x), (field.height - r).max(r)),
        )
    }

    pub fn clamp_to_half(&mut self, field: &Playfield) {
        let (min, max) = self.bounds(field);
        self.pos = self.pos.clamp(min, max);
    }

    /// Derive velocity from this step's displacement.
    ///
    /// A near-zero dt falls back to one 60 Hz frame instead of dividing by it.
    pub fn derive_velocity(&mut self, dt: f32) {
        let dt = if dt < MIN_DT { FALLBACK_DT } else { dt };
        self.vel = (self.pos - self.last_pos) / dt;
    }
}

/// Complete air hockey session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hockey {
    pub playfield: Playfield,
    pub tuning: HockeyTuning,
    pub phase: GamePhase,
    pub player_score: u32,
    pub opponent_score: u32,
    pub puck: Puck,
    pub player: Mallet,
    pub opponent: Mallet,
}

impl Default for Hockey {
    fn default() -> Self {
        let tuning = HockeyTuning::default();
        Self::new(
            Playfield::new(crate::consts::MAX_PLAYFIELD_WIDTH, tuning.max_height),
            tuning,
        )
    }
}

impl Hockey {
    pub fn new(playfield: Playfield, tuning: HockeyTuning) -> Self {
        let mut game = Self {
            playfield,
            tuning,
            phase: GamePhase::Ready,
            player_score: 0,
            opponent_score: 0,
            puck: Puck {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: tuning.puck_radius,
            },
            player: Mallet::new(Side::Player, Vec2::ZERO, tuning.mallet_radius),
            opponent: Mallet::new(Side::Opponent, Vec2::ZERO, tuning.mallet_radius),
        };
        game.reset_positions();
        game
    }

    /// Start (or restart) a match
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.phase = GamePhase::Playing;
        self.player_score = 0;
        self.opponent_score = 0;
        self.reset_positions();
        log::info!("Hockey match started, first to {}", self.tuning.win_score);

        vec![
            GameEvent::ScoreChanged {
                side: Side::Player,
                score: 0,
            },
            GameEvent::ScoreChanged {
                side: Side::Opponent,
                score: 0,
            },
        ]
    }

    /// Puck to centre at rest, mallets to their home spots
    pub fn reset_positions(&mut self) {
        let field = self.playfield;
        let mid_y = field.height / 2.0;
        self.puck.pos = field.center();
        self.puck.vel = Vec2::ZERO;
        self.player
            .place(Vec2::new(field.width * self.tuning.player_home_x, mid_y));
        self.opponent
            .place(Vec2::new(field.width * self.tuning.opponent_home_x, mid_y));
    }

    /// Vertical band of each short edge where a crossing puck scores
    pub fn goal_band(&self) -> (f32, f32) {
        let mid = self.playfield.height / 2.0;
        let half = self.tuning.goal_size / 2.0;
        (mid - half, mid + half)
    }

    /// Puck centre strictly inside the goal band
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        let (top, bottom) = self.goal_band();
        y > top && y < bottom
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Credit a goal, check the winning score and re-centre everything
    pub fn register_goal(&mut self, scorer: Side, events: &mut Vec<GameEvent>) {
        match scorer {
            Side::Player => self.player_score += 1,
            Side::Opponent => self.opponent_score += 1,
        }
        let score = self.score(scorer);
        log::info!(
            "Goal for {:?}: {} - {}",
            scorer,
            self.player_score,
            self.opponent_score
        );
        events.push(GameEvent::Goal(scorer));
        events.push(GameEvent::ScoreChanged { side: scorer, score });

        if score >= self.tuning.win_score {
            let outcome = match scorer {
                Side::Player => Outcome::PlayerWins,
                Side::Opponent => Outcome::OpponentWins,
            };
            self.phase = GamePhase::GameOver(outcome);
            log::info!("Hockey match over: {:?}", outcome);
            events.push(GameEvent::GameOver(outcome));
        }
        self.reset_positions();
    }

    /// Pause/resume. Only valid while a match is running.
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            _ => return None,
        };
        let paused = self.phase == GamePhase::Paused;
        log::debug!("Hockey paused: {}", paused);
        Some(GameEvent::PauseChanged(paused))
    }

    /// Apply new table dimensions between steps
    pub fn resize(&mut self, playfield: Playfield) {
        log::debug!("Hockey table resized to {}x{}", playfield.width, playfield.height);
        self.playfield = playfield;
        if self.phase.is_running() {
            self.puck.pos = playfield.clamp_circle(self.puck.pos, self.puck.radius);
            for mallet in [&mut self.player, &mut self.opponent] {
                mallet.clamp_to_half(&playfield);
                mallet.last_pos = mallet.pos;
            }
        } else {
            self.reset_positions();
        }
    }
}
