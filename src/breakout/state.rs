//! Brick breaker state
//!
//! All mutable state of one brick breaker session lives in [`BrickBreaker`].

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::BestScore;
use crate::sim::{GameEvent, GamePhase, Playfield, RandomSource, Rect, Side, seeded_rng};
use crate::tuning::BreakoutTuning;
use crate::with_speed;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Target speed; `vel` is kept at this magnitude
    pub speed: f32,
}

impl Ball {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
        }
    }

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

    /// Place at `origin` and launch upward at `speed` in a random direction
    pub fn launch(&mut self, origin: Vec2, speed: f32, tuning: &BreakoutTuning, rng: &mut impl RandomSource) {
        let angle_roll = rng.next_unit();
        let side_roll = rng.next_unit();
        self.pos = origin;
        self.speed = speed;
        self.vel = launch_velocity(speed, angle_roll, side_roll, tuning);
    }

    /// Speed up by `factor` (capped) and re-project velocity onto the new speed
    pub fn increase_speed(&mut self, factor: f32, max_speed: f32) {
        self.speed = (self.speed * factor).min(max_speed);
        self.vel = with_speed(self.vel, self.speed);
    }
}

/// Launch velocity from two uniform samples.
///
/// `angle_roll` picks the elevation in `[min, min + span)` degrees, and
/// `side_roll > 0.5` sends the ball right. Vertical velocity is always upward.
pub fn launch_velocity(speed: f32, angle_roll: f32, side_roll: f32, tuning: &BreakoutTuning) -> Vec2 {
    let angle = (tuning.launch_min_deg + angle_roll * tuning.launch_span_deg).to_radians();
    let dir = if side_roll > 0.5 { 1.0 } else { -1.0 };
    Vec2::new(speed * angle.cos() * dir, -speed * angle.sin())
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(field: &Playfield, tuning: &BreakoutTuning) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: field.height - tuning.paddle_bottom_offset,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        };
        paddle.center_on(field.mid_x(), field.width);
        paddle
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Confine to `[0, field_width - width]`
    pub fn clamp(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    /// Centre on `x`, then clamp
    pub fn center_on(&mut self, x: f32, field_width: f32) {
        self.x = x - self.width / 2.0;
        self.clamp(field_width);
    }

    /// Slide horizontally by `dx`, then clamp
    pub fn nudge(&mut self, dx: f32, field_width: f32) {
        self.x += dx;
        self.clamp(field_width);
    }
}

/// A destructible brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub column: u32,
    pub row: u32,
    pub alive: bool,
}

/// Fixed row/column grid of bricks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    pub bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Fresh grid with every brick alive
    pub fn build(field: &Playfield, tuning: &BreakoutTuning) -> Self {
        let mut bricks = Vec::with_capacity((tuning.brick_columns * tuning.brick_rows) as usize);
        for column in 0..tuning.brick_columns {
            for row in 0..tuning.brick_rows {
                bricks.push(Brick {
                    rect: brick_rect(column, row, field, tuning),
                    column,
                    row,
                    alive: true,
                });
            }
        }
        Self { bricks }
    }

    /// Grid from explicit bricks (custom layouts, tests)
    pub fn from_bricks(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    /// Recompute geometry for a new playfield, keeping alive flags
    pub fn relayout(&mut self, field: &Playfield, tuning: &BreakoutTuning) {
        for brick in &mut self.bricks {
            brick.rect = brick_rect(brick.column, brick.row, field, tuning);
        }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}

fn brick_rect(column: u32, row: u32, field: &Playfield, tuning: &BreakoutTuning) -> Rect {
    let width = tuning.brick_width(field.width);
    let height = tuning.brick_height;
    Rect::new(
        tuning.brick_offset_left + column as f32 * (width + tuning.brick_padding),
        tuning.brick_offset_top + row as f32 * (height + tuning.brick_padding),
        width,
        height,
    )
}

/// Complete brick breaker session
#[derive(Debug, Clone)]
pub struct BrickBreaker<R = Pcg32> {
    pub playfield: Playfield,
    pub tuning: BreakoutTuning,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Bricks in the grid when the game started; clearing them all wins
    pub bricks_total: u32,
    pub best: BestScore,
    pub(crate) rng: R,
}

impl BrickBreaker<Pcg32> {
    /// Session on the default 800x600 playfield with a seeded RNG
    pub fn seeded(seed: u64) -> Self {
        let tuning = BreakoutTuning::default();
        let field = Playfield::new(crate::consts::MAX_PLAYFIELD_WIDTH, tuning.max_height);
        Self::new(field, tuning, seeded_rng(seed))
    }
}

impl<R: RandomSource> BrickBreaker<R> {
    pub fn new(playfield: Playfield, tuning: BreakoutTuning, rng: R) -> Self {
        let mut game = Self {
            playfield,
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            lives: tuning.starting_lives,
            ball: Ball::new(tuning.ball_radius, tuning.base_speed),
            paddle: Paddle::new(&playfield, &tuning),
            bricks: BrickGrid::build(&playfield, &tuning),
            bricks_total: 0,
            best: BestScore::default(),
            rng,
        };
        game.bricks_total = game.bricks.len() as u32;
        game.reset_ball();
        game
    }

    pub fn with_best_score(mut self, best: BestScore) -> Self {
        self.best = best;
        self
    }

    /// Start (or restart) a game: fresh grid, score, lives and ball
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.bricks = BrickGrid::build(&self.playfield, &self.tuning);
        self.bricks_total = self.bricks.len() as u32;
        self.reset_ball();
        log::info!("Brick breaker started ({} bricks)", self.bricks_total);

        vec![
            GameEvent::ScoreChanged {
                side: Side::Player,
                score: 0,
            },
            GameEvent::LivesChanged(self.lives),
        ]
    }

    /// Ball back above the paddle with a fresh launch; paddle re-centred
    pub fn reset_ball(&mut self) {
        let origin = Vec2::new(
            self.playfield.mid_x(),
            self.playfield.height - self.tuning.ball_spawn_offset,
        );
        self.ball
            .launch(origin, self.tuning.base_speed, &self.tuning, &mut self.rng);
        self.paddle.center_on(self.playfield.mid_x(), self.playfield.width);
    }

    /// Pause/resume. Only valid while running; returns the new pause state.
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            _ => return None,
        };
        let paused = self.phase == GamePhase::Paused;
        log::debug!("Brick breaker paused: {}", paused);
        Some(GameEvent::PauseChanged(paused))
    }

    /// Apply new playfield dimensions between steps
    pub fn resize(&mut self, playfield: Playfield) {
        log::debug!("Brick breaker resized to {}x{}", playfield.width, playfield.height);
        self.playfield = playfield;
        self.paddle.y = playfield.height - self.tuning.paddle_bottom_offset;
        self.paddle.clamp(playfield.width);
        self.bricks.relayout(&playfield, &self.tuning);

        if self.phase.is_running() {
            self.ball.pos = playfield.clamp_circle(self.ball.pos, self.ball.radius);
        } else {
            self.reset_ball();
        }
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> BreakoutView<'_> {
        BreakoutView {
            playfield: self.playfield,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            best_score: self.best.value,
            ball: self.ball,
            paddle: self.paddle,
            bricks: &self.bricks.bricks,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct BreakoutView<'a> {
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub best_score: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: &'a [Brick],
}
