//! Brick breaker frame step
//!
//! One call advances the session by `dt` seconds in a fixed order:
//! input is applied to the paddle, then the ball is integrated and resolved
//! against walls, paddle and bricks, then scoring is evaluated.

use super::state::BrickBreaker;
use crate::sim::{GameEvent, GamePhase, Outcome, RandomSource, Side, paddle_english};

/// Controls for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Latest absolute pointer x in playfield coordinates
    pub pointer_x: Option<f32>,
    /// Held keys
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// -1, 0 or 1 from the held keys
    pub fn key_direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }
}

/// Advance the brick breaker by `dt` seconds
pub fn tick<R: RandomSource>(game: &mut BrickBreaker<R>, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if game.phase != GamePhase::Playing {
        return events;
    }

    apply_input(game, input, dt);
    step_ball(game, dt, &mut events);
    events
}

/// Input phase: pointer sets the paddle centre, held keys slide it
fn apply_input<R: RandomSource>(game: &mut BrickBreaker<R>, input: &TickInput, dt: f32) {
    let width = game.playfield.width;
    if let Some(x) = input.pointer_x {
        game.paddle.center_on(x, width);
    }
    let dir = input.key_direction();
    if dir != 0.0 {
        game.paddle.nudge(dir * game.tuning.paddle_key_speed * dt, width);
    }
}

fn step_ball<R: RandomSource>(game: &mut BrickBreaker<R>, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = game.tuning;
    let width = game.playfield.width;
    let height = game.playfield.height;
    let ball = &mut game.ball;

    ball.pos += ball.vel * dt;

    // Side walls
    if ball.right() > width || ball.left() < 0.0 {
        ball.vel.x = -ball.vel.x;
        if ball.right() > width {
            ball.pos.x = width - ball.radius;
        }
        if ball.left() < 0.0 {
            ball.pos.x = ball.radius;
        }
    }

    // Top wall / bottom gutter
    if ball.top() < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius;
    } else if ball.top() > height {
        lose_life(game, events);
        return;
    }

    // Paddle, only on the way down so a ball inside the paddle can't rebounce
    if ball.vel.y > 0.0 && game.paddle.bounds().overlaps_circle_bounds(ball.pos, ball.radius) {
        let half_width = game.paddle.width / 2.0;
        let offset = (ball.pos.x - game.paddle.center_x()) / half_width;
        ball.vel = paddle_english(offset, ball.speed, tuning.english_factor, tuning.max_vx_fraction);
        events.push(GameEvent::PaddleHit);
    }

    // Bricks: centre-in-rect, every live brick checked (several may fall per step)
    let mut hit_any = false;
    for brick in game.bricks.bricks.iter_mut().filter(|b| b.alive) {
        if !brick.rect.contains_point(ball.pos) {
            continue;
        }
        ball.vel.y = -ball.vel.y;
        brick.alive = false;
        game.score += 1;
        hit_any = true;
        ball.increase_speed(tuning.speed_growth, tuning.max_speed);

        events.push(GameEvent::BrickDestroyed {
            column: brick.column,
            row: brick.row,
        });
        events.push(GameEvent::ScoreChanged {
            side: Side::Player,
            score: game.score,
        });
    }

    if hit_any && game.score >= game.bricks_total {
        finish(game, Outcome::Win, events);
    }
}

fn lose_life<R: RandomSource>(game: &mut BrickBreaker<R>, events: &mut Vec<GameEvent>) {
    game.lives = game.lives.saturating_sub(1);
    events.push(GameEvent::BallLost);
    events.push(GameEvent::LivesChanged(game.lives));

    if game.lives == 0 {
        finish(game, Outcome::Loss, events);
    } else {
        game.reset_ball();
    }
}

/// Enter the terminal phase and record the best score
fn finish<R: RandomSource>(game: &mut BrickBreaker<R>, outcome: Outcome, events: &mut Vec<GameEvent>) {
    game.phase = GamePhase::GameOver(outcome);
    log::info!("Brick breaker over: {:?} with score {}", outcome, game.score);
    events.push(GameEvent::GameOver(outcome));

    if game.best.record(game.score) {
        log::info!("New best score: {}", game.best.value);
        events.push(GameEvent::NewBestScore(game.best.value));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::breakout::state::{Brick, BrickGrid};
    use crate::sim::{Playfield, Rect, ScriptedRandom};
    use crate::tuning::BreakoutTuning;

    fn playing(rolls: &[f32]) -> BrickBreaker<ScriptedRandom> {
        let mut game = BrickBreaker::new(
            Playfield::new(800.0, 600.0),
            BreakoutTuning::default(),
            ScriptedRandom::new(rolls.to_vec()),
        );
        game.start();
        game
    }

    fn single_brick(x: f32, y: f32, w: f32, h: f32) -> BrickGrid {
        BrickGrid::from_bricks(vec![Brick {
            rect: Rect::new(x, y, w, h),
            column: 0,
            row: 0,
            alive: true,
        }])
    }

    #[test]
    fn test_not_playing_is_a_no_op() {
        let mut game = BrickBreaker::new(
            Playfield::new(800.0, 600.0),
            BreakoutTuning::default(),
            ScriptedRandom::new([0.5]),
        );
        let before = game.ball;
        assert!(tick(&mut game, &TickInput::default(), 0.016).is_empty());
        assert_eq!(game.ball, before);
    }

    #[test]
    fn test_brick_hit_example() {
        let mut game = playing(&[0.0, 0.9]);
        game.bricks = single_brick(410.0, 270.0, 40.0, 20.0);
        game.bricks_total = 2; // keep the game running after the hit
        game.paddle.x = 0.0;
        game.ball.pos = Vec2::new(400.0, 300.0);
        game.ball.vel = Vec2::new(200.0, -200.0);
        game.ball.speed = game.ball.vel.length();
        let speed_before = game.ball.speed;

        let events = tick(&mut game, &TickInput::default(), 0.1);

        assert!((game.ball.pos - Vec2::new(420.0, 280.0)).length() < 1e-3);
        assert!(!game.bricks.bricks[0].alive);
        assert_eq!(game.score, 1);
        // vy flipped downward, then rescaled by the speed growth
        assert!(game.ball.vel.y > 0.0);
        assert!((game.ball.vel.x - game.ball.vel.y).abs() < 1e-3);
        assert!((game.ball.speed - speed_before * 1.02).abs() < 1e-3);
        assert!((game.ball.vel.length() - game.ball.speed).abs() < 1e-3);
        assert!(events.contains(&GameEvent::ScoreChanged { side: Side::Player, score: 1 }));
    }

    #[test]
    fn test_two_bricks_in_one_step() {
        let mut game = playing(&[0.0, 0.9]);
        game.bricks = BrickGrid::from_bricks(vec![
            Brick {
                rect: Rect::new(100.0, 100.0, 50.0, 20.0),
                column: 0,
                row: 0,
                alive: true,
            },
            Brick {
                rect: Rect::new(90.0, 95.0, 50.0, 30.0),
                column: 1,
                row: 0,
                alive: true,
            },
            Brick {
                rect: Rect::new(600.0, 100.0, 50.0, 20.0),
                column: 2,
                row: 0,
                alive: true,
            },
        ]);
        game.bricks_total = 3;
        game.ball.pos = Vec2::new(120.0, 110.0);
        game.ball.vel = Vec2::new(0.0, -300.0);
        game.ball.speed = 300.0;

        tick(&mut game, &TickInput::default(), 0.0);

        assert_eq!(game.score, 2);
        assert_eq!(game.bricks.alive_count(), 1);
        // Two flips cancel out
        assert!(game.ball.vel.y < 0.0);
        assert!((game.ball.speed - 300.0 * 1.02 * 1.02).abs() < 1e-2);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_clearing_all_bricks_wins_and_freezes() {
        let mut game = playing(&[0.0, 0.9]);
        game.bricks = single_brick(380.0, 290.0, 40.0, 20.0);
        game.bricks_total = 1;
        game.ball.pos = Vec2::new(400.0, 300.0);
        game.ball.vel = Vec2::new(0.0, -300.0);

        let events = tick(&mut game, &TickInput::default(), 0.0);
        assert_eq!(game.phase, GamePhase::GameOver(Outcome::Win));
        assert!(events.contains(&GameEvent::GameOver(Outcome::Win)));
        assert!(events.contains(&GameEvent::NewBestScore(1)));

        let frozen = game.ball;
        assert!(tick(&mut game, &TickInput::default(), 0.5).is_empty());
        assert_eq!(game.ball, frozen);
    }

    #[test]
    fn test_lost_ball_resets_upward() {
        // Every launch draws 67.5 degrees to the left
        let mut game = playing(&[0.5, 0.1]);
        game.ball.pos = Vec2::new(200.0, 605.0);
        game.ball.vel = Vec2::new(50.0, 300.0);

        let events = tick(&mut game, &TickInput::default(), 0.02);

        assert_eq!(game.lives, 2);
        assert!(events.contains(&GameEvent::LivesChanged(2)));
        assert_eq!(game.ball.pos, Vec2::new(400.0, 560.0));
        assert!(game.ball.vel.y < 0.0);
        // 67.5 degrees to the left
        let angle = 67.5_f32.to_radians();
        assert!((game.ball.vel.x + 300.0 * angle.cos()).abs() < 1e-3);
        assert!((game.ball.vel.y + 300.0 * angle.sin()).abs() < 1e-3);
        assert_eq!(game.ball.speed, 300.0);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_loses() {
        let mut game = playing(&[0.2, 0.8]);
        game.lives = 1;
        game.ball.pos = Vec2::new(200.0, 620.0);
        game.ball.vel = Vec2::new(0.0, 300.0);

        let events = tick(&mut game, &TickInput::default(), 0.016);
        assert_eq!(game.lives, 0);
        assert_eq!(game.phase, GamePhase::GameOver(Outcome::Loss));
        assert!(events.contains(&GameEvent::GameOver(Outcome::Loss)));
        // Score 0 never beats the best
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBestScore(_))));
    }

    #[test]
    fn test_wall_reflections_clamp() {
        let mut game = playing(&[0.0, 0.9]);
        game.ball.pos = Vec2::new(795.0, 300.0);
        game.ball.vel = Vec2::new(300.0, -10.0);
        tick(&mut game, &TickInput::default(), 0.016);
        assert_eq!(game.ball.pos.x, 792.0);
        assert!(game.ball.vel.x < 0.0);

        game.ball.pos = Vec2::new(400.0, 5.0);
        game.ball.vel = Vec2::new(0.0, -300.0);
        tick(&mut game, &TickInput::default(), 0.016);
        assert_eq!(game.ball.pos.y, 8.0);
        assert!(game.ball.vel.y > 0.0);
    }

    #[test]
    fn test_paddle_english_on_hit() {
        let mut game = playing(&[0.0, 0.9]);
        game.paddle.x = 350.0;
        // Right quarter of the paddle, moving down into it
        game.ball.pos = Vec2::new(425.0, 565.0);
        game.ball.vel = Vec2::new(0.0, 300.0);
        game.ball.speed = 300.0;

        let events = tick(&mut game, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::PaddleHit));
        // offset 0.5 -> vx = 0.5 * 0.8 * 300
        assert!((game.ball.vel.x - 120.0).abs() < 1e-3);
        assert!(game.ball.vel.y < 0.0);
        assert!((game.ball.vel.length() - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_paddle_ignored_when_moving_up() {
        let mut game = playing(&[0.0, 0.9]);
        game.paddle.x = 350.0;
        game.ball.pos = Vec2::new(400.0, 575.0);
        game.ball.vel = Vec2::new(0.0, -300.0);
        let events = tick(&mut game, &TickInput::default(), 0.0);
        assert!(!events.contains(&GameEvent::PaddleHit));
        assert_eq!(game.ball.vel, Vec2::new(0.0, -300.0));
    }

    #[test]
    fn test_input_phase_moves_paddle() {
        let mut game = playing(&[0.0, 0.9]);
        let input = TickInput {
            pointer_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut game, &input, 0.016);
        assert_eq!(game.paddle.x, 50.0);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut game, &input, 0.1);
        assert!((game.paddle.x - 100.0).abs() < 1e-3);

        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut game, &input, 0.1);
        assert!((game.paddle.x - 100.0).abs() < 1e-3);
    }
}
