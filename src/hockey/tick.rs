//! Air hockey frame step
//!
//! Order per step: player mallet follows its target and its velocity is
//! derived, the puck is integrated with friction and resolved against the
//! rails, goals and both mallets, then the opponent moves.

use glam::Vec2;

use super::opponent;
use super::state::Hockey;
use crate::sim::{GameEvent, GamePhase, Side, circle_circle_collision, resolve_impulse};

/// Controls for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Where the player wants their mallet, in playfield coordinates
    pub target: Option<Vec2>,
}

/// Advance the match by `dt` seconds
pub fn tick(game: &mut Hockey, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if game.phase != GamePhase::Playing {
        return events;
    }

    let field = game.playfield;

    game.player.last_pos = game.player.pos;
    if let Some(target) = input.target {
        game.player.pos = target;
        game.player.clamp_to_half(&field);
    }
    game.player.derive_velocity(dt);

    if let Some(scorer) = step_puck(game, dt) {
        game.register_goal(scorer, &mut events);
        return events;
    }

    let params = game.tuning.impulse();
    for mallet in [&game.player, &game.opponent] {
        let puck = &mut game.puck;
        let contact = circle_circle_collision(puck.pos, puck.radius, mallet.pos, mallet.radius);
        if resolve_impulse(&mut puck.pos, &mut puck.vel, &contact, mallet.vel, &params) {
            log::trace!("{:?} mallet hit, puck speed {:.0}", mallet.side, puck.speed());
            events.push(GameEvent::MalletHit(mallet.side));
        }
    }
    game.puck.pos = field.clamp_circle(game.puck.pos, game.puck.radius);

    let stance = opponent::update(&mut game.opponent, &game.puck, &field, &game.tuning, dt);
    log::trace!("Opponent {:?} at {}", stance, game.opponent.pos);
    events
}

/// Integrate the puck and bounce it off the rails. Returns the scorer if the
/// puck crossed an end wall inside the goal mouth.
fn step_puck(game: &mut Hockey, dt: f32) -> Option<Side> {
    let field = game.playfield;
    let friction = game.tuning.friction_per_second.powf(dt);
    let puck = &mut game.puck;

    puck.pos += puck.vel * dt;
    puck.vel *= friction;

    if puck.top() < 0.0 {
        puck.vel.y = puck.vel.y.abs();
        puck.pos.y = puck.radius;
    } else if puck.bottom() > field.height {
        puck.vel.y = -puck.vel.y.abs();
        puck.pos.y = field.height - puck.radius;
    }

    // Side that scores if this end-wall crossing is inside the mouth
    let scorer = if puck.left() < 0.0 {
        Side::Opponent
    } else if puck.right() > field.width {
        Side::Player
    } else {
        return None;
    };
    if game.in_goal_mouth(game.puck.pos.y) {
        return Some(scorer);
    }

    let puck = &mut game.puck;
    match scorer {
        Side::Opponent => {
            puck.vel.x = puck.vel.x.abs();
            puck.pos.x = puck.radius;
        }
        Side::Player => {
            puck.vel.x = -puck.vel.x.abs();
            puck.pos.x = field.width - puck.radius;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;

    fn playing() -> Hockey {
        let mut game = Hockey::default();
        game.start();
        game
    }

    #[test]
    fn test_idle_unless_playing() {
        let mut game = Hockey::default();
        game.puck.vel = Vec2::new(100.0, 0.0);
        assert!(tick(&mut game, &TickInput::default(), 0.1).is_empty());
        assert_eq!(game.puck.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_goal_in_left_mouth_scores_for_opponent() {
        let mut game = playing();
        game.puck.pos = Vec2::new(10.0, 250.0);
        game.puck.vel = Vec2::new(-300.0, 0.0);

        let events = tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.opponent_score, 1);
        assert_eq!(game.player_score, 0);
        assert!(events.contains(&GameEvent::Goal(Side::Opponent)));
        assert_eq!(game.puck.pos, Vec2::new(400.0, 250.0));
        assert_eq!(game.puck.vel, Vec2::ZERO);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_right_goal_scores_for_player() {
        let mut game = playing();
        game.puck.pos = Vec2::new(790.0, 260.0);
        game.puck.vel = Vec2::new(300.0, 0.0);
        // Keep the opponent out of the way
        game.opponent.place(Vec2::new(700.0, 60.0));

        let events = tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.player_score, 1);
        assert!(events.contains(&GameEvent::ScoreChanged {
            side: Side::Player,
            score: 1
        }));
    }

    #[test]
    fn test_end_wall_outside_mouth_bounces() {
        let mut game = playing();
        game.puck.pos = Vec2::new(10.0, 100.0);
        game.puck.vel = Vec2::new(-300.0, 0.0);

        let events = tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(game.opponent_score, 0);
        assert!(game.puck.vel.x > 0.0);
        assert_eq!(game.puck.pos.x, 15.0);
    }

    #[test]
    fn test_puck_on_goal_post_bounces() {
        let mut game = playing();
        // Centre exactly on the top edge of the band
        game.puck.pos = Vec2::new(10.0, 190.0);
        game.puck.vel = Vec2::new(-300.0, 0.0);

        let events = tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(game.opponent_score, 0);
        assert_eq!(game.puck.pos.x, game.puck.radius);
        assert!(game.puck.vel.x > 0.0);
    }

    #[test]
    fn test_side_rail_bounce() {
        let mut game = playing();
        game.puck.pos = Vec2::new(300.0, 20.0);
        game.puck.vel = Vec2::new(0.0, -400.0);

        tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert!(game.puck.vel.y > 0.0);
        assert_eq!(game.puck.pos.y, 15.0);
    }

    #[test]
    fn test_winning_goal_ends_match() {
        let mut game = playing();
        game.player_score = 6;
        game.puck.pos = Vec2::new(790.0, 250.0);
        game.puck.vel = Vec2::new(600.0, 0.0);
        game.opponent.place(Vec2::new(700.0, 60.0));

        let events = tick(&mut game, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.phase, GamePhase::GameOver(Outcome::PlayerWins));
        assert!(events.contains(&GameEvent::GameOver(Outcome::PlayerWins)));

        // Further steps do nothing
        game.puck.vel = Vec2::new(100.0, 0.0);
        assert!(tick(&mut game, &TickInput::default(), 0.1).is_empty());
        assert_eq!(game.puck.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_player_target_is_clamped_to_own_half() {
        let mut game = playing();
        let input = TickInput {
            target: Some(Vec2::new(650.0, -20.0)),
        };
        tick(&mut game, &input, 0.1);
        assert_eq!(game.player.pos, Vec2::new(375.0, 25.0));
    }

    #[test]
    fn test_slow_touch_gets_minimum_speed() {
        let mut game = playing();
        game.puck.pos = Vec2::new(120.0, 250.0);
        game.puck.vel = Vec2::new(-1.0, 0.0);

        // Player mallet at home (80, 250), holding still
        let input = TickInput {
            target: Some(Vec2::new(80.0, 250.0)),
        };
        let events = tick(&mut game, &input, 1.0 / 60.0);
        assert!(events.contains(&GameEvent::MalletHit(Side::Player)));
        assert!((game.puck.speed() - game.tuning.min_hit_speed).abs() < 1e-2);
        assert!(game.puck.vel.x > 0.0);
    }

    #[test]
    fn test_fast_swing_is_capped() {
        let mut game = playing();
        game.puck.pos = Vec2::new(150.0, 250.0);
        game.puck.vel = Vec2::ZERO;

        // Mallet jumps 50 px in one short frame
        let input = TickInput {
            target: Some(Vec2::new(130.0, 250.0)),
        };
        tick(&mut game, &input, 1.0 / 120.0);
        assert!(game.puck.speed() <= game.tuning.max_puck_speed + 1e-2);
        assert!(game.puck.vel.x > 0.0);
    }

    #[test]
    fn test_friction_is_frame_rate_independent() {
        let mut coarse = playing();
        coarse.puck.pos = Vec2::new(200.0, 100.0);
        coarse.puck.vel = Vec2::new(60.0, 0.0);
        let mut fine = coarse.clone();

        tick(&mut coarse, &TickInput::default(), 0.1);
        for _ in 0..10 {
            tick(&mut fine, &TickInput::default(), 0.01);
        }
        assert!((coarse.puck.vel.x - fine.puck.vel.x).abs() < 1e-2);
        let expected = 60.0 * coarse.tuning.friction_per_second.powf(0.1);
        assert!((coarse.puck.vel.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_opponent_velocity_uses_its_own_step() {
        let mut game = playing();
        // Puck resting on the player's half, the opponent shadows it slowly
        game.puck.pos = Vec2::new(200.0, 100.0);
        let cap = game.tuning.opponent_speed * game.tuning.opponent_strike_factor;

        tick(&mut game, &TickInput::default(), 0.1);
        assert!((game.opponent.vel - Vec2::new(0.0, -240.0)).length() < 1e-2);

        // A much shorter frame must not divide the previous move by it
        tick(&mut game, &TickInput::default(), 0.002);
        assert!(game.opponent.vel.length() <= cap + 1e-2, "vel {}", game.opponent.vel);
        assert!((game.opponent.vel - Vec2::new(0.0, -240.0)).length() < 1.0);
    }
}
