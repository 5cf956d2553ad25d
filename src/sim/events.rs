//! Game phases, events and the host-facing observer

use serde::{Deserialize, Serialize};

/// Which side of the table (hockey) or the human player (brick breaker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Brick breaker: every brick cleared
    Win,
    /// Brick breaker: out of lives
    Loss,
    /// Hockey: player reached the winning score
    PlayerWins,
    /// Hockey: opponent reached the winning score
    OpponentWins,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::PlayerWins => "player_wins",
            Outcome::OpponentWins => "opponent_wins",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing moves
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Match ended
    GameOver(Outcome),
}

impl GamePhase {
    /// Started and not finished (paused counts as running)
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { side: Side, score: u32 },
    LivesChanged(u32),
    /// A goal was scored by `Side`
    Goal(Side),
    BrickDestroyed { column: u32, row: u32 },
    BallLost,
    PaddleHit,
    MalletHit(Side),
    PauseChanged(bool),
    GameOver(Outcome),
    /// Best score was beaten and should be persisted
    NewBestScore(u32),
}

/// Host-side listener for lifecycle signals. Every method defaults to a no-op.
pub trait Observer {
    fn on_score_changed(&mut self, _side: Side, _score: u32) {}
    fn on_lives_changed(&mut self, _lives: u32) {}
    fn on_goal(&mut self, _scorer: Side) {}
    fn on_game_over(&mut self, _outcome: Outcome) {}
    fn on_pause_changed(&mut self, _paused: bool) {}
    fn on_best_score(&mut self, _best: u32) {}
    /// Every event, including ones without a dedicated hook (hits, bricks)
    fn on_event(&mut self, _event: &GameEvent) {}
}

impl Observer for () {}

/// Collects every event; handy for tests and headless runs
impl Observer for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Route an event to the matching observer hook
pub fn dispatch(observer: &mut dyn Observer, event: &GameEvent) {
    observer.on_event(event);
    match *event {
        GameEvent::ScoreChanged { side, score } => observer.on_score_changed(side, score),
        GameEvent::LivesChanged(lives) => observer.on_lives_changed(lives),
        GameEvent::Goal(side) => observer.on_goal(side),
        GameEvent::GameOver(outcome) => observer.on_game_over(outcome),
        GameEvent::PauseChanged(paused) => observer.on_pause_changed(paused),
        GameEvent::NewBestScore(best) => observer.on_best_score(best),
        GameEvent::BrickDestroyed { .. }
        | GameEvent::BallLost
        | GameEvent::PaddleHit
        | GameEvent::MalletHit(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Hud {
        score: u32,
        lives: u32,
        over: Option<Outcome>,
        goals: Vec<Side>,
    }

    impl Observer for Hud {
        fn on_score_changed(&mut self, _side: Side, score: u32) {
            self.score = score;
        }
        fn on_lives_changed(&mut self, lives: u32) {
            self.lives = lives;
        }
        fn on_goal(&mut self, scorer: Side) {
            self.goals.push(scorer);
        }
        fn on_game_over(&mut self, outcome: Outcome) {
            self.over = Some(outcome);
        }
    }

    #[test]
    fn test_dispatch_routes_hooks() {
        let mut hud = Hud::default();
        for event in [
            GameEvent::ScoreChanged { side: Side::Player, score: 4 },
            GameEvent::LivesChanged(2),
            GameEvent::Goal(Side::Opponent),
            GameEvent::PaddleHit,
            GameEvent::GameOver(Outcome::Loss),
        ] {
            dispatch(&mut hud, &event);
        }
        assert_eq!(hud.score, 4);
        assert_eq!(hud.lives, 2);
        assert_eq!(hud.goals, vec![Side::Opponent]);
        assert_eq!(hud.over, Some(Outcome::Loss));
    }

    #[test]
    fn test_vec_observer_records_everything() {
        let mut log: Vec<GameEvent> = Vec::new();
        dispatch(&mut log, &GameEvent::BallLost);
        dispatch(&mut log, &GameEvent::PauseChanged(true));
        assert_eq!(log, vec![GameEvent::BallLost, GameEvent::PauseChanged(true)]);
    }

    #[test]
    fn test_is_running() {
        assert!(GamePhase::Paused.is_running());
        assert!(!GamePhase::Ready.is_running());
        assert!(!GamePhase::GameOver(Outcome::Win).is_running());
    }
}
