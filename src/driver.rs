//! Per-frame driver
//!
//! Owns one game plus everything around its step: the frame clock, the
//! input adapter, queued resizes and best-score persistence. Hosts call
//! [`FrameDriver::frame`] once per display refresh.

use crate::highscores::BestScore;
use crate::input::{InputAction, InputAdapter, InputEvent};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{FrameClock, GameEvent, GamePhase, Observer, Playfield, dispatch};

/// A game the driver can run
pub trait Simulation {
    /// Per-step controls
    type Input;
    /// Turns host events into `Input`
    type Adapter: InputAdapter<Output = Self::Input> + Default;

    /// Start or restart, resetting score and entities
    fn start(&mut self) -> Vec<GameEvent>;
    /// Advance by `dt` seconds. No-op outside `Playing`.
    fn tick(&mut self, input: &Self::Input, dt: f32) -> Vec<GameEvent>;
    fn phase(&self) -> GamePhase;
    fn toggle_pause(&mut self) -> Option<GameEvent>;
    fn resize(&mut self, playfield: Playfield);
    fn max_playfield_height(&self) -> f32;
}

pub struct FrameDriver<S: Simulation> {
    sim: S,
    adapter: S::Adapter,
    clock: FrameClock,
    /// Latest viewport reported by the host, applied before the next step
    pending_resize: Option<(f32, f32)>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl<S: Simulation> FrameDriver<S> {
    pub fn new(sim: S, settings: &Settings) -> Self {
        Self {
            sim,
            adapter: S::Adapter::default(),
            clock: FrameClock::new(settings.max_frame_dt),
            pending_resize: None,
            store: None,
        }
    }

    /// Persist best scores into `store`
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_adapter(mut self, adapter: S::Adapter) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn adapter_mut(&mut self) -> &mut S::Adapter {
        &mut self.adapter
    }

    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    pub fn phase(&self) -> GamePhase {
        self.sim.phase()
    }

    /// Start or restart the game. The next frame integrates nothing.
    pub fn start(&mut self, observer: &mut dyn Observer) {
        let events = self.sim.start();
        self.clock.reset();
        self.emit(&events, observer);
    }

    /// Feed one host event
    pub fn handle_input(&mut self, event: &InputEvent, observer: &mut dyn Observer) {
        let accepting = self.sim.phase() == GamePhase::Playing;
        if self.adapter.handle(event, accepting) == InputAction::TogglePause {
            self.toggle_pause(observer);
        }
    }

    /// Pause or resume. Resuming discards the paused gap.
    pub fn toggle_pause(&mut self, observer: &mut dyn Observer) {
        if let Some(event) = self.sim.toggle_pause() {
            log::debug!("Pause toggled, now {:?}", self.sim.phase());
            if self.sim.phase() == GamePhase::Playing {
                self.clock.reset();
            }
            self.emit(&[event], observer);
        }
    }

    /// Queue a viewport change. Only the latest request is applied.
    pub fn request_resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.pending_resize = Some((viewport_width, viewport_height));
    }

    /// Run one display frame. Returns the dt that was integrated.
    pub fn frame(&mut self, now_ms: f64, observer: &mut dyn Observer) -> f32 {
        let dt = self.clock.tick(now_ms);

        if let Some((w, h)) = self.pending_resize.take() {
            let field = Playfield::fit_viewport(w, h, self.sim.max_playfield_height());
            self.sim.resize(field);
        }

        let input = self.adapter.take();
        let events = self.sim.tick(&input, dt);
        self.emit(&events, observer);
        dt
    }

    fn emit(&mut self, events: &[GameEvent], observer: &mut dyn Observer) {
        for event in events {
            if let GameEvent::NewBestScore(value) = *event {
                if let Some(store) = self.store.as_deref_mut() {
                    BestScore::new(value).save(store);
                }
            }
            dispatch(observer, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakout::BrickBreaker;
    use crate::hockey::Hockey;
    use crate::input::Key;
    use crate::persistence::MemoryStore;
    use crate::sim::{Outcome, Side};

    #[test]
    fn test_first_frame_after_start_is_zero() {
        let mut driver = FrameDriver::new(BrickBreaker::seeded(1), &Settings::default());
        let mut events: Vec<GameEvent> = Vec::new();
        driver.start(&mut events);
        assert!(events.contains(&GameEvent::LivesChanged(3)));

        let ball = driver.sim().ball.pos;
        assert_eq!(driver.frame(1000.0, &mut events), 0.0);
        assert_eq!(driver.sim().ball.pos, ball);

        let dt = driver.frame(1016.0, &mut events);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut driver = FrameDriver::new(Hockey::default(), &Settings::default());
        driver.start(&mut ());
        driver.frame(0.0, &mut ());
        assert_eq!(driver.frame(5000.0, &mut ()), 0.1);

        let settings = Settings {
            max_frame_dt: None,
            ..Settings::default()
        };
        let mut driver = FrameDriver::new(Hockey::default(), &settings);
        driver.start(&mut ());
        driver.frame(0.0, &mut ());
        assert_eq!(driver.frame(5000.0, &mut ()), 5.0);
    }

    #[test]
    fn test_escape_pauses_and_resume_discards_gap() {
        let mut driver = FrameDriver::new(Hockey::default(), &Settings::default());
        let mut events: Vec<GameEvent> = Vec::new();
        driver.start(&mut events);
        driver.frame(0.0, &mut events);
        driver.frame(16.0, &mut events);

        driver.handle_input(&InputEvent::KeyDown(Key::Pause), &mut events);
        assert_eq!(driver.phase(), GamePhase::Paused);
        assert!(events.contains(&GameEvent::PauseChanged(true)));
        driver.frame(3000.0, &mut events);

        driver.handle_input(&InputEvent::KeyDown(Key::Pause), &mut events);
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert_eq!(driver.frame(9000.0, &mut events), 0.0);
    }

    #[test]
    fn test_pause_ignored_before_start() {
        let mut driver = FrameDriver::new(Hockey::default(), &Settings::default());
        let mut events: Vec<GameEvent> = Vec::new();
        driver.handle_input(&InputEvent::KeyDown(Key::Pause), &mut events);
        assert_eq!(driver.phase(), GamePhase::Ready);
        assert!(events.is_empty());
    }

    #[test]
    fn test_pointer_steers_mallet_on_next_frame() {
        let mut driver = FrameDriver::new(Hockey::default(), &Settings::default());
        driver.start(&mut ());
        driver.handle_input(&InputEvent::PointerMove { x: 150.0, y: 120.0 }, &mut ());
        driver.frame(0.0, &mut ());
        assert_eq!(driver.sim().player.pos, glam::Vec2::new(150.0, 120.0));
    }

    #[test]
    fn test_resize_applied_between_steps() {
        let mut driver = FrameDriver::new(Hockey::default(), &Settings::default());
        driver.start(&mut ());
        driver.request_resize(400.0, 1000.0);
        assert_eq!(driver.sim().playfield.width, 800.0);

        driver.frame(0.0, &mut ());
        // 400 * 0.95 wide, height capped at 500
        assert_eq!(driver.sim().playfield, Playfield::new(380.0, 500.0));
        assert_eq!(driver.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_new_best_score_is_persisted() {
        let mut game = BrickBreaker::seeded(3);
        game.start();
        // One brick left, ball centre already inside it
        let last = game.bricks.bricks.len() - 1;
        for brick in &mut game.bricks.bricks[..last] {
            brick.alive = false;
        }
        game.score = game.bricks_total - 1;
        let target = game.bricks.bricks[last].rect;
        game.ball.pos = glam::Vec2::new(target.center_x(), target.bottom() - 4.0);
        game.ball.vel = glam::Vec2::new(0.0, -300.0);

        let mut driver = FrameDriver::new(game, &Settings::default()).with_store(Box::new(MemoryStore::new()));
        let mut events: Vec<GameEvent> = Vec::new();
        driver.frame(0.0, &mut events);
        driver.frame(16.0, &mut events);

        assert_eq!(driver.phase(), GamePhase::GameOver(Outcome::Win));
        assert!(events.contains(&GameEvent::ScoreChanged {
            side: Side::Player,
            score: 40
        }));
        let saved = driver.store().map(|store| BestScore::load(store));
        assert_eq!(saved, Some(BestScore::new(40)));
    }
}
