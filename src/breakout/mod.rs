//! Paddle-and-ball brick breaker
//!
//! The ball speeds up 2% per destroyed brick; paddle hits steer it by where
//! it lands on the paddle. Three lives, one fixed grid.

pub mod state;
pub mod tick;

pub use state::{Ball, Brick, BrickBreaker, BrickGrid, BreakoutView, Paddle, launch_velocity};
pub use tick::{TickInput, tick};

use crate::driver::Simulation;
use crate::input::BreakoutInput;
use crate::sim::{GameEvent, GamePhase, Playfield, RandomSource};

impl<R: RandomSource> Simulation for BrickBreaker<R> {
    type Input = TickInput;
    type Adapter = BreakoutInput;

    fn start(&mut self) -> Vec<GameEvent> {
        BrickBreaker::start(self)
    }

    fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(self, input, dt)
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn toggle_pause(&mut self) -> Option<GameEvent> {
        BrickBreaker::toggle_pause(self)
    }

    fn resize(&mut self, playfield: Playfield) {
        BrickBreaker::resize(self, playfield)
    }

    fn max_playfield_height(&self) -> f32 {
        self.tuning.max_height
    }
}
