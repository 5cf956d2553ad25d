//! Two-mallet air hockey
//!
//! The player drives the left mallet by pointer, a reactive opponent drives
//! the right one. The puck glides with per-second friction and a goal counts
//! when it crosses an end wall inside the goal mouth.

pub mod opponent;
pub mod state;
pub mod tick;

pub use opponent::Stance;
pub use state::{Hockey, Mallet, Puck};
pub use tick::{TickInput, tick};

use crate::driver::Simulation;
use crate::input::HockeyInput;
use crate::sim::{GameEvent, GamePhase, Playfield};

impl Simulation for Hockey {
    type Input = TickInput;
    type Adapter = HockeyInput;

    fn start(&mut self) -> Vec<GameEvent> {
        Hockey::start(self)
    }

    fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(self, input, dt)
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn toggle_pause(&mut self) -> Option<GameEvent> {
        Hockey::toggle_pause(self)
    }

    fn resize(&mut self, playfield: Playfield) {
        Hockey::resize(self, playfield)
    }

    fn max_playfield_height(&self) -> f32 {
        self.tuning.max_height
    }
}
