//! Host input adapters
//!
//! Browser events arrive between frames. Adapters fold them into the
//! per-step `TickInput` each game reads, so input never touches the ball or
//! puck directly.

use glam::Vec2;

use crate::breakout;
use crate::hockey;

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Escape" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Raw host event, already in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse move or touch move
    PointerMove { x: f32, y: f32 },
    /// Mouse down or touch start
    PointerDown { x: f32, y: f32 },
    /// Mouse up or touch end
    PointerUp,
    KeyDown(Key),
    KeyUp(Key),
}

/// Side effect an event asks of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    TogglePause,
}

/// Folds host events into one game's step input
pub trait InputAdapter {
    type Output;

    /// Record an event. `accepting` is false while the game is not playing;
    /// movement is dropped then but releases still register.
    fn handle(&mut self, event: &InputEvent, accepting: bool) -> InputAction;

    /// Input for the next step. One-shot parts are consumed.
    fn take(&mut self) -> Self::Output;
}

/// Brick breaker: latest pointer x plus held arrow keys
#[derive(Debug, Clone, Default)]
pub struct BreakoutInput {
    pointer_x: Option<f32>,
    left: bool,
    right: bool,
}

impl InputAdapter for BreakoutInput {
    type Output = breakout::TickInput;

    fn handle(&mut self, event: &InputEvent, accepting: bool) -> InputAction {
        match *event {
            InputEvent::KeyDown(Key::Pause) => return InputAction::TogglePause,
            InputEvent::KeyUp(Key::Left) => self.left = false,
            InputEvent::KeyUp(Key::Right) => self.right = false,
            _ if !accepting => {}
            InputEvent::PointerMove { x, .. } | InputEvent::PointerDown { x, .. } => {
                self.pointer_x = Some(x);
            }
            InputEvent::KeyDown(Key::Left) => self.left = true,
            InputEvent::KeyDown(Key::Right) => self.right = true,
            InputEvent::PointerUp | InputEvent::KeyUp(Key::Pause) => {}
        }
        InputAction::None
    }

    fn take(&mut self) -> breakout::TickInput {
        breakout::TickInput {
            pointer_x: self.pointer_x.take(),
            left: self.left,
            right: self.right,
        }
    }
}

/// Hockey: mallet target from the pointer
///
/// Mouse movement steers the mallet whether or not a button is held. With
/// `require_drag` set (touch screens) only movement during a press counts.
#[derive(Debug, Clone, Default)]
pub struct HockeyInput {
    target: Option<Vec2>,
    dragging: bool,
    pub require_drag: bool,
}

impl HockeyInput {
    pub fn touch() -> Self {
        Self {
            require_drag: true,
            ..Self::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl InputAdapter for HockeyInput {
    type Output = hockey::TickInput;

    fn handle(&mut self, event: &InputEvent, accepting: bool) -> InputAction {
        match *event {
            InputEvent::KeyDown(Key::Pause) => return InputAction::TogglePause,
            InputEvent::PointerUp => self.dragging = false,
            _ if !accepting => {}
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.target = Some(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging || !self.require_drag {
                    self.target = Some(Vec2::new(x, y));
                }
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {}
        }
        InputAction::None
    }

    fn take(&mut self) -> hockey::TickInput {
        hockey::TickInput {
            target: self.target.take(),
        }
    }
}
