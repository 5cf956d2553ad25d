//! Shared simulation plumbing
//!
//! Both games build on these pieces. Nothing here touches rendering or the
//! platform:
//! - Frame clock turns host timestamps into delta time
//! - Collision primitives for circles and axis-aligned rectangles
//! - Events/phases reported to the host
//! - Injectable randomness for launch angles

pub mod clock;
pub mod collision;
pub mod events;
pub mod playfield;
pub mod random;

pub use clock::FrameClock;
pub use collision::{
    CollisionResult, ImpulseParams, Rect, circle_circle_collision, paddle_english, resolve_impulse,
};
pub use events::{GameEvent, GamePhase, Observer, Outcome, Side, dispatch};
pub use playfield::Playfield;
pub use random::{RandomSource, ScriptedRandom, seeded_rng};
