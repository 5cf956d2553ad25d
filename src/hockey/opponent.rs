//! Opponent mallet controller
//!
//! A small reactive policy, not a planner. The opponent shadows the puck
//! vertically and only comes forward to strike when the puck is on its half
//! and in front of it. Every move is limited to `speed * dt`, and the mallet's
//! velocity is derived from that same move.

use super::state::{Mallet, Puck};
use crate::approach;
use crate::sim::Playfield;
use crate::tuning::HockeyTuning;

/// What the opponent decided this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    /// Puck on the player's half: hold home x, track y slowly
    Defend,
    /// Puck on our half but not in front: track y, drift home
    Track,
    /// Puck on our half, in front and past the strike line: charge it
    Strike,
}

/// Move the opponent mallet one step toward its goal position
pub fn update(mallet: &mut Mallet, puck: &Puck, field: &Playfield, tuning: &HockeyTuning, dt: f32) -> Stance {
    mallet.last_pos = mallet.pos;

    let home_x = field.width * tuning.opponent_home_x;
    let step = tuning.opponent_speed * dt;
    let dy = puck.pos.y - mallet.pos.y;

    let stance = if puck.pos.x > field.mid_x() {
        if dy.abs() > tuning.opponent_dead_zone {
            mallet.pos.y = approach(mallet.pos.y, puck.pos.y, step);
        }
        if puck.pos.x < mallet.pos.x && puck.pos.x > field.width * tuning.opponent_strike_line {
            mallet.pos.x -= step * tuning.opponent_strike_factor;
            Stance::Strike
        } else {
            mallet.pos.x = approach(mallet.pos.x, home_x, step);
            Stance::Track
        }
    } else {
        if dy.abs() > tuning.opponent_defensive_dead_zone {
            mallet.pos.y = approach(mallet.pos.y, puck.pos.y, step * tuning.opponent_defensive_factor);
        }
        mallet.pos.x = approach(mallet.pos.x, home_x, step);
        Stance::Defend
    };

    mallet.clamp_to_half(field);
    mallet.derive_velocity(dt);
    stance
}
