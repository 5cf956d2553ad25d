//! Frame clock
//!
//! Converts the host's per-refresh timestamps into delta time in seconds.

use crate::consts::MAX_FRAME_DT;

/// Delta-time source driven by display refresh timestamps (milliseconds)
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame, `None` until the first frame
    last_ms: Option<f64>,
    /// Upper bound on a single frame's dt, `None` for no cap
    max_dt: Option<f32>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Some(MAX_FRAME_DT))
    }
}

impl FrameClock {
    pub fn new(max_dt: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Clock that passes every gap through, however large
    pub fn uncapped() -> Self {
        Self::new(None)
    }

    pub fn max_dt(&self) -> Option<f32> {
        self.max_dt
    }

    /// Advance to `now_ms` and return the elapsed seconds.
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields 0.
    /// Timestamps that go backwards yield 0 as well.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        match self.max_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Drop the reference timestamp so the next frame yields 0.
    ///
    /// Called on resume and on (re)start so time spent paused or in menus is
    /// never integrated.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
