//! Cosmetic 2d6 roll animation.
//!
//! The animation never decides a roll; the backend does. It only shuffles
//! faces while a roll request is in flight. Time is fed in through
//! [`DiceAnimation::advance`], so it runs off the TUI tick in production and
//! off synthetic durations in tests.

use std::fmt;
use std::time::Duration;

use rand::Rng;

/// Redraw cadence while the animation is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

const FACES: std::ops::RangeInclusive<u8> = 1..=6;

/// What the dice surface currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceDisplay {
    /// Nothing rolled yet.
    Idle,
    /// Animation frame; values are throwaway.
    Rolling(u8, u8),
    /// Values returned by the backend.
    Final(u8, u8),
    /// The roll request failed.
    Unknown,
}

impl fmt::Display for DiceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceDisplay::Idle => f.write_str("- + -"),
            DiceDisplay::Rolling(a, b) | DiceDisplay::Final(a, b) => write!(f, "{a} + {b}"),
            DiceDisplay::Unknown => f.write_str("? + ?"),
        }
    }
}

pub struct DiceAnimation<R: Rng> {
    rng: R,
    active: bool,
    /// Time accumulated since the last redraw.
    since_frame: Duration,
    faces: (u8, u8),
}

impl<R: Rng> DiceAnimation<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            active: false,
            since_frame: Duration::ZERO,
            faces: (1, 1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start (or restart) and draw the first frame immediately.
    pub fn start(&mut self) {
        self.active = true;
        self.since_frame = Duration::ZERO;
        self.draw();
    }

    /// Stopping an already stopped animation is a no-op.
    pub fn stop(&mut self) {
        self.active = false;
        self.since_frame = Duration::ZERO;
    }

    /// Feed elapsed time. Returns `true` when a new frame was drawn.
    ///
    /// A long gap produces a single redraw, not a burst of them.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.since_frame += elapsed;
        if self.since_frame < FRAME_INTERVAL {
            return false;
        }
        let interval = FRAME_INTERVAL.as_nanos();
        let leftover = self.since_frame.as_nanos() % interval;
        self.since_frame = Duration::from_nanos(leftover as u64);
        self.draw();
        true
    }

    /// Current frame, or `None` when stopped.
    pub fn frame(&self) -> Option<DiceDisplay> {
        self.active
            .then(|| DiceDisplay::Rolling(self.faces.0, self.faces.1))
    }

    fn draw(&mut self) {
        self.faces = (self.rng.gen_range(FACES), self.rng.gen_range(FACES));
    }
}
