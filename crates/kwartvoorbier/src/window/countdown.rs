//! Countdown to the opening of the ordering window.

use chrono::{Duration, NaiveDateTime};
use std::fmt;

/// Time left until a target, split the way the countdown display shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Negative durations count as zero.
    pub fn from_duration(d: Duration) -> Self {
        let total = d.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// A fill indicator anchored at the moment the waiting phase was first seen.
///
/// `fill_ratio` grows linearly from 0 at the anchor to 1 at the target. Completion is
/// reported by [`Countdown::poll`] exactly once.
#[derive(Debug, Clone)]
pub struct Countdown {
    anchor: NaiveDateTime,
    target: NaiveDateTime,
    completed: bool,
}

impl Countdown {
    pub fn start(anchor: NaiveDateTime, target: NaiveDateTime) -> Self {
        Self {
            anchor,
            target,
            completed: false,
        }
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `clamp01((now - anchor) / (target - anchor))`, or 1 when the target was
    /// already due at the anchor.
    pub fn fill_ratio(&self, now: NaiveDateTime) -> f64 {
        let span = (self.target - self.anchor).num_milliseconds();
        if span <= 0 {
            return 1.0;
        }
        let elapsed = (now - self.anchor).num_milliseconds();
        (elapsed as f64 / span as f64).clamp(0.0, 1.0)
    }

    pub fn remaining(&self, now: NaiveDateTime) -> Remaining {
        Remaining::from_duration(self.target - now)
    }

    /// Returns `true` the first time `now` has reached the target, `false` otherwise.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        if self.completed || now < self.target {
            return false;
        }
        self.completed = true;
        true
    }
}
