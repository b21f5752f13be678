//! # Wall Clock
//!
//! Everything time-dependent (order timestamps, the ordering window, the lottery date)
//! reads local wall-clock time through [`Clock`], so tests and demos can pin or shift it.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::{Arc, Mutex};

pub trait Clock: Send + Sync + 'static {
    /// Current local time, without a zone.
    fn now(&self) -> NaiveDateTime;
}

pub type SharedClock = Arc<dyn Clock>;

/// The machine's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        *now += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        // A poisoned lock still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }
}

/// Starts at a chosen wall-clock instant and runs forward with the tokio clock.
///
/// Used by the `--at` flag to rehearse a borrel at any hour. Under a paused tokio
/// runtime it advances exactly as far as tokio time does.
#[derive(Debug, Clone)]
pub struct OffsetClock {
    start: NaiveDateTime,
    started: tokio::time::Instant,
}

impl OffsetClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = Duration::from_std(self.started.elapsed()).unwrap_or(Duration::MAX);
        self.start
            .checked_add_signed(elapsed)
            .unwrap_or(NaiveDateTime::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(at(15, 0));
        assert_eq!(clock.now(), at(15, 0));

        clock.advance(Duration::minutes(45));
        assert_eq!(clock.now(), at(15, 45));

        clock.set(at(9, 30));
        assert_eq!(clock.now(), at(9, 30));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(at(15, 0));
        let shared: SharedClock = Arc::new(clock.clone());

        clock.advance(Duration::minutes(1));
        assert_eq!(shared.now(), at(15, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_offset_clock_follows_tokio_time() {
        let clock = OffsetClock::starting_at(at(15, 44));
        tokio::time::advance(std::time::Duration::from_secs(90)).await;

        assert_eq!(clock.now(), at(15, 45) + Duration::seconds(30));
    }
}
