//! # Window Scheduler
//!
//! Polls a [`SnapshotSource`] on a fixed cadence, evaluates the phase, drives the
//! opening countdown and publishes the result.
//!
//! - The latest [`PhaseView`] is kept on a `watch` channel, for screens that only care
//!   about "now".
//! - Transitions and countdown completion go out as [`SchedulerEvent`]s on a `broadcast`
//!   channel.
//!
//! Nothing is cached between ticks except the countdown anchor: every tick reads a fresh
//! snapshot, so an edited window takes effect on the next poll.

use crate::clients::{ProductClient, SettingsClient};
use crate::clock::SharedClock;
use crate::model::Product;
use crate::window::countdown::{Countdown, Remaining};
use crate::window::phase::{evaluate, ClosedReason, Phase, WindowConfig};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::time::Duration;
use table_actor::TableAccess;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Inputs to one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// `None` when the settings are missing or malformed.
    pub config: Option<WindowConfig>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can hand the scheduler an up-to-date snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    async fn snapshot(&self) -> Result<Snapshot, SnapshotError>;
}

/// Reads the snapshot straight from the Product and Settings tables.
#[derive(Clone)]
pub struct TableSnapshot {
    products: ProductClient,
    settings: SettingsClient,
}

impl TableSnapshot {
    pub fn new(products: ProductClient, settings: SettingsClient) -> Self {
        Self { products, settings }
    }
}

#[async_trait]
impl SnapshotSource for TableSnapshot {
    async fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        let products = self
            .products
            .list()
            .await
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        let config = self
            .settings
            .read_window()
            .await
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        Ok(Snapshot { config, products })
    }
}

/// What a screen needs to render the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseView {
    pub phase: Phase,
    /// Countdown fill, 0..=1. Full once ordering has opened, empty when closed. A countdown
    /// outlives unreadable settings, so the fill holds steady through an outage.
    pub fill_ratio: f64,
    /// Time until opening, only while awaiting the window.
    pub remaining: Option<Remaining>,
}

impl PhaseView {
    fn unevaluated() -> Self {
        Self {
            phase: Phase::Closed(ClosedReason::SettingsUnavailable),
            fill_ratio: 0.0,
            remaining: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// The evaluated phase differs from the previous tick. `from` is `None` on the first tick.
    PhaseChanged { from: Option<Phase>, to: Phase },
    /// Ordering opened. Sent once per opening, on the first tick that sees the window open,
    /// with `target` set to the instant the window opened.
    CountdownCompleted { target: NaiveDateTime },
}

pub struct WindowScheduler<S> {
    clock: SharedClock,
    source: S,
    poll_interval: Duration,
    countdown: Option<Countdown>,
    current: Option<Phase>,
    /// Opening instant of the last completed countdown.
    opened: Option<NaiveDateTime>,
    view: watch::Sender<PhaseView>,
    events: broadcast::Sender<SchedulerEvent>,
}

impl<S: SnapshotSource> WindowScheduler<S> {
    pub fn new(clock: SharedClock, source: S, poll_interval: Duration, capacity: usize) -> Self {
        let (view, _) = watch::channel(PhaseView::unevaluated());
        let (events, _) = broadcast::channel(capacity);
        Self {
            clock,
            source,
            poll_interval,
            countdown: None,
            current: None,
            opened: None,
            view,
            events,
        }
    }

    pub fn view(&self) -> watch::Receiver<PhaseView> {
        self.view.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.events.subscribe()
    }

    /// The most recently published view.
    pub fn current(&self) -> PhaseView {
        self.view.borrow().clone()
    }

    /// Evaluates once and publishes. Never fails: an unreadable snapshot counts as
    /// unavailable settings.
    pub async fn tick(&mut self) -> PhaseView {
        let now = self.clock.now();
        let (phase, opened_at) = match self.source.snapshot().await {
            Ok(snapshot) => {
                let config = snapshot.config.as_ref();
                let opened_at = config
                    .and_then(WindowConfig::start)
                    .map(|start| now.date().and_time(start));
                (evaluate(now, config, &snapshot.products), opened_at)
            }
            Err(e) => {
                warn!(error = %e, "Snapshot failed, treating settings as unavailable");
                (Phase::Closed(ClosedReason::SettingsUnavailable), None)
            }
        };
        let view = self.advance(now, phase, opened_at);

        if self.current != Some(phase) {
            info!(from = ?self.current.map(|p| p.name()), to = phase.name(), %phase, "Phase changed");
            let _ = self.events.send(SchedulerEvent::PhaseChanged {
                from: self.current,
                to: phase,
            });
            self.current = Some(phase);
        }
        self.view.send_replace(view.clone());
        view
    }

    /// `opened_at` is today's opening instant according to the snapshot, when it has one.
    fn advance(
        &mut self,
        now: NaiveDateTime,
        phase: Phase,
        opened_at: Option<NaiveDateTime>,
    ) -> PhaseView {
        match phase {
            Phase::AwaitingWindow { opens_at } => {
                let countdown = match self.countdown.take() {
                    Some(countdown) if countdown.target() == opens_at => countdown,
                    _ => {
                        debug!(anchor = %now, target = %opens_at, "Countdown anchored");
                        Countdown::start(now, opens_at)
                    }
                };
                let view = PhaseView {
                    phase,
                    fill_ratio: countdown.fill_ratio(now),
                    remaining: Some(countdown.remaining(now)),
                };
                self.countdown = Some(countdown);
                return view;
            }
            // Unreadable settings say nothing about the window. Hold the countdown.
            Phase::Closed(ClosedReason::SettingsUnavailable) => {
                let fill_ratio = self
                    .countdown
                    .as_ref()
                    .map_or(0.0, |countdown| countdown.fill_ratio(now));
                return PhaseView {
                    phase,
                    fill_ratio,
                    remaining: None,
                };
            }
            _ => {}
        }

        if let Some(mut countdown) = self.countdown.take() {
            let ran_out = countdown.poll(now);
            debug!(target = %countdown.target(), ran_out, to = phase.name(), "Countdown dropped");
        }
        // Once per opening, even when an outage splits the ordering phase in two.
        let was_open = matches!(self.current, Some(p) if p.accepts_orders());
        if phase.accepts_orders() && !was_open {
            if let Some(opened_at) = opened_at.filter(|at| self.opened != Some(*at)) {
                self.complete(opened_at);
            }
        }

        let fill_ratio = match phase {
            Phase::Ordering { .. } | Phase::Lottery { .. } => 1.0,
            _ => 0.0,
        };
        PhaseView {
            phase,
            fill_ratio,
            remaining: None,
        }
    }

    fn complete(&mut self, target: NaiveDateTime) {
        info!(%target, "Countdown completed");
        self.opened = Some(target);
        let _ = self
            .events
            .send(SchedulerEvent::CountdownCompleted { target });
    }

    /// How long until the running countdown's target. `None` once the target is due, so an
    /// outage past the target falls back to the regular cadence.
    fn until_opening(&self) -> Option<Duration> {
        let countdown = self.countdown.as_ref()?;
        let left = (countdown.target() - self.clock.now()).to_std().ok()?;
        (!left.is_zero()).then_some(left)
    }

    /// Polls until `shutdown` turns `true` or its sender is dropped.
    ///
    /// Besides the fixed cadence, an extra tick is scheduled for the moment the countdown
    /// runs out, so ordering opens on time rather than up to one interval late.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Window scheduler started"
        );
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let opening = self.until_opening();
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }
                _ = sleep_for(opening) => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Window scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

async fn sleep_for(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::ProductId;
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FixedSource {
        snapshot: Arc<Mutex<Snapshot>>,
        offline: Arc<AtomicBool>,
    }

    impl FixedSource {
        fn new(config: WindowConfig) -> Self {
            Self::on_days(config, &[0, 1, 2, 3, 4, 5, 6])
        }

        /// Pils only, served on `days`.
        fn on_days(config: WindowConfig, days: &[u8]) -> Self {
            let products = vec![Product {
                id: ProductId(1),
                name: "Pils".into(),
                available_on_days: Some(days.to_vec()),
                position: 1,
            }];
            Self {
                snapshot: Arc::new(Mutex::new(Snapshot {
                    config: Some(config),
                    products,
                })),
                ..Default::default()
            }
        }

        fn set_window(&self, config: WindowConfig) {
            self.snapshot.lock().unwrap().config = Some(config);
        }

        fn fail(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn recover(&self) {
            self.offline.store(false, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SnapshotSource for FixedSource {
        async fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(SnapshotError::Unavailable("offline".into()));
            }
            Ok(self.snapshot.lock().unwrap().clone())
        }
    }

    fn completions(events: &mut broadcast::Receiver<SchedulerEvent>) -> Vec<NaiveDateTime> {
        std::iter::from_fn(|| events.try_recv().ok())
            .filter_map(|event| match event {
                SchedulerEvent::CountdownCompleted { target } => Some(target),
                SchedulerEvent::PhaseChanged { .. } => None,
            })
            .collect()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn scheduler(clock: &ManualClock, source: &FixedSource) -> WindowScheduler<FixedSource> {
        WindowScheduler::new(
            Arc::new(clock.clone()),
            source.clone(),
            Duration::from_secs(30),
            16,
        )
    }

    #[tokio::test]
    async fn test_countdown_fills_then_completes_once() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);
        let mut events = scheduler.events();

        let view = scheduler.tick().await;
        assert_eq!(view.fill_ratio, 0.0);
        assert_eq!(view.remaining.unwrap().minutes, 45);

        clock.set(at(15, 30));
        let view = scheduler.tick().await;
        assert!((view.fill_ratio - 2.0 / 3.0).abs() < 1e-9);

        clock.set(at(15, 45));
        let view = scheduler.tick().await;
        assert!(view.phase.accepts_orders());
        assert_eq!(view.fill_ratio, 1.0);

        clock.set(at(15, 46));
        scheduler.tick().await;

        let mut completions = 0;
        while let Ok(event) = events.try_recv() {
            if matches!(event, SchedulerEvent::CountdownCompleted { target } if target == at(15, 45))
            {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[tokio::test]
    async fn test_phase_changes_are_broadcast_once() {
        let clock = ManualClock::new(at(15, 50));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);
        let mut events = scheduler.events();

        scheduler.tick().await;
        scheduler.tick().await;
        clock.set(at(16, 5));
        scheduler.tick().await;

        // Opened before the first look, so completion is immediate.
        assert_eq!(
            events.try_recv().unwrap(),
            SchedulerEvent::CountdownCompleted { target: at(15, 45) }
        );
        assert!(matches!(
            events.try_recv().unwrap(),
            SchedulerEvent::PhaseChanged { from: None, to: Phase::Ordering { .. } }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            SchedulerEvent::PhaseChanged {
                from: Some(Phase::Ordering { .. }),
                to: Phase::Lottery { .. }
            }
        ));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_settings_edit_reanchors_countdown() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);

        scheduler.tick().await;
        clock.set(at(15, 30));
        source.set_window(WindowConfig {
            start_hour: 16,
            start_minute: 0,
            end_hour: 16,
            end_minute: 30,
        });

        let view = scheduler.tick().await;
        assert_eq!(
            view.phase,
            Phase::AwaitingWindow {
                opens_at: at(16, 0)
            }
        );
        assert_eq!(view.fill_ratio, 0.0);
    }

    #[tokio::test]
    async fn test_window_moved_earlier_completes_countdown() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);
        let mut events = scheduler.events();

        scheduler.tick().await;
        clock.set(at(15, 10));
        source.set_window(WindowConfig {
            start_hour: 15,
            start_minute: 5,
            end_hour: 16,
            end_minute: 0,
        });
        scheduler.tick().await;

        // The opening that actually happened, not the old target.
        assert_eq!(completions(&mut events), vec![at(15, 5)]);
    }

    #[tokio::test]
    async fn test_failed_snapshot_degrades_to_closed() {
        let clock = ManualClock::new(at(15, 50));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);

        source.fail();
        let view = scheduler.tick().await;

        assert_eq!(view.phase, Phase::Closed(ClosedReason::SettingsUnavailable));
        assert_eq!(scheduler.current(), view);
    }

    #[tokio::test]
    async fn test_failed_snapshot_keeps_countdown() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);

        scheduler.tick().await;
        clock.set(at(15, 30));
        let before = scheduler.tick().await.fill_ratio;
        assert!((before - 2.0 / 3.0).abs() < 1e-9);

        source.fail();
        clock.advance(ChronoDuration::seconds(30));
        let outage = scheduler.tick().await;
        assert_eq!(outage.phase, Phase::Closed(ClosedReason::SettingsUnavailable));
        assert!(outage.fill_ratio >= before);

        source.recover();
        clock.set(at(15, 31));
        let view = scheduler.tick().await;
        assert_eq!(
            view.phase,
            Phase::AwaitingWindow {
                opens_at: at(15, 45)
            }
        );
        assert!(view.fill_ratio >= before);
        assert!((view.fill_ratio - 31.0 / 45.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_completion_while_settings_unreadable() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);
        let mut events = scheduler.events();

        scheduler.tick().await;
        source.fail();
        clock.set(at(15, 45));
        scheduler.tick().await;
        assert!(completions(&mut events).is_empty());

        source.recover();
        clock.set(at(15, 46));
        assert!(scheduler.tick().await.phase.accepts_orders());
        assert_eq!(completions(&mut events), vec![at(15, 45)]);

        // Another outage in the middle of ordering does not open it a second time.
        source.fail();
        scheduler.tick().await;
        source.recover();
        clock.set(at(15, 50));
        scheduler.tick().await;
        assert!(completions(&mut events).is_empty());
    }

    #[tokio::test]
    async fn test_next_day_starts_a_fresh_countdown() {
        let clock = ManualClock::new(at(15, 0));
        let source = FixedSource::new(WindowConfig::default());
        let mut scheduler = scheduler(&clock, &source);
        let mut events = scheduler.events();

        scheduler.tick().await;
        clock.set(at(15, 50));
        scheduler.tick().await;
        clock.set(at(16, 20));
        assert_eq!(
            scheduler.tick().await.phase,
            Phase::Closed(ClosedReason::WindowPassed)
        );

        let friday = |h, m| at(h, m) + ChronoDuration::days(1);
        clock.set(friday(15, 0));
        let view = scheduler.tick().await;
        assert_eq!(
            view.phase,
            Phase::AwaitingWindow {
                opens_at: friday(15, 45)
            }
        );
        assert_eq!(view.fill_ratio, 0.0);
        assert_eq!(view.remaining.unwrap().minutes, 45);

        clock.set(friday(15, 45));
        assert!(scheduler.tick().await.phase.accepts_orders());
        assert_eq!(completions(&mut events), vec![at(15, 45), friday(15, 45)]);
    }

    #[tokio::test]
    async fn test_next_day_without_products_stays_closed() {
        let clock = ManualClock::new(at(16, 20));
        // Thursday only.
        let source = FixedSource::on_days(WindowConfig::default(), &[4]);
        let mut scheduler = scheduler(&clock, &source);

        assert_eq!(
            scheduler.tick().await.phase,
            Phase::Closed(ClosedReason::WindowPassed)
        );

        let friday = at(15, 0) + ChronoDuration::days(1);
        clock.set(friday);
        let view = scheduler.tick().await;
        assert_eq!(view.phase, Phase::Closed(ClosedReason::NothingScheduledToday));
        assert_eq!(view.fill_ratio, 0.0);
        assert_eq!(view.remaining, None);

        clock.set(friday + ChronoDuration::minutes(50));
        assert_eq!(
            scheduler.tick().await.phase,
            Phase::Closed(ClosedReason::NothingScheduledToday)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let clock = ManualClock::new(at(15, 50));
        let source = FixedSource::new(WindowConfig::default());
        let scheduler = scheduler(&clock, &source);
        let mut view = scheduler.view();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler.run(shutdown_rx));
        view.changed().await.unwrap();
        assert!(view.borrow().phase.accepts_orders());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
