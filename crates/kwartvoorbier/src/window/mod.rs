//! # Ordering Window
//!
//! The daily cycle: wait for the window to open, take orders, run the lottery for
//! fifteen minutes, then close.
//!
//! - [`phase`] - the pure [`evaluate`] function and the [`Phase`] it returns
//! - [`countdown`] - the fill indicator shown while waiting
//! - [`scheduler`] - the polling driver that publishes [`PhaseView`]s

pub mod countdown;
pub mod phase;
pub mod scheduler;

pub use countdown::{Countdown, Remaining};
pub use phase::{evaluate, ClosedReason, Phase, WindowConfig, LOTTERY_MINUTES};
pub use scheduler::{
    PhaseView, SchedulerEvent, Snapshot, SnapshotError, SnapshotSource, TableSnapshot,
    WindowScheduler,
};
