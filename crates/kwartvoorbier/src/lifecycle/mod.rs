//! # System Lifecycle
//!
//! Starting, wiring and stopping the tables.
//!
//! Tables are created first, without dependencies, and only receive their context when
//! they are spawned with `run(context)`. That is how the Order table gets the Profile,
//! Product and Location clients it validates against without any construction-order
//! puzzles.
//!
//! Shutdown is by channel closure: [`BorrelSystem::shutdown`] drops the clients and
//! awaits the actor tasks. The dependency graph is acyclic, so every table stops once
//! the tables depending on it have.
//!
//! Logging is set up separately with [`setup_tracing`].

pub mod borrel_system;
pub mod tracing;

pub use self::borrel_system::*;
pub use self::tracing::setup_tracing;
