//! # Kwartvoorbier
//!
//! Ordering app for the daily office borrel. Colleagues order a drink during a short
//! window in the afternoon; when it closes, a lottery picks who fetches everything.
//!
//! - [`window`] - when ordering is open, plus the countdown and the polling scheduler
//! - [`lottery`] - the deterministic daily draw every client computes identically
//! - [`pickup`] - counts and ordering for whoever won the draw
//! - [`live`] - local table copies kept current from change streams
//! - the `*_actor` modules and [`clients`] - one table per record type, on top of
//!   `table-actor`
//! - [`lifecycle`] - wiring the tables into a [`BorrelSystem`](lifecycle::BorrelSystem)
//! - [`config`] - figment-loaded settings

pub mod clients;
pub mod clock;
pub mod config;
pub mod feature_request_actor;
pub mod lifecycle;
pub mod live;
pub mod location_actor;
pub mod lottery;
pub mod model;
pub mod order_actor;
pub mod pickup;
pub mod product_actor;
pub mod profile_actor;
pub mod settings_actor;
pub mod window;
