//! # Logging
//!
//! Every table logs through `tracing` with a `table` field, so one filter covers the
//! whole system:
//!
//! ```bash
//! RUST_LOG=info kwartvoorbier               # Created / Updated / Deleted and phase changes
//! RUST_LOG=debug kwartvoorbier              # payloads, snapshots and lottery seeds
//! RUST_LOG=kwartvoorbier::window=debug ...  # just the scheduler
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
