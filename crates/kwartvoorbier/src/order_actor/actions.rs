//! Custom actions for the Order table.
//!
//! The pickup screen flips the collected and delivered flags with one tap, without
//! knowing their current value.

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Flips `collected` and returns the new value.
    ToggleCollected,
    /// Flips `delivered` and returns the new value.
    ToggleDelivered,
}
