//! Custom actions for the FeatureRequest table.

/// Moves a request along the board.
#[derive(Debug, Clone)]
pub enum FeatureRequestAction {
    /// Backlog → InProgress → Done. Fails on a request that is already done.
    Advance,
}
