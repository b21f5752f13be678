//! # Feature Request Table
//!
//! A small board where users file wishes for the app and administrators move them from
//! backlog to done. Rows are stamped with the injected clock on insert.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::FeatureRequestClient;
use crate::model::FeatureRequest;
use table_actor::TableActor;

/// Creates a new FeatureRequest actor and its client. Run it with a [`SharedClock`](crate::clock::SharedClock).
pub fn new(buffer_size: usize) -> (TableActor<FeatureRequest>, FeatureRequestClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, FeatureRequestClient::new(inner))
}
