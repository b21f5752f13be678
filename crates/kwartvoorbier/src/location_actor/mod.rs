//! # Location Table
//!
//! Where drinks get delivered: a name, a floor and a free-text description, listed in
//! administrator-chosen order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LocationClient;
use crate::model::Location;
use table_actor::TableActor;

/// Creates a new Location actor and its client.
pub fn new(buffer_size: usize) -> (TableActor<Location>, LocationClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, LocationClient::new(inner))
}
