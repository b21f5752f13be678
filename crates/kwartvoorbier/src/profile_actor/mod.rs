//! # Profile Table
//!
//! Users known to the application. Orders take their customer name from here, and the
//! `role` decides who sees the admin screens.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProfileClient;
use crate::model::Profile;
use table_actor::TableActor;

/// Creates a new Profile actor and its client.
pub fn new(buffer_size: usize) -> (TableActor<Profile>, ProfileClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, ProfileClient::new(inner))
}
