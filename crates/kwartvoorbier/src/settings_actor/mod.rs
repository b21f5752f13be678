//! # Settings Table
//!
//! String key/value rows. The ordering window is stored as four of them; see
//! [`SettingsClient::read_window`](crate::clients::SettingsClient::read_window).
//! Values are validated by their readers, not on write, so a malformed value
//! degrades the window instead of being rejected.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::SettingsClient;
use crate::model::Setting;
use table_actor::TableActor;

/// Creates a new Settings actor and its client.
pub fn new(buffer_size: usize) -> (TableActor<Setting>, SettingsClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, SettingsClient::new(inner))
}
