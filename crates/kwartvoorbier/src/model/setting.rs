//! Key/value settings rows. Values are stored as text, the way the hosted table keeps them.
use serde::{Deserialize, Serialize};

row_id!(SettingId, "setting");

pub const ORDER_START_HOUR: &str = "ORDER_START_HOUR";
pub const ORDER_START_MINUTE: &str = "ORDER_START_MINUTE";
pub const ORDER_END_HOUR: &str = "ORDER_END_HOUR";
pub const ORDER_END_MINUTE: &str = "ORDER_END_MINUTE";

/// Every key the ordering window reads.
pub const WINDOW_KEYS: [&str; 4] = [
    ORDER_START_HOUR,
    ORDER_START_MINUTE,
    ORDER_END_HOUR,
    ORDER_END_MINUTE,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: SettingId,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct SettingCreate {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct SettingUpdate {
    pub value: String,
}

/// Looks up `key` in a settings snapshot.
pub fn setting_value<'a>(settings: &'a [Setting], key: &str) -> Option<&'a str> {
    settings
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.value.as_str())
}
