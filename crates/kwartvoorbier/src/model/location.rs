//! Pickup locations: where in the building an order should be delivered.
use serde::{Deserialize, Serialize};

row_id!(LocationId, "location");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub floor: i32,
    pub description: String,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCreate {
    pub name: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub description: String,
}

impl LocationCreate {
    pub fn new(name: impl Into<String>, floor: i32) -> Self {
        Self {
            name: name.into(),
            floor,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub floor: Option<i32>,
    pub description: Option<String>,
    pub position: Option<i64>,
}
