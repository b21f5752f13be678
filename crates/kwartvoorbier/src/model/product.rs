//! Something that can be ordered, such as a beer or a soft drink.
//!
//! # Table
//! Implements [`Record`](table_actor::Record) in
//! [`product_actor::entity`](crate::product_actor::entity); see there for validation.
use serde::{Deserialize, Serialize};

row_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Weekdays the product can be ordered on, 0 = Sunday .. 6 = Saturday.
    /// `None` means the product is never available.
    pub available_on_days: Option<Vec<u8>>,
    pub position: i64,
}

impl Product {
    /// Whether the product can be ordered on `weekday` (0 = Sunday).
    pub fn is_available_on(&self, weekday: u32) -> bool {
        self.available_on_days
            .as_deref()
            .is_some_and(|days| days.iter().any(|&d| u32::from(d) == weekday))
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub available_on_days: Option<Vec<u8>>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            name: name.into(),
            available_on_days: Some(days.into_iter().collect()),
        }
    }
}

/// Payload for updating a product. `None` fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the availability, making the product unorderable.
    pub available_on_days: Option<Option<Vec<u8>>>,
    pub position: Option<i64>,
}
