//! A drink ordered by one colleague for today's borrel.
use crate::model::{LocationId, ProductId, ProfileId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

row_id!(OrderId, "order");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Resolved from the profile when the order is placed; later profile edits don't change it.
    pub customer_name: String,
    pub user_id: ProfileId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub created_at: NaiveDateTime,
    pub collected: bool,
    pub delivered: bool,
}

impl Order {
    /// Whether the order was placed on `date` (local calendar day).
    pub fn is_created_on(&self, date: NaiveDate) -> bool {
        self.created_at.date() == date
    }
}

/// Payload for placing an order. Name and timestamp are filled in by the order table.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: ProfileId,
    pub product_id: ProductId,
    pub location_id: LocationId,
}

#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub collected: Option<bool>,
    pub delivered: Option<bool>,
}
