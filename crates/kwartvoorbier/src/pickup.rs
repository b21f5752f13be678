//! # Pickup List
//!
//! What the person on pickup duty sees: how many drinks to fetch per product, and the
//! orders still to deliver on top.

use crate::model::{LocationId, Order, Product, ProductId};
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCount {
    pub product_id: ProductId,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickupSummary {
    pub total: usize,
    /// Sorted by product name.
    pub per_product: Vec<ProductCount>,
    /// Undelivered first, then uncollected first, then newest first.
    pub orders: Vec<Order>,
}

impl PickupSummary {
    pub fn outstanding(&self) -> usize {
        self.orders.iter().filter(|o| !o.delivered).count()
    }
}

/// Builds the pickup list from an order snapshot, optionally for one location only.
///
/// Products missing from `products` are listed under their id.
pub fn summarize(orders: &[Order], products: &[Product], location: Option<LocationId>) -> PickupSummary {
    let mut selected: Vec<Order> = orders
        .iter()
        .filter(|o| location.map_or(true, |l| o.location_id == l))
        .cloned()
        .collect();
    selected.sort_by_key(|o| (o.delivered, o.collected, Reverse(o.created_at), Reverse(o.id)));

    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    for order in &selected {
        *counts.entry(order.product_id).or_default() += 1;
    }
    let mut per_product: Vec<ProductCount> = counts
        .into_iter()
        .map(|(product_id, count)| ProductCount {
            product_id,
            name: products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| product_id.to_string()),
            count,
        })
        .collect();
    per_product.sort_by(|a, b| a.name.cmp(&b.name).then(a.product_id.cmp(&b.product_id)));

    PickupSummary {
        total: selected.len(),
        per_product,
        orders: selected,
    }
}
