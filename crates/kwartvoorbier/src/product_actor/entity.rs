//! [`Record`] implementation for [`Product`].

use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use std::convert::Infallible;
use table_actor::Record;

/// Sorts and deduplicates a weekday set, rejecting anything outside 0..=6.
pub fn normalize_days(days: Option<Vec<u8>>) -> Result<Option<Vec<u8>>, ProductError> {
    let Some(mut days) = days else {
        return Ok(None);
    };
    if let Some(&bad) = days.iter().find(|&&d| d > 6) {
        return Err(ProductError::InvalidWeekday(bad));
    }
    days.sort_unstable();
    days.dedup();
    Ok(Some(days))
}

fn checked_name(name: String) -> Result<String, ProductError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl Record for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    /// New products go to the end of the list: position starts out equal to the id.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            name: checked_name(params.name)?,
            available_on_days: normalize_days(params.available_on_days)?,
            position: i64::from(id.0),
        })
    }

    fn sort_key(&self) -> i64 {
        self.position
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = checked_name(name)?;
        }
        if let Some(days) = update.available_on_days {
            self.available_on_days = normalize_days(days)?;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), ProductError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_are_sorted_and_deduplicated() {
        assert_eq!(
            normalize_days(Some(vec![5, 1, 5, 0])),
            Ok(Some(vec![0, 1, 5]))
        );
        assert_eq!(normalize_days(None), Ok(None));
    }

    #[test]
    fn test_weekday_seven_is_rejected() {
        assert_eq!(
            normalize_days(Some(vec![1, 7])),
            Err(ProductError::InvalidWeekday(7))
        );
    }

    #[test]
    fn test_create_trims_name_and_sets_position() {
        let product =
            Product::from_create_params(ProductId(4), ProductCreate::new("  Pils ", [4])).unwrap();
        assert_eq!(product.name, "Pils");
        assert_eq!(product.position, 4);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let result = Product::from_create_params(ProductId(1), ProductCreate::new(" ", [4]));
        assert_eq!(result.unwrap_err(), ProductError::EmptyName);
    }
}
