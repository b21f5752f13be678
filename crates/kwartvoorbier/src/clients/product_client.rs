//! # Product Client
//!
//! Catalogue management: create, rename, change the weekday availability and reorder.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product table.
#[derive(Clone)]
pub struct ProductClient {
    inner: TableClient<Product>,
}

impl ProductClient {
    pub fn new(inner: TableClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &TableClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<ProductError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn rename(&self, id: ProductId, name: impl Into<String>) -> Result<Product, ProductError> {
        let update = ProductUpdate {
            name: Some(name.into()),
            ..Default::default()
        };
        self.update_product(id, update).await
    }

    /// `None` makes the product unorderable on every day.
    pub async fn set_availability(
        &self,
        id: ProductId,
        days: Option<Vec<u8>>,
    ) -> Result<Product, ProductError> {
        let update = ProductUpdate {
            available_on_days: Some(days),
            ..Default::default()
        };
        self.update_product(id, update).await
    }

    /// Products that can be ordered on `weekday` (0 = Sunday), in list order.
    #[instrument(skip(self))]
    pub async fn available_on(&self, weekday: u32) -> Result<Vec<Product>, ProductError> {
        let products = self.list().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.is_available_on(weekday))
            .collect())
    }

    /// Stores a drag-and-drop order: the n-th id gets position n, starting at 1.
    /// Ids not mentioned keep their position.
    #[instrument(skip(self))]
    pub async fn reorder(&self, ids: &[ProductId]) -> Result<(), ProductError> {
        for (position, id) in (1..).zip(ids) {
            let update = ProductUpdate {
                position: Some(position),
                ..Default::default()
            };
            self.update_product(*id, update).await?;
        }
        Ok(())
    }
}
