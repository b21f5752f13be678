//! # Order Client
//!
//! Placing orders and working the pickup list. Validation happens in the Order table's
//! `on_create` hook, so this client only forwards.
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use chrono::NaiveDate;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order table.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn set_collected(&self, id: OrderId, collected: bool) -> Result<Order, OrderError> {
        let update = OrderUpdate {
            collected: Some(collected),
            ..Default::default()
        };
        self.update_order(id, update).await
    }

    pub async fn set_delivered(&self, id: OrderId, delivered: bool) -> Result<Order, OrderError> {
        let update = OrderUpdate {
            delivered: Some(delivered),
            ..Default::default()
        };
        self.update_order(id, update).await
    }

    /// Returns the new `collected` value.
    #[instrument(skip(self))]
    pub async fn toggle_collected(&self, id: OrderId) -> Result<bool, OrderError> {
        self.inner
            .perform_action(id, OrderAction::ToggleCollected)
            .await
            .map_err(Self::map_error)
    }

    /// Returns the new `delivered` value.
    #[instrument(skip(self))]
    pub async fn toggle_delivered(&self, id: OrderId) -> Result<bool, OrderError> {
        self.inner
            .perform_action(id, OrderAction::ToggleDelivered)
            .await
            .map_err(Self::map_error)
    }

    /// Orders created on `date`, newest first.
    #[instrument(skip(self))]
    pub async fn orders_on(&self, date: NaiveDate) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        Ok(orders.into_iter().filter(|o| o.is_created_on(date)).collect())
    }
}

#[async_trait]
impl TableAccess<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<OrderError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
