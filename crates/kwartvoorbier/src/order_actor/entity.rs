//! [`Record`] implementation for [`Order`].
//!
//! Creating an order is the one place where tables talk to each other: `on_create` looks
//! up the profile, product and location through the clients in [`OrderContext`].

use crate::clients::{LocationClient, ProductClient, ProfileClient};
use crate::clock::SharedClock;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate, UNKNOWN_USER};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime};
use table_actor::{Record, TableAccess};
use tracing::debug;

/// Dependencies of the Order table, injected at `run()`.
#[derive(Clone)]
pub struct OrderContext {
    pub profiles: ProfileClient,
    pub products: ProductClient,
    pub locations: LocationClient,
    pub clock: SharedClock,
}

#[async_trait]
impl Record for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = bool;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self {
            id,
            customer_name: String::new(),
            user_id: params.user_id,
            product_id: params.product_id,
            location_id: params.location_id,
            created_at: NaiveDateTime::default(),
            collected: false,
            delivered: false,
        })
    }

    /// Newest first.
    fn sort_key(&self) -> i64 {
        -self.created_at.and_utc().timestamp_millis()
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        self.created_at = ctx.clock.now();

        let product = ctx
            .products
            .get(self.product_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| OrderError::InvalidProduct(self.product_id.to_string()))?;
        let weekday = self.created_at.weekday().num_days_from_sunday();
        if !product.is_available_on(weekday) {
            return Err(OrderError::ProductUnavailable(product.name));
        }

        ctx.locations
            .get(self.location_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| OrderError::InvalidLocation(self.location_id.to_string()))?;

        let profile = ctx
            .profiles
            .get(self.user_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        self.customer_name = match &profile {
            Some(profile) => profile.display_name().to_string(),
            None => UNKNOWN_USER.to_string(),
        };
        debug!(customer = %self.customer_name, product = %product.name, "Order validated");
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), OrderError> {
        if let Some(collected) = update.collected {
            self.collected = collected;
        }
        if let Some(delivered) = update.delivered {
            self.delivered = delivered;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<bool, OrderError> {
        let flag = match action {
            OrderAction::ToggleCollected => &mut self.collected,
            OrderAction::ToggleDelivered => &mut self.delivered,
        };
        *flag = !*flag;
        Ok(*flag)
    }
}
