use crate::clients::{
    FeatureRequestClient, LocationClient, OrderClient, ProductClient, ProfileClient,
    SettingsClient,
};
use crate::clock::SharedClock;
use crate::config::{KvbConfig, SchedulerConfig};
use crate::feature_request_actor::FeatureRequestError;
use crate::location_actor::LocationError;
use crate::lottery::{self, Draw};
use crate::model::{LocationId, OrderCreate, OrderId};
use crate::order_actor::{OrderContext, OrderError};
use crate::pickup::{self, PickupSummary};
use crate::product_actor::ProductError;
use crate::profile_actor::ProfileError;
use crate::settings_actor::SettingsError;
use crate::window::{evaluate, Phase, TableSnapshot, WindowScheduler};
use chrono::NaiveDate;
use table_actor::TableAccess;
use thiserror::Error;
use tracing::{error, info, warn};

/// Anything that can go wrong when using the system as a whole.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    FeatureRequest(#[from] FeatureRequestError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Orders are only taken while the window is open.
    #[error("Not accepting orders: {0}")]
    OrderingClosed(Phase),
}

/// Every table of the borrel app, wired together and running.
///
/// The Order table depends on the Profile, Product and Location tables and gets their
/// clients as its context. Feature requests and orders read the shared clock.
///
/// # Example
///
/// ```ignore
/// let system = BorrelSystem::new(Arc::new(SystemClock), 32);
/// system.seed(&config).await?;
///
/// let id = system.place_order(order).await?;
/// let draw = system.draw_lottery().await?;
///
/// system.shutdown().await?;
/// ```
pub struct BorrelSystem {
    pub products: ProductClient,
    pub locations: LocationClient,
    pub orders: OrderClient,
    pub profiles: ProfileClient,
    pub feature_requests: FeatureRequestClient,
    pub settings: SettingsClient,
    clock: SharedClock,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BorrelSystem {
    /// Spawns all tables, each with a request buffer of `buffer_size`.
    pub fn new(clock: SharedClock, buffer_size: usize) -> Self {
        let (product_actor, products) = crate::product_actor::new(buffer_size);
        let (location_actor, locations) = crate::location_actor::new(buffer_size);
        let (profile_actor, profiles) = crate::profile_actor::new(buffer_size);
        let (settings_actor, settings) = crate::settings_actor::new(buffer_size);
        let (feature_actor, feature_requests) = crate::feature_request_actor::new(buffer_size);
        let (order_actor, orders) = crate::order_actor::new(buffer_size);

        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(location_actor.run(())),
            tokio::spawn(profile_actor.run(())),
            tokio::spawn(settings_actor.run(())),
            tokio::spawn(feature_actor.run(clock.clone())),
            tokio::spawn(order_actor.run(OrderContext {
                profiles: profiles.clone(),
                products: products.clone(),
                locations: locations.clone(),
                clock: clock.clone(),
            })),
        ];

        Self {
            products,
            locations,
            orders,
            profiles,
            feature_requests,
            settings,
            clock,
            handles,
        }
    }

    pub fn clock(&self) -> SharedClock {
        self.clock.clone()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Fills an empty system from the configuration.
    ///
    /// The window is written only when none is stored; products and locations only
    /// when their table is empty. Running it twice changes nothing.
    pub async fn seed(&self, config: &KvbConfig) -> Result<(), SystemError> {
        if self.settings.read_window().await?.is_none() {
            info!(window = %config.window, "Storing default ordering window");
            self.settings.write_window(&config.window).await?;
        }

        if self.products.list().await?.is_empty() {
            for product in &config.seed.products {
                self.products.create_product(product.clone()).await?;
            }
        }
        if self.locations.list().await?.is_empty() {
            for location in &config.seed.locations {
                self.locations.create_location(location.clone()).await?;
            }
        }
        Ok(())
    }

    /// A snapshot source reading this system's Product and Settings tables.
    pub fn snapshot_source(&self) -> TableSnapshot {
        TableSnapshot::new(self.products.clone(), self.settings.clone())
    }

    /// A scheduler over this system's tables. Drop it (or stop its `run`) before
    /// [`shutdown`](Self::shutdown), since it holds table clients.
    pub fn scheduler(&self, config: &SchedulerConfig) -> WindowScheduler<TableSnapshot> {
        WindowScheduler::new(
            self.clock.clone(),
            self.snapshot_source(),
            config.poll_interval(),
            config.channel_capacity,
        )
    }

    /// Evaluates the phase right now from fresh table reads.
    pub async fn current_phase(&self) -> Result<Phase, SystemError> {
        let products = self.products.list().await?;
        let window = self.settings.read_window().await?;
        Ok(evaluate(self.clock.now(), window.as_ref(), &products))
    }

    /// Places an order if the window is open.
    pub async fn place_order(&self, order: OrderCreate) -> Result<OrderId, SystemError> {
        let phase = self.current_phase().await?;
        if !phase.accepts_orders() {
            warn!(%phase, "Order refused");
            return Err(SystemError::OrderingClosed(phase));
        }
        Ok(self.orders.create_order(order).await?)
    }

    /// Distinct customer names of today's orders, in table order.
    pub async fn todays_participants(&self) -> Result<Vec<String>, SystemError> {
        let orders = self.orders.list().await?;
        Ok(lottery::participants_for(&orders, self.today()))
    }

    pub async fn draw_lottery(&self) -> Result<Draw, SystemError> {
        let participants = self.todays_participants().await?;
        Ok(lottery::draw(&participants, self.today()))
    }

    /// Today's pickup list, optionally for one location.
    pub async fn pickup_summary(
        &self,
        location: Option<LocationId>,
    ) -> Result<PickupSummary, SystemError> {
        let orders = self.orders.orders_on(self.today()).await?;
        let products = self.products.list().await?;
        Ok(pickup::summarize(&orders, &products, location))
    }

    /// Drops every client and waits for the tables to stop.
    ///
    /// The Order table holds clones of the Profile, Product and Location clients, so
    /// those tables stop only after it has.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.feature_requests);
        drop(self.settings);
        drop(self.profiles);
        drop(self.locations);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
