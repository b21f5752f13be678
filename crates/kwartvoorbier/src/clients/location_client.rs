//! # Location Client
use crate::location_actor::LocationError;
use crate::model::{Location, LocationCreate, LocationId, LocationUpdate};
use async_trait::async_trait;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Location table.
#[derive(Clone)]
pub struct LocationClient {
    inner: TableClient<Location>,
}

impl LocationClient {
    pub fn new(inner: TableClient<Location>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Location> for LocationClient {
    type Error = LocationError;

    fn inner(&self) -> &TableClient<Location> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<LocationError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => LocationError::NotFound(id),
            Err(other) => LocationError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl LocationClient {
    #[instrument(skip(self))]
    pub async fn create_location(&self, params: LocationCreate) -> Result<LocationId, LocationError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_location(
        &self,
        id: LocationId,
        update: LocationUpdate,
    ) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Same semantics as [`ProductClient::reorder`](crate::clients::ProductClient::reorder).
    #[instrument(skip(self))]
    pub async fn reorder(&self, ids: &[LocationId]) -> Result<(), LocationError> {
        for (position, id) in (1..).zip(ids) {
            let update = LocationUpdate {
                position: Some(position),
                ..Default::default()
            };
            self.update_location(*id, update).await?;
        }
        Ok(())
    }
}
