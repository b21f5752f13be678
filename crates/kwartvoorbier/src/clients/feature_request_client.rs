//! # Feature Request Client
use crate::feature_request_actor::{FeatureRequestAction, FeatureRequestError};
use crate::model::{
    FeatureRequest, FeatureRequestCreate, FeatureRequestId, FeatureRequestUpdate, FeatureStatus,
};
use async_trait::async_trait;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the FeatureRequest table.
#[derive(Clone)]
pub struct FeatureRequestClient {
    inner: TableClient<FeatureRequest>,
}

impl FeatureRequestClient {
    pub fn new(inner: TableClient<FeatureRequest>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<FeatureRequest> for FeatureRequestClient {
    type Error = FeatureRequestError;

    fn inner(&self) -> &TableClient<FeatureRequest> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<FeatureRequestError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => FeatureRequestError::NotFound(id),
            Err(other) => FeatureRequestError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl FeatureRequestClient {
    #[instrument(skip(self))]
    pub async fn create_request(
        &self,
        params: FeatureRequestCreate,
    ) -> Result<FeatureRequestId, FeatureRequestError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: FeatureRequestId,
        status: FeatureStatus,
    ) -> Result<FeatureRequest, FeatureRequestError> {
        let update = FeatureRequestUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Moves the request one column to the right and returns its new status.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: FeatureRequestId) -> Result<FeatureStatus, FeatureRequestError> {
        self.inner
            .perform_action(id, FeatureRequestAction::Advance)
            .await
            .map_err(Self::map_error)
    }
}
