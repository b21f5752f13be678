//! # Profile Client
use crate::model::{Profile, ProfileCreate, ProfileId, ProfileUpdate, Role};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Profile table.
#[derive(Clone)]
pub struct ProfileClient {
    inner: TableClient<Profile>,
}

impl ProfileClient {
    pub fn new(inner: TableClient<Profile>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Profile> for ProfileClient {
    type Error = ProfileError;

    fn inner(&self) -> &TableClient<Profile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<ProfileError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => ProfileError::NotFound(id),
            Err(other) => ProfileError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProfileClient {
    #[instrument(skip(self))]
    pub async fn create_profile(&self, params: ProfileCreate) -> Result<ProfileId, ProfileError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_role(&self, id: ProfileId, role: Role) -> Result<Profile, ProfileError> {
        let update = ProfileUpdate {
            role: Some(role),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Deletes every listed profile, stopping at the first failure.
    /// Returns how many were deleted.
    #[instrument(skip(self))]
    pub async fn delete_many(&self, ids: &[ProfileId]) -> Result<usize, ProfileError> {
        for id in ids {
            self.delete(*id).await?;
        }
        info!(count = ids.len(), "Profiles deleted");
        Ok(ids.len())
    }

    pub async fn admins(&self) -> Result<Vec<Profile>, ProfileError> {
        let profiles = self.list().await?;
        Ok(profiles.into_iter().filter(Profile::is_admin).collect())
    }
}
