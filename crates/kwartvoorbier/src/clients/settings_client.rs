//! # Settings Client
//!
//! Reads and writes the key/value settings, and the ordering window stored in them.
use crate::model::{Setting, SettingCreate, SettingId, SettingUpdate};
use crate::settings_actor::SettingsError;
use crate::window::WindowConfig;
use async_trait::async_trait;
use table_actor::{FrameworkError, TableAccess, TableClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Settings table.
#[derive(Clone)]
pub struct SettingsClient {
    inner: TableClient<Setting>,
}

impl SettingsClient {
    pub fn new(inner: TableClient<Setting>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Setting> for SettingsClient {
    type Error = SettingsError;

    fn inner(&self) -> &TableClient<Setting> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_row::<SettingsError>() {
            Ok(row) => row,
            Err(FrameworkError::NotFound(id)) => SettingsError::NotFound(id),
            Err(other) => SettingsError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl SettingsClient {
    #[instrument(skip(self))]
    pub async fn value(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let settings = self.list().await?;
        Ok(settings.into_iter().find(|s| s.key == key).map(|s| s.value))
    }

    /// Updates the row for `key`, or inserts it when missing.
    #[instrument(skip(self))]
    pub async fn set_value(&self, key: &str, value: String) -> Result<SettingId, SettingsError> {
        let settings = self.list().await?;
        match settings.iter().find(|s| s.key == key) {
            Some(existing) => {
                debug!(id = %existing.id, "Updating setting");
                self.inner
                    .update(existing.id, SettingUpdate { value })
                    .await
                    .map_err(Self::map_error)?;
                Ok(existing.id)
            }
            None => {
                debug!("Inserting setting");
                let params = SettingCreate {
                    key: key.to_string(),
                    value,
                };
                self.inner.create(params).await.map_err(Self::map_error)
            }
        }
    }

    /// The current window, or `None` when a key is missing or malformed.
    #[instrument(skip(self))]
    pub async fn read_window(&self) -> Result<Option<WindowConfig>, SettingsError> {
        let settings = self.list().await?;
        Ok(WindowConfig::from_settings(&settings))
    }

    /// Writes all four window keys.
    #[instrument(skip(self))]
    pub async fn write_window(&self, window: &WindowConfig) -> Result<(), SettingsError> {
        for (key, value) in window.to_settings() {
            self.set_value(key, value).await?;
        }
        info!(%window, "Ordering window saved");
        Ok(())
    }
}
