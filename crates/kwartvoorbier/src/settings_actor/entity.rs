//! [`Record`] implementation for [`Setting`].

use crate::model::{Setting, SettingCreate, SettingId, SettingUpdate};
use crate::settings_actor::SettingsError;
use async_trait::async_trait;
use std::convert::Infallible;
use table_actor::Record;

#[async_trait]
impl Record for Setting {
    type Id = SettingId;
    type Create = SettingCreate;
    type Update = SettingUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = SettingsError;

    fn from_create_params(id: SettingId, params: SettingCreate) -> Result<Self, SettingsError> {
        let key = params.key.trim();
        if key.is_empty() {
            return Err(SettingsError::EmptyKey);
        }
        Ok(Self {
            id,
            key: key.to_string(),
            value: params.value,
        })
    }

    async fn on_update(&mut self, update: SettingUpdate, _ctx: &()) -> Result<(), SettingsError> {
        self.value = update.value;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), SettingsError> {
        match action {}
    }
}
