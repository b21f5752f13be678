//! [`Record`] implementation for [`Profile`].

use crate::model::{Profile, ProfileCreate, ProfileId, ProfileUpdate};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use std::convert::Infallible;
use table_actor::Record;

fn checked_email(email: Option<String>) -> Result<Option<String>, ProfileError> {
    match email.map(|e| e.trim().to_string()) {
        Some(e) if e.is_empty() => Ok(None),
        Some(e) if !e.contains('@') => Err(ProfileError::InvalidEmail(e)),
        other => Ok(other),
    }
}

#[async_trait]
impl Record for Profile {
    type Id = ProfileId;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ProfileError;

    fn from_create_params(id: ProfileId, params: ProfileCreate) -> Result<Self, ProfileError> {
        Ok(Self {
            id,
            email: checked_email(params.email)?,
            full_name: params.full_name,
            role: params.role,
        })
    }

    async fn on_update(&mut self, update: ProfileUpdate, _ctx: &()) -> Result<(), ProfileError> {
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), ProfileError> {
        match action {}
    }
}
