//! [`Record`] implementation for [`Location`].

use crate::location_actor::LocationError;
use crate::model::{Location, LocationCreate, LocationId, LocationUpdate};
use async_trait::async_trait;
use std::convert::Infallible;
use table_actor::Record;

fn checked_name(name: String) -> Result<String, LocationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LocationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl Record for Location {
    type Id = LocationId;
    type Create = LocationCreate;
    type Update = LocationUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = LocationError;

    fn from_create_params(id: LocationId, params: LocationCreate) -> Result<Self, LocationError> {
        Ok(Self {
            id,
            name: checked_name(params.name)?,
            floor: params.floor,
            description: params.description,
            position: i64::from(id.0),
        })
    }

    fn sort_key(&self) -> i64 {
        self.position
    }

    async fn on_update(&mut self, update: LocationUpdate, _ctx: &()) -> Result<(), LocationError> {
        if let Some(name) = update.name {
            self.name = checked_name(name)?;
        }
        if let Some(floor) = update.floor {
            self.floor = floor;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), LocationError> {
        match action {}
    }
}
