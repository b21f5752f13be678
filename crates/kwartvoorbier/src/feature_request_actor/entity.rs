//! [`Record`] implementation for [`FeatureRequest`].

use crate::clock::SharedClock;
use crate::feature_request_actor::{FeatureRequestAction, FeatureRequestError};
use crate::model::{
    FeatureRequest, FeatureRequestCreate, FeatureRequestId, FeatureRequestUpdate, FeatureStatus,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use table_actor::Record;

fn checked_title(title: String) -> Result<String, FeatureRequestError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(FeatureRequestError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl Record for FeatureRequest {
    type Id = FeatureRequestId;
    type Create = FeatureRequestCreate;
    type Update = FeatureRequestUpdate;
    type Action = FeatureRequestAction;
    type ActionResult = FeatureStatus;
    type Context = SharedClock;
    type Error = FeatureRequestError;

    fn from_create_params(
        id: FeatureRequestId,
        params: FeatureRequestCreate,
    ) -> Result<Self, FeatureRequestError> {
        Ok(Self {
            id,
            user_id: params.user_id,
            title: checked_title(params.title)?,
            description: params.description,
            status: FeatureStatus::Backlog,
            created_at: NaiveDateTime::default(),
        })
    }

    /// Newest first.
    fn sort_key(&self) -> i64 {
        -self.created_at.and_utc().timestamp_millis()
    }

    async fn on_create(&mut self, clock: &SharedClock) -> Result<(), FeatureRequestError> {
        self.created_at = clock.now();
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: FeatureRequestUpdate,
        _clock: &SharedClock,
    ) -> Result<(), FeatureRequestError> {
        if let Some(title) = update.title {
            self.title = checked_title(title)?;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: FeatureRequestAction,
        _clock: &SharedClock,
    ) -> Result<FeatureStatus, FeatureRequestError> {
        match action {
            FeatureRequestAction::Advance => {
                self.status = match self.status {
                    FeatureStatus::Backlog => FeatureStatus::InProgress,
                    FeatureStatus::InProgress => FeatureStatus::Done,
                    FeatureStatus::Done => return Err(FeatureRequestError::AlreadyDone),
                };
                Ok(self.status)
            }
        }
    }
}
