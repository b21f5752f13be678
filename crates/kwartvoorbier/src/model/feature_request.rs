//! Feature requests filed by users and triaged by administrators.
use crate::model::ProfileId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

row_id!(FeatureRequestId, "feature_request");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    Backlog,
    InProgress,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub id: FeatureRequestId,
    pub user_id: ProfileId,
    pub title: String,
    pub description: String,
    pub status: FeatureStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct FeatureRequestCreate {
    pub user_id: ProfileId,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureRequestUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeatureStatus>,
}
