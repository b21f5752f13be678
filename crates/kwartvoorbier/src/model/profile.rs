//! User profiles. Identity is taken as given: whoever passes a [`ProfileId`] is that user.
use serde::{Deserialize, Serialize};

row_id!(ProfileId, "profile");

/// Shown when a profile has neither a name nor an email, or does not exist.
pub const UNKNOWN_USER: &str = "Onbekende Gebruiker";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
}

impl Profile {
    /// The name orders are placed under: full name, else email, else [`UNKNOWN_USER`].
    pub fn display_name(&self) -> &str {
        [self.full_name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_USER)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileCreate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl ProfileCreate {
    pub fn member(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub role: Option<Role>,
}
