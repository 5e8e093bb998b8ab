//! Traits and types shared by every listable entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque entity identifier, sent back verbatim in `?id=` selectors.
pub type EntityId = String;

/// The display and lifecycle fields a list row needs, regardless of entity.
pub trait EntitySummary {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn image(&self) -> Option<&str>;
    fn disabled_at(&self) -> Option<DateTime<Utc>>;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// An entity without `disabled_at` is active.
    fn status(&self) -> EntityStatus {
        match self.disabled_at() {
            None => EntityStatus::Active,
            Some(_) => EntityStatus::Inactive,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityStatus::Active => "active",
            EntityStatus::Inactive => "inactive",
        })
    }
}

/// Body returned by the `disable` endpoints: the status after the toggle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: EntityStatus,
}
