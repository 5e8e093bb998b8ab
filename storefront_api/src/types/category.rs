//! Category types returned by and sent to the `categories/*` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntitySummary};

/// A category row as returned by `categories/list`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: EntityId,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Set when the category was deactivated; `None` means active.
    #[serde(default)]
    pub disabled_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,

    pub name: String,

    pub description: String,

    /// Public URL of the category image.
    #[serde(default)]
    pub image: Option<String>,
}

impl EntitySummary for Category {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn disabled_at(&self) -> Option<DateTime<Utc>> {
        self.disabled_at
    }
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Entry of `categories/list-select`, used to pick a product's category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: EntityId,
    pub name: String,
}

/// JSON body of `categories/create` and `categories/edit`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
}
