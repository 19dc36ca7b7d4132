//! Domain DTOs for the checklist API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! from the mock-server crate. Integration tests catch any schema drift
//! between the two crates.

use serde::{Deserialize, Serialize};

/// A single checklist item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub version: u32,
}

impl ChecklistItem {
    /// Description with an absent value read as the empty string.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// True when the title is missing in all but name (empty or whitespace).
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Request payload for creating a new item. The backend assigns id and
/// version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewChecklistItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewChecklistItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }
}

/// Full-replacement payload sent with PUT. `version` is the last fetched
/// version plus one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItemUpdate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub version: u32,
}

impl ChecklistItemUpdate {
    /// Carry `item` forward with a new completion flag and a bumped version.
    pub fn toggled(item: &ChecklistItem, completed: bool) -> Self {
        Self {
            title: item.title.clone(),
            description: Some(item.description_or_empty().to_string()),
            completed,
            version: item.version.saturating_add(1),
        }
    }
}
