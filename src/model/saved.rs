use serde::{Deserialize, Serialize};

use crate::gateway::RecordId;

use super::Chirp;

/// Bookmark record pointing at a chirp
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    pub chirp_id: RecordId,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewSavedItem {
    #[serde(rename = "Name")]
    pub name: &'static str,
    pub chirp_id: RecordId,
}

impl NewSavedItem {
    pub fn new(chirp_id: RecordId) -> Self {
        Self {
            name: "Saved Chirp",
            chirp_id,
        }
    }
}

/// A bookmark joined with the chirp it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct SavedEntry {
    pub item: SavedItem,
    pub chirp: Chirp,
}

impl SavedEntry {
    pub fn id(&self) -> RecordId {
        self.item.id
    }
    pub fn chirp_id(&self) -> RecordId {
        self.item.chirp_id
    }
}
