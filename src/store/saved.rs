use crate::{gateway::RecordId, model::SavedEntry};

use super::SliceStatus;

#[derive(Debug, Clone, Default)]
pub struct SavedItemsState {
    entries: Vec<SavedEntry>,
    pub status: SliceStatus,
}

impl SavedItemsState {
    pub fn entries(&self) -> &[SavedEntry] {
        &self.entries
    }

    pub fn pending(&mut self) {
        self.status.pending();
    }

    pub fn loaded(&mut self, entries: Vec<SavedEntry>) {
        self.entries = entries;
        self.status.fulfilled();
    }

    /// Only called once the backend acknowledged the bookmark
    pub fn saved(&mut self, entry: SavedEntry) {
        self.entries.insert(0, entry);
        self.status.fulfilled();
    }

    pub fn removed(&mut self, id: RecordId) {
        self.entries.retain(|entry| entry.id() != id);
        self.status.fulfilled();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
