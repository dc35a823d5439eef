use crate::model::{Chirp, PageParams};

use super::SliceStatus;

/// The feed, newest first
#[derive(Debug, Clone, Default)]
pub struct ChirpsState {
    chirps: Vec<Chirp>,
    current: Option<Chirp>,
    params: PageParams,
    cursor: usize,
    pub status: SliceStatus,
}

impl ChirpsState {
    pub fn chirps(&self) -> &[Chirp] {
        &self.chirps
    }
    pub fn current(&self) -> Option<&Chirp> {
        self.current.as_ref()
    }

    /// Parameters of the page after the last one loaded
    pub fn next_page(&self) -> PageParams {
        PageParams {
            offset: self.cursor,
            ..self.params.clone()
        }
    }

    pub fn pending(&mut self) {
        self.status.pending();
    }

    /// A fresh first page replaces the list
    pub fn loaded(&mut self, params: PageParams, chirps: Vec<Chirp>) {
        self.cursor = params.offset + chirps.len();
        self.params = params;
        self.chirps = chirps;
        self.status.fulfilled();
    }

    /// A further page is appended as-is, overlaps included
    pub fn appended(&mut self, chirps: Vec<Chirp>) {
        self.cursor += chirps.len();
        self.chirps.extend(chirps);
        self.status.fulfilled();
    }

    pub fn created(&mut self, chirp: Chirp) {
        // a matching chirp pushes every loaded one down by one on the backend
        if self.params.matches(&chirp) {
            self.cursor += 1;
        }
        self.chirps.insert(0, chirp);
        self.status.fulfilled();
    }

    pub fn fetched(&mut self, chirp: Option<Chirp>) {
        self.current = chirp;
        self.status.fulfilled();
    }

    pub fn set_current(&mut self, chirp: Option<Chirp>) {
        self.current = chirp;
    }

    pub fn clear(&mut self) {
        self.chirps.clear();
        self.cursor = 0;
    }
}
