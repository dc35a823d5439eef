use crate::model::UserProfile;

use super::SliceStatus;

#[derive(Debug, Clone, Default)]
pub struct ProfilesState {
    profiles: Vec<UserProfile>,
    current: Option<UserProfile>,
    pub status: SliceStatus,
}

impl ProfilesState {
    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }
    pub fn current(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn pending(&mut self) {
        self.status.pending();
    }

    pub fn fetched(&mut self, profile: Option<UserProfile>) {
        if let Some(profile) = &profile {
            self.upsert(profile.clone());
        }
        self.current = profile;
        self.status.fulfilled();
    }

    pub fn created(&mut self, profile: UserProfile) {
        self.profiles.push(profile.clone());
        self.current = Some(profile);
        self.status.fulfilled();
    }

    pub fn updated(&mut self, profile: UserProfile) {
        self.upsert(profile.clone());
        self.current = Some(profile);
        self.status.fulfilled();
    }

    pub fn set_current(&mut self, profile: Option<UserProfile>) {
        self.current = profile;
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
    }

    fn upsert(&mut self, profile: UserProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }
}
