use log::info;

use crate::{
    error::Result,
    model::User,
    storage::{LocalStorage, USER_KEY},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    user: Option<User>,
}

impl UserState {
    pub fn load(storage: &impl LocalStorage) -> Self {
        Self {
            user: storage.load(USER_KEY),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, storage: &mut impl LocalStorage, user: User) -> Result<()> {
        storage.save(USER_KEY, &user)?;
        info!("Signed in as {}", user.handle());
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self, storage: &mut impl LocalStorage) -> Result<()> {
        storage.remove_item(USER_KEY)?;
        self.user = None;
        Ok(())
    }
}
