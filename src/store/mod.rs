pub mod chat;
pub mod chirps;
pub mod follow;
pub mod notifications;
pub mod profiles;
pub mod saved;
pub mod settings;
pub mod user;

pub use chat::ChatState;
pub use chirps::ChirpsState;
pub use follow::FollowState;
pub use notifications::NotificationsState;
pub use profiles::ProfilesState;
pub use saved::SavedItemsState;
pub use settings::{FontSize, Language, SettingsState};
pub use user::UserState;

use log::warn;

use crate::{
    error::{Error, Result},
    gateway::{Gateway, RecordId},
    model::{
        Chirp, ChirpDraft, FollowTarget, PageParams, ProfileDraft, SavedEntry, User, UserProfile,
    },
    service::{chirp, followed_user, saved_item, user_profile},
    storage::LocalStorage,
};

/// Loading flag and last failure of one slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SliceStatus {
    pub fn pending(&mut self) {
        self.is_loading = true;
    }
    pub fn fulfilled(&mut self) {
        self.is_loading = false;
        self.error = None;
    }
    pub fn rejected(&mut self, error: &Error) {
        self.is_loading = false;
        self.error = Some(error.to_string());
    }
}

/// Every slice of the client state; slices never update each other
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: UserState,
    pub chirps: ChirpsState,
    pub saved_items: SavedItemsState,
    pub follow: FollowState,
    pub settings: SettingsState,
    pub profiles: ProfilesState,
    pub notifications: NotificationsState,
    pub chat: ChatState,
}

/// Record a failure on `status` and hand the result back
fn settle<T>(status: &mut SliceStatus, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!("{}", e);
        status.rejected(e);
    }
    result
}

/// Application state together with the gateway and local storage it syncs with
#[derive(Debug)]
pub struct Store<G, S> {
    gateway: G,
    storage: S,
    state: AppState,
}

impl<G: Gateway, S: LocalStorage> Store<G, S> {
    /// Rehydrate the cached user and settings
    pub fn open(gateway: G, storage: S) -> Self {
        let state = AppState {
            user: UserState::load(&storage),
            settings: SettingsState::load(&storage),
            ..Default::default()
        };
        Self {
            gateway,
            storage,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn owner(&self) -> Option<String> {
        self.state.user.user().map(|user| user.user_id.clone())
    }

    //==========================================================================
    // user
    //==========================================================================
    pub fn sign_in(&mut self, user: User) -> Result<()> {
        if self.owner().as_deref() != Some(user.user_id.as_str()) {
            self.forget_owned_state();
        }
        self.state.user.sign_in(&mut self.storage, user)
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.state.user.sign_out(&mut self.storage)?;
        self.forget_owned_state();
        Ok(())
    }

    /// Drop everything loaded on behalf of the previous user
    fn forget_owned_state(&mut self) {
        self.state.follow = FollowState::default();
        self.state.saved_items.clear();
        self.state.profiles.clear();
        self.state.profiles.set_current(None);
    }

    //==========================================================================
    // chirps
    //==========================================================================
    pub async fn load_chirps(&mut self, params: PageParams) -> Result<&[Chirp]> {
        self.state.chirps.pending();
        let result = chirp::fetch_chirps(&self.gateway, &params).await;
        let chirps = settle(&mut self.state.chirps.status, result)?;
        self.state.chirps.loaded(params, chirps);
        Ok(self.state.chirps.chirps())
    }

    /// Append the next page; returns how many chirps it held
    pub async fn load_more_chirps(&mut self) -> Result<usize> {
        let params = self.state.chirps.next_page();
        self.state.chirps.pending();
        let result = chirp::fetch_chirps(&self.gateway, &params).await;
        let chirps = settle(&mut self.state.chirps.status, result)?;
        let count = chirps.len();
        self.state.chirps.appended(chirps);
        Ok(count)
    }

    pub async fn fetch_chirp(&mut self, id: RecordId) -> Result<Option<&Chirp>> {
        self.state.chirps.pending();
        let result = chirp::get_chirp(&self.gateway, id).await;
        let found = settle(&mut self.state.chirps.status, result)?;
        self.state.chirps.fetched(found);
        Ok(self.state.chirps.current())
    }

    pub async fn create_chirp(&mut self, draft: ChirpDraft) -> Result<&Chirp> {
        self.state.chirps.pending();
        let result = chirp::create_chirp(&self.gateway, draft, self.state.user.user()).await;
        let created = settle(&mut self.state.chirps.status, result)?;
        self.state.chirps.created(created);
        Ok(&self.state.chirps.chirps()[0])
    }

    //==========================================================================
    // follow
    //==========================================================================
    /// Local-only toggle
    pub fn toggle_follow(&mut self, username: &str) -> bool {
        self.state.follow.toggle(username)
    }

    pub async fn load_followed_users(&mut self) -> Result<&[String]> {
        let owner = self.owner();
        self.state.follow.pending();
        let result = followed_user::fetch_followed_users(&self.gateway, owner.as_deref()).await;
        let users = settle(&mut self.state.follow.status, result)?;
        self.state.follow.loaded(users);
        Ok(self.state.follow.followed())
    }

    /// Toggle backed by the `followed_user` table.
    ///
    /// The local set only changes once the backend accepted the change.
    pub async fn toggle_follow_remote(&mut self, target: FollowTarget) -> Result<bool> {
        let owner = self.owner();
        let username = target.username.clone();
        let following = self.state.follow.is_following(&username);
        let known = self.state.follow.record_id(&username);

        self.state.follow.pending();
        let result =
            follow::toggle_remote(&self.gateway, owner.as_deref(), target, following, known).await;
        match settle(&mut self.state.follow.status, result)? {
            Some(record) => {
                self.state.follow.followed_remote(record);
                Ok(true)
            }
            None => {
                self.state.follow.unfollowed_remote(&username);
                Ok(false)
            }
        }
    }

    //==========================================================================
    // saved items
    //==========================================================================
    pub async fn load_saved_items(&mut self) -> Result<&[SavedEntry]> {
        let owner = self.owner();
        self.state.saved_items.pending();
        let result = saved_item::fetch_saved_items(&self.gateway, owner.as_deref()).await;
        let entries = settle(&mut self.state.saved_items.status, result)?;
        self.state.saved_items.loaded(entries);
        Ok(self.state.saved_items.entries())
    }

    pub async fn save_chirp(&mut self, chirp_id: RecordId) -> Result<&SavedEntry> {
        self.state.saved_items.pending();
        let result = saved_item::save_item(&self.gateway, chirp_id).await;
        let entry = settle(&mut self.state.saved_items.status, result)?;
        self.state.saved_items.saved(entry);
        Ok(&self.state.saved_items.entries()[0])
    }

    pub async fn remove_saved_item(&mut self, id: RecordId) -> Result<()> {
        self.state.saved_items.pending();
        let result = saved_item::remove_saved_item(&self.gateway, id).await;
        settle(&mut self.state.saved_items.status, result)?;
        self.state.saved_items.removed(id);
        Ok(())
    }

    //==========================================================================
    // settings
    //==========================================================================
    pub fn set_language(&mut self, value: &str) -> Result<Language> {
        self.state.settings.set_language(&mut self.storage, value)
    }

    pub fn set_font_size(&mut self, font_size: FontSize) -> Result<()> {
        self.state.settings.set_font_size(&mut self.storage, font_size)
    }

    pub fn toggle_reduced_motion(&mut self) -> Result<bool> {
        self.state.settings.toggle_reduced_motion(&mut self.storage)
    }

    /// Mirror the current language into the signed-in user's profile.
    ///
    /// Local settings stay as they are whatever the outcome.
    pub async fn sync_language_preference(&mut self) -> Result<Option<&UserProfile>> {
        let Some(username) = self.state.user.user().map(User::handle) else {
            return Ok(None);
        };
        let language = self.state.settings.language;

        let result =
            user_profile::update_language_preference(&self.gateway, &username, language.label())
                .await;
        let profile = match result {
            Ok(profile) => {
                self.state.settings.error = None;
                profile
            }
            Err(e) => {
                warn!("Language preference not saved: {}", e);
                self.state.settings.error = Some(e.to_string());
                return Err(e);
            }
        };

        match profile {
            Some(profile) => {
                self.state.profiles.updated(profile);
                Ok(self.state.profiles.current())
            }
            None => Ok(None),
        }
    }

    //==========================================================================
    // profiles
    //==========================================================================
    pub async fn load_profile(&mut self, username: &str) -> Result<Option<&UserProfile>> {
        self.state.profiles.pending();
        let result = user_profile::get_profile_by_username(&self.gateway, username).await;
        let profile = settle(&mut self.state.profiles.status, result)?;
        self.state.profiles.fetched(profile);
        Ok(self.state.profiles.current())
    }

    pub async fn create_profile(&mut self, draft: ProfileDraft) -> Result<&UserProfile> {
        self.state.profiles.pending();
        let result = user_profile::create_profile(&self.gateway, draft).await;
        let profile = settle(&mut self.state.profiles.status, result)?;
        self.state.profiles.created(profile);
        self.current_profile()
    }

    pub async fn update_profile(&mut self, id: RecordId, draft: ProfileDraft) -> Result<&UserProfile> {
        self.state.profiles.pending();
        let result = user_profile::update_profile(&self.gateway, id, draft).await;
        let profile = settle(&mut self.state.profiles.status, result)?;
        self.state.profiles.updated(profile);
        self.current_profile()
    }

    fn current_profile(&self) -> Result<&UserProfile> {
        self.state
            .profiles
            .current()
            .ok_or_else(|| Error::remote("profile missing after write"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        gateway::{MemoryGateway, Table},
        storage::MemoryStorage,
    };

    use super::*;

    fn store() -> Store<MemoryGateway, MemoryStorage> {
        Store::open(MemoryGateway::new(), MemoryStorage::new())
    }

    fn seed_chirp(gateway: &MemoryGateway, id: RecordId, created_on: &str) {
        gateway.insert(
            Table::Chirp,
            json!({
                "Id": id, "content": format!("chirp {id}"), "username": "technews",
                "display_name": "Tech News", "verified": true, "likes": 3, "rechirps": 1,
                "replies": 0, "category": "technology", "CreatedOn": created_on,
            }),
        );
    }

    #[tokio::test]
    async fn hello_world_lands_on_top() {
        let mut store = store();
        seed_chirp(store.gateway(), 1, "2024-01-01T00:00:00.000Z");
        store.load_chirps(PageParams::default()).await.unwrap();

        let chirp = store.create_chirp(ChirpDraft::new("hello world")).await.unwrap();
        assert_eq!(chirp.content, "hello world");
        assert_eq!((chirp.likes, chirp.replies), (0, 0));

        let feed = store.state().chirps.chirps();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].content, "hello world");
    }

    #[tokio::test]
    async fn created_chirp_has_trimmed_content() {
        for content in ["a", "  padded  ", "line\nbreak\n", "😀 emoji"] {
            let mut store = store();
            let chirp = store.create_chirp(ChirpDraft::new(content)).await.unwrap();
            assert_eq!(chirp.content, content.trim());
            assert_eq!(store.state().chirps.chirps()[0].content, content.trim());
        }
    }

    #[tokio::test]
    async fn blank_drafts_never_reach_the_backend() {
        let mut store = store();
        seed_chirp(store.gateway(), 1, "2024-01-01T00:00:00.000Z");
        store.load_chirps(PageParams::default()).await.unwrap();

        for content in ["", " ", "\n\t  "] {
            let err = store.create_chirp(ChirpDraft::new(content)).await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(store.state().chirps.chirps().len(), 1);
        assert_eq!(store.gateway().len(Table::Chirp), 1);
        assert!(store.state().chirps.status.error.is_some());
    }

    #[tokio::test]
    async fn rejected_write_leaves_feed_alone() {
        let mut store = store();
        store.gateway().reject_writes(Some("read only"));

        let err = store.create_chirp(ChirpDraft::new("hi")).await.unwrap_err();
        assert!(err.is_remote());
        assert!(store.state().chirps.chirps().is_empty());
        assert!(!store.state().chirps.status.is_loading);
    }

    #[tokio::test]
    async fn created_chirp_uses_signed_in_author() {
        let mut store = store();
        store
            .sign_in(User {
                user_id: "u-1".to_string(),
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                email_address: Some("janedoe@example.com".to_string()),
                ..Default::default()
            })
            .unwrap();

        let chirp = store.create_chirp(ChirpDraft::new("hi")).await.unwrap();
        assert_eq!(chirp.username, "janedoe");
        assert_eq!(chirp.display_name, "Jane Doe");
    }

    #[tokio::test]
    async fn feed_pages_by_offset() {
        let mut store = store();
        for id in 1..=5 {
            seed_chirp(store.gateway(), id, &format!("2024-01-0{id}T00:00:00.000Z"));
        }

        let params = PageParams {
            limit: 2,
            ..Default::default()
        };
        let ids: Vec<_> = store.load_chirps(params).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 4]);

        assert_eq!(store.load_more_chirps().await.unwrap(), 2);
        assert_eq!(store.load_more_chirps().await.unwrap(), 1);
        assert_eq!(store.load_more_chirps().await.unwrap(), 0);
        let ids: Vec<_> = store.state().chirps.chirps().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        assert_eq!(store.fetch_chirp(3).await.unwrap().map(|c| c.id), Some(3));
        assert!(store.fetch_chirp(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn chirp_outside_filter_keeps_paging_intact() {
        let mut store = store();
        for id in 1..=4 {
            store.gateway().insert(
                Table::Chirp,
                json!({
                    "Id": id, "content": format!("news {id}"), "username": "technews",
                    "display_name": "Tech News", "verified": false, "likes": 0, "rechirps": 0,
                    "replies": 0, "category": "news", "CreatedOn": format!("2024-01-0{id}T00:00:00.000Z"),
                }),
            );
        }
        let params = PageParams {
            limit: 2,
            category: Some("news".to_string()),
            ..Default::default()
        };
        store.load_chirps(params).await.unwrap();

        store.create_chirp(ChirpDraft::new("off topic")).await.unwrap();
        assert_eq!(store.load_more_chirps().await.unwrap(), 2);
        let ids: Vec<_> = store.state().chirps.chirps().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        store
            .create_chirp(ChirpDraft::new("breaking").category("news"))
            .await
            .unwrap();
        assert_eq!(store.load_more_chirps().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn feed_filters_by_username() {
        let mut store = store();
        seed_chirp(store.gateway(), 1, "2024-01-01T00:00:00.000Z");
        store.create_chirp(ChirpDraft::new("mine")).await.unwrap();

        let params = PageParams {
            username: Some("user".to_string()),
            ..Default::default()
        };
        let feed = store.load_chirps(params).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].content, "mine");
    }

    #[tokio::test]
    async fn malformed_records_fail_fast() {
        let mut store = store();
        store
            .gateway()
            .insert(Table::Chirp, json!({ "content": "no author" }));

        let err = store.load_chirps(PageParams::default()).await.unwrap_err();
        assert!(matches!(err, Error::Malformed { table: Table::Chirp, .. }));
    }

    #[tokio::test]
    async fn save_then_remove_bookmark() {
        let mut store = store();
        seed_chirp(store.gateway(), 42, "2024-01-01T00:00:00.000Z");

        let saved_id = store.save_chirp(42).await.unwrap().id();
        let entries = store.load_saved_items().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].chirp_id(), 42);
        assert_eq!(entries[0].chirp.id, 42);

        store.remove_saved_item(saved_id).await.unwrap();
        assert!(store.state().saved_items.entries().is_empty());
        assert!(store.load_saved_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_unknown_chirp_is_rejected() {
        let mut store = store();
        let err = store.save_chirp(7).await.unwrap_err();
        assert!(err.is_validation());
        assert!(store.gateway().is_empty(Table::SavedItem));
    }

    #[tokio::test]
    async fn removed_ids_disappear() {
        let mut store = store();
        for id in 1..=3 {
            seed_chirp(store.gateway(), id, "2024-01-01T00:00:00.000Z");
        }
        let mut saved = vec![];
        for id in 1..=3 {
            saved.push(store.save_chirp(id).await.unwrap().id());
        }

        for id in saved {
            store.remove_saved_item(id).await.unwrap();
            assert!(store.state().saved_items.entries().iter().all(|e| e.id() != id));
        }
    }

    #[tokio::test]
    async fn saved_items_skip_deleted_chirps() {
        let mut store = store();
        seed_chirp(store.gateway(), 1, "2024-01-01T00:00:00.000Z");
        store.save_chirp(1).await.unwrap();
        store.gateway().delete_records(Table::Chirp, vec![1]).await.unwrap();

        assert!(store.load_saved_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_items_are_scoped_to_owner() {
        let gateway = MemoryGateway::new().with_owner("u-1");
        seed_chirp(&gateway, 1, "2024-01-01T00:00:00.000Z");
        gateway.insert(Table::SavedItem, json!({ "chirp_id": 1, "Owner": "u-2" }));

        let mut store = Store::open(gateway, MemoryStorage::new());
        store
            .sign_in(User {
                user_id: "u-1".to_string(),
                ..Default::default()
            })
            .unwrap();
        store.save_chirp(1).await.unwrap();

        assert_eq!(store.load_saved_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remote_follow_round_trip() {
        let mut store = store();
        let target = FollowTarget::new("janedoe");

        assert!(store.toggle_follow_remote(target.clone()).await.unwrap());
        assert!(store.state().follow.is_following("janedoe"));
        assert_eq!(store.gateway().len(Table::FollowedUser), 1);

        assert!(!store.toggle_follow_remote(target).await.unwrap());
        assert!(!store.state().follow.is_following("janedoe"));
        assert!(store.gateway().is_empty(Table::FollowedUser));
    }

    #[tokio::test]
    async fn remote_follow_failure_is_reported() {
        let mut store = store();
        store.gateway().reject_writes(Some("offline"));

        let err = store
            .toggle_follow_remote(FollowTarget::new("janedoe"))
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(!store.state().follow.is_following("janedoe"));
        assert!(store.state().follow.status.error.is_some());
    }

    #[tokio::test]
    async fn unfollow_finds_record_not_loaded_yet() {
        let mut store = store();
        store
            .gateway()
            .insert(Table::FollowedUser, json!({ "username": "nasa", "is_verified": true }));
        store.toggle_follow("nasa");

        assert!(!store.toggle_follow_remote(FollowTarget::new("nasa")).await.unwrap());
        assert!(store.gateway().is_empty(Table::FollowedUser));

        store
            .gateway()
            .insert(Table::FollowedUser, json!({ "username": "technews" }));
        assert_eq!(store.load_followed_users().await.unwrap(), ["technews".to_string()]);
    }

    #[tokio::test]
    async fn follows_do_not_leak_between_users() {
        let mut store = store();
        store.gateway().insert(
            Table::FollowedUser,
            json!({ "username": "janedoe", "Owner": "user-a" }),
        );
        store
            .sign_in(User {
                user_id: "user-a".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.load_followed_users().await.unwrap().len(), 1);

        store.sign_out().unwrap();
        assert!(store.state().follow.followed().is_empty());
        store
            .sign_in(User {
                user_id: "user-b".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(!store.state().follow.is_following("janedoe"));

        assert!(store.toggle_follow_remote(FollowTarget::new("janedoe")).await.unwrap());
        assert_eq!(store.gateway().len(Table::FollowedUser), 2);
    }

    #[tokio::test]
    async fn switching_users_without_sign_out_resets_follows() {
        let mut store = store();
        store
            .sign_in(User {
                user_id: "user-a".to_string(),
                ..Default::default()
            })
            .unwrap();
        store.toggle_follow("nasa");

        store
            .sign_in(User {
                user_id: "user-b".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(store.state().follow.followed().is_empty());
    }

    #[tokio::test]
    async fn settings_persist_across_reopen() {
        let mut store = store();
        assert_eq!(store.set_language("French").unwrap(), Language::French);
        store.set_font_size(FontSize::Small).unwrap();
        store.toggle_reduced_motion().unwrap();

        let storage = store.storage().clone();
        let reopened = Store::open(MemoryGateway::new(), storage);
        let settings = &reopened.state().settings;
        assert_eq!(settings.language, Language::French);
        assert_eq!(settings.font_size, FontSize::Small);
        assert!(settings.reduced_motion);
    }

    #[tokio::test]
    async fn language_preference_lands_in_profile_tags() {
        let mut store = store();
        store
            .create_profile(ProfileDraft {
                username: Some("janedoe".to_string()),
                tags: Some("lang:English (US),rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(store.sync_language_preference().await.unwrap().is_none());

        store
            .sign_in(User {
                user_id: "u-1".to_string(),
                email_address: Some("janedoe@example.com".to_string()),
                ..Default::default()
            })
            .unwrap();
        store.set_language("Spanish").unwrap();

        let profile = store.sync_language_preference().await.unwrap().unwrap();
        assert_eq!(profile.tags.as_deref(), Some("lang:Spanish,rust"));
        assert_eq!(profile.language_tag(), Some("Spanish"));
        assert_eq!(store.state().profiles.profiles()[0].language_tag(), Some("Spanish"));
    }

    #[tokio::test]
    async fn failed_language_sync_keeps_local_choice() {
        let mut store = store();
        store.gateway().insert(
            Table::UserProfile,
            json!({ "username": "janedoe", "Tags": "" }),
        );
        store
            .sign_in(User {
                user_id: "u-1".to_string(),
                email_address: Some("janedoe@example.com".to_string()),
                ..Default::default()
            })
            .unwrap();
        store.set_language("German").unwrap();
        store.gateway().reject_writes(Some("offline"));

        assert!(store.sync_language_preference().await.is_err());
        assert_eq!(store.state().settings.language, Language::German);
        assert!(store.state().settings.error.is_some());
    }

    #[tokio::test]
    async fn profile_update_replaces_listed_profile() {
        let mut store = store();
        store.gateway().insert(
            Table::UserProfile,
            json!({ "username": "janedoe", "display_name": "Jane", "followers": 10 }),
        );
        let id = store.load_profile("janedoe").await.unwrap().unwrap().id;
        assert!(store.load_profile("nobody").await.unwrap().is_none());

        let updated = store
            .update_profile(
                id,
                ProfileDraft {
                    display_name: Some("Jane Doe".to_string()),
                    bio: Some("Rustacean".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Jane Doe"));
        assert_eq!(updated.followers, 10);
        assert_eq!(
            store.state().profiles.profiles()[0].bio.as_deref(),
            Some("Rustacean")
        );
    }

    #[tokio::test]
    async fn signed_in_user_is_restored() {
        let mut store = store();
        let user = User {
            user_id: "u-1".to_string(),
            ..Default::default()
        };
        store.sign_in(user.clone()).unwrap();

        let reopened = Store::open(MemoryGateway::new(), store.storage().clone());
        assert_eq!(reopened.state().user.user(), Some(&user));

        store.sign_out().unwrap();
        let reopened = Store::open(MemoryGateway::new(), store.storage().clone());
        assert!(!reopened.state().user.is_authenticated());
    }
}
