use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    gateway::RecordId,
};

use super::User;

/// Characters a chirp may hold before the composer refuses it
pub const MAX_CHIRP_CHARS: usize = 280;
pub const DEFAULT_CATEGORY: &str = "technology";
pub const DEFAULT_AVATAR: &str = "https://images.unsplash.com/photo-1534528741775-53994a69daeb";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Chirp {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Tags")]
    pub tags: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub verified: bool,
    pub likes: u32,
    pub rechirps: u32,
    pub replies: u32,
    pub views: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
    pub category: String,
    #[serde(rename = "CreatedOn")]
    pub created_on: DateTime<Utc>,
}

impl Chirp {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.is_empty())
    }
    pub fn avatar(&self) -> &str {
        self.avatar
            .as_deref()
            .filter(|avatar| !avatar.is_empty())
            .unwrap_or(DEFAULT_AVATAR)
    }
}

/// What the composer hands over when a chirp is posted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChirpDraft {
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub tags: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

impl ChirpDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Characters left before the limit; negative once over it
    pub fn remaining_chars(&self) -> i64 {
        MAX_CHIRP_CHARS as i64 - self.content.chars().count() as i64
    }
    pub fn is_over_limit(&self) -> bool {
        self.remaining_chars() < 0
    }

    pub fn validate(&self) -> Result<&str> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(Error::validation(
                "Cannot create chirp: content is empty or missing",
            ));
        }
        Ok(content)
    }

    /// Fill in author metadata and zeroed counters for the backend
    pub fn into_record(self, author: Option<&User>, now: DateTime<Utc>) -> Result<NewChirp> {
        let content = self.validate()?.to_string();

        let first_name = author
            .and_then(|user| user.first_name.as_deref())
            .unwrap_or("User");
        let name = self.name.unwrap_or_else(|| {
            format!(
                "Chirp from {} - {}",
                first_name,
                now.to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        });
        let username = self
            .username
            .unwrap_or_else(|| author.map_or_else(|| "user".to_string(), User::handle));
        let display_name = self
            .display_name
            .unwrap_or_else(|| author.map_or_else(|| "User".to_string(), User::full_name));
        let avatar = self
            .avatar
            .or_else(|| author.and_then(|user| user.profile_image.clone()))
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        Ok(NewChirp {
            name,
            tags: self.tags.unwrap_or_default(),
            content,
            image: self.image.unwrap_or_default(),
            username,
            display_name,
            avatar,
            verified: false,
            likes: 0,
            rechirps: 0,
            replies: 0,
            views: "0".to_string(),
            is_liked: false,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        })
    }
}

/// The updateable fields of a chirp record
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewChirp {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    pub content: String,
    pub image: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub verified: bool,
    pub likes: u32,
    pub rechirps: u32,
    pub replies: u32,
    pub views: String,
    pub is_liked: bool,
    pub category: String,
}

/// Offset-based page request for the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub limit: usize,
    pub offset: usize,
    pub category: Option<String>,
    pub username: Option<String>,
}

impl PageParams {
    /// Whether `chirp` passes this page's filters
    pub fn matches(&self, chirp: &Chirp) -> bool {
        self.category.as_ref().map_or(true, |c| *c == chirp.category)
            && self.username.as_ref().map_or(true, |u| *u == chirp.username)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            category: None,
            username: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use crate::gateway::{decode, Table};

    use super::*;

    fn author() -> User {
        User {
            user_id: "u-1".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email_address: Some("janedoe@example.com".to_string()),
            display_name: None,
            profile_image: None,
        }
    }

    #[test]
    fn record_takes_author_from_user() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = ChirpDraft::new("  hello world \n")
            .into_record(Some(&author()), now)
            .unwrap();

        assert_eq!(record.content, "hello world");
        assert_eq!(record.username, "janedoe");
        assert_eq!(record.display_name, "Jane Doe");
        assert_eq!(record.avatar, DEFAULT_AVATAR);
        assert_eq!(record.name, "Chirp from Jane - 2024-05-01T12:00:00.000Z");
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert_eq!((record.likes, record.rechirps, record.replies), (0, 0, 0));
        assert_eq!(record.views, "0");
    }

    #[test]
    fn record_without_user_uses_placeholders() {
        let record = ChirpDraft::new("hi").into_record(None, Utc::now()).unwrap();
        assert_eq!(record.username, "user");
        assert_eq!(record.display_name, "User");
        assert!(record.name.starts_with("Chirp from User - "));
    }

    #[test]
    fn whitespace_content_is_rejected() {
        for content in ["", "   ", "\n\t"] {
            let err = ChirpDraft::new(content).into_record(None, Utc::now()).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn remaining_chars_counts_characters() {
        let draft = ChirpDraft::new("é".repeat(MAX_CHIRP_CHARS));
        assert_eq!(draft.remaining_chars(), 0);
        assert!(!draft.is_over_limit());
        assert!(ChirpDraft::new("x".repeat(MAX_CHIRP_CHARS + 1)).is_over_limit());
    }

    #[test]
    fn negative_counters_are_malformed() {
        let record = json!({
            "Id": 1, "content": "x", "username": "a", "display_name": "A",
            "verified": false, "likes": -1, "rechirps": 0, "replies": 0,
            "category": "technology", "CreatedOn": "2024-05-01T12:00:00Z",
        });
        let err = decode::<Chirp>(Table::Chirp, record).unwrap_err();
        assert!(matches!(err, Error::Malformed { table: Table::Chirp, .. }));
    }
}
