use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gateway::RecordId;

/// The signed-in user, as handed over by authentication
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl User {
    /// Username derived from the local part of the e-mail address
    pub fn handle(&self) -> String {
        self.email_address
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("user")
            .to_string()
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self
                .display_name
                .clone()
                .unwrap_or_else(|| "User".to_string()),
        }
    }
}

/// Who a notification or conversation is about
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl UserSummary {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            avatar: None,
            verified: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Tags")]
    pub tags: Option<String>,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub followers: u32,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl UserProfile {
    /// Language stored as a `lang:` tag, if any
    pub fn language_tag(&self) -> Option<&str> {
        self.tags
            .as_deref()?
            .split(',')
            .find_map(|tag| tag.trim().strip_prefix("lang:"))
    }
}

/// Profile fields to create or update; unset fields are left alone on update
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl ProfileDraft {
    /// Complete a draft for a brand new profile
    pub fn for_create(mut self, today: NaiveDate) -> Self {
        self.name = self
            .name
            .or_else(|| self.display_name.clone())
            .or_else(|| Some("User Profile".to_string()));
        self.tags.get_or_insert_with(String::new);
        self.username.get_or_insert_with(String::new);
        self.display_name.get_or_insert_with(String::new);
        self.bio.get_or_insert_with(String::new);
        self.location.get_or_insert_with(String::new);
        self.website.get_or_insert_with(String::new);
        self.join_date.get_or_insert(today);
        self.following.get_or_insert(0);
        self.followers.get_or_insert(0);
        self.profile_image.get_or_insert_with(String::new);
        self.cover_image.get_or_insert_with(String::new);
        self.verified.get_or_insert(false);
        self
    }
}

/// Replace any `lang:` entry in a comma separated tag list
pub fn with_language_tag(tags: Option<&str>, language: &str) -> String {
    let rest = tags
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && !tag.starts_with("lang:"));
    std::iter::once(format!("lang:{}", language))
        .chain(rest.map(str::to_string))
        .collect::<Vec<_>>()
        .join(",")
}

/// Someone the current user follows, as stored on the backend
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FollowedUser {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// The user about to be followed
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FollowTarget {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub is_verified: bool,
}

impl FollowTarget {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewFollowedUser {
    #[serde(rename = "Name")]
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub is_verified: bool,
}

impl From<FollowTarget> for NewFollowedUser {
    fn from(target: FollowTarget) -> Self {
        let display_name = target.display_name.unwrap_or_default();
        Self {
            name: if display_name.is_empty() {
                target.username.clone()
            } else {
                display_name.clone()
            },
            username: target.username,
            display_name,
            avatar: target.avatar.unwrap_or_default(),
            is_verified: target.is_verified,
        }
    }
}
