use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Mention,
    Follow,
    #[serde(other)]
    Other,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Mention => write!(f, "mention"),
            Self::Follow => write!(f, "follow"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user: UserSummary,
    pub content: String,
    pub chirp_content: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        relative_time(self.timestamp, now)
    }
}

/// Tab of the notification list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationTab {
    #[default]
    All,
    Kind(NotificationKind),
}

impl NotificationTab {
    pub fn accepts(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => notification.kind == *kind,
        }
    }
}

/// `42s`, `5m`, `3h`, then the calendar day (`Mar 4`)
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h", seconds / 3600)
    } else {
        timestamp.format("%b %-d").to_string()
    }
}
