use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u64,
    pub user: UserSummary,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub unread: u32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub muted: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Them,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub conversation_id: u64,
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Line shown under the conversation name
    pub fn preview(&self) -> String {
        match (self.text.is_empty(), self.attachments.len()) {
            (false, _) => self.text.clone(),
            (true, 1) => "Sent an attachment".to_string(),
            (true, n) => format!("Sent {} attachments", n),
        }
    }
}
