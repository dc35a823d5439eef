use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::info;

use crate::{
    error::{Error, Result},
    model::{Conversation, Message, Sender},
};

/// Direct-message panel: conversations, their messages and the open one
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    active: Option<u64>,
    blocked: HashSet<u64>,
}

impl ChatState {
    pub fn new(conversations: Vec<Conversation>, messages: Vec<Message>) -> Self {
        Self {
            conversations,
            messages,
            ..Default::default()
        }
    }

    /// Pinned conversations first, then most recent activity
    pub fn conversations(&self) -> Vec<&Conversation> {
        let mut list: Vec<_> = self.conversations.iter().collect();
        list.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
        });
        list
    }

    pub fn active(&self) -> Option<&Conversation> {
        let active = self.active?;
        self.conversations.iter().find(|c| c.id == active)
    }

    pub fn messages(&self, conversation_id: u64) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .collect()
    }

    pub fn is_blocked(&self, conversation_id: u64) -> bool {
        self.blocked.contains(&conversation_id)
    }

    /// Open a conversation and clear its unread counter
    pub fn select(&mut self, conversation_id: u64) -> bool {
        match self.conversations.iter_mut().find(|c| c.id == conversation_id) {
            Some(conversation) => {
                conversation.unread = 0;
                self.active = Some(conversation_id);
                true
            }
            None => false,
        }
    }

    pub fn send(
        &mut self,
        text: &str,
        attachments: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<&Message> {
        let text = text.trim();
        if text.is_empty() && attachments.is_empty() {
            return Err(Error::validation("Message is empty"));
        }
        let Some(active) = self.active else {
            return Err(Error::validation("No conversation selected"));
        };
        if self.is_blocked(active) {
            return Err(Error::validation("This user is blocked"));
        }
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == active) else {
            return Err(Error::validation("No conversation selected"));
        };

        let id = self.messages.iter().map(|m| m.id).max().unwrap_or_default() + 1;
        let message = Message {
            id,
            conversation_id: active,
            sender: Sender::Me,
            text: text.to_string(),
            attachments,
            timestamp: now,
        };
        conversation.last_message = message.preview();
        conversation.timestamp = now;

        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn delete_active(&mut self) -> Option<Conversation> {
        let active = self.active.take()?;
        let index = self.conversations.iter().position(|c| c.id == active)?;
        self.messages.retain(|m| m.conversation_id != active);
        self.blocked.remove(&active);
        let removed = self.conversations.remove(index);
        info!("Deleted conversation with {}", removed.user.username);
        Some(removed)
    }

    pub fn toggle_pin(&mut self) -> Option<bool> {
        let conversation = self.active_mut()?;
        conversation.pinned = !conversation.pinned;
        Some(conversation.pinned)
    }

    pub fn toggle_mute(&mut self) -> Option<bool> {
        let conversation = self.active_mut()?;
        conversation.muted = !conversation.muted;
        Some(conversation.muted)
    }

    pub fn toggle_block(&mut self) -> Option<bool> {
        let active = self.active?;
        if self.blocked.remove(&active) {
            Some(false)
        } else {
            self.blocked.insert(active);
            Some(true)
        }
    }

    fn active_mut(&mut self) -> Option<&mut Conversation> {
        let active = self.active?;
        self.conversations.iter_mut().find(|c| c.id == active)
    }
}
