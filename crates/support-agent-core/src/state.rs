//! UI-agnostic message types
//!
//! These are shared by every front end (the terminal client, one-shot mode)
//! and don't depend on any specific UI framework.

use serde::{Deserialize, Serialize};

use crate::client::ChatReply;
use crate::error::{ChatError, FailureKind};

/// Shown in place of a reply when the endpoint answers 429
pub const RATE_LIMIT_NOTICE: &str =
    "You've sent too many messages. Please wait a minute before trying again.";

/// Shown in place of a reply for every other failure
pub const CONNECTIVITY_NOTICE: &str =
    "I'm having trouble connecting to the server. Please make sure the backend is running and try again.";

/// Per-conversation ordinal, the first message is 1
pub type MessageId = u64;

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// Whether a message is a normal entry or a synthesized failure notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageStatus {
    #[default]
    Normal,
    ConnectivityError,
    RateLimited,
}

/// One entry in the conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub category: Option<String>,
    pub sentiment: Option<String>,
    pub status: MessageStatus,
}

impl Message {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            category: None,
            sentiment: None,
            status: MessageStatus::Normal,
        }
    }

    pub fn reply(id: MessageId, reply: ChatReply) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: reply.response,
            category: reply.category,
            sentiment: reply.sentiment,
            status: MessageStatus::Normal,
        }
    }

    /// Synthesized assistant message standing in for a failed exchange
    pub fn failure(id: MessageId, error: &ChatError) -> Self {
        let (content, status) = match error.kind() {
            FailureKind::RateLimited => (RATE_LIMIT_NOTICE, MessageStatus::RateLimited),
            FailureKind::ConnectivityFailure => {
                (CONNECTIVITY_NOTICE, MessageStatus::ConnectivityError)
            }
        };

        Self {
            id,
            role: Role::Assistant,
            content: content.to_string(),
            category: None,
            sentiment: None,
            status,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == MessageStatus::ConnectivityError
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == MessageStatus::RateLimited
    }

    /// Trimmed category, or `None` when absent or blank
    pub fn category_label(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Trimmed sentiment, or `None` when absent or blank
    pub fn sentiment_label(&self) -> Option<&str> {
        non_blank(self.sentiment.as_deref())
    }

    /// True for assistant replies that carry a non-blank category or sentiment
    pub fn has_badges(&self) -> bool {
        self.role == Role::Assistant
            && (self.category_label().is_some() || self.sentiment_label().is_some())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
