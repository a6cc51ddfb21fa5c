pub mod badge;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod state;
pub mod suggestions;

// Re-export main types for convenience
pub use badge::{CategoryIcon, SentimentBadge};
pub use client::{ChatClient, ChatReply, ChatRequest};
pub use config::Config;
pub use conversation::ConversationState;
pub use error::{ChatError, FailureKind};
pub use state::{Message, MessageId, MessageStatus, Role, CONNECTIVITY_NOTICE, RATE_LIMIT_NOTICE};
pub use suggestions::{Suggestion, SuggestionIcon, SUGGESTIONS};
