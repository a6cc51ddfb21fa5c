//! The message exchange state machine.
//!
//! `ConversationState` never performs I/O. [`ConversationState::submit`] hands
//! back the [`ChatRequest`] to send, and the caller reports the outcome through
//! [`ConversationState::settle`]. Between the two the conversation is pending
//! and further submits are ignored, so replies can never interleave.

use tracing::{debug, info, warn};

use crate::client::{ChatReply, ChatRequest};
use crate::error::ChatError;
use crate::state::{Message, MessageId};
use crate::suggestions::SUGGESTIONS;

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    draft: String,
    pending: bool,
    last_id: MessageId,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. Allowed while a request is pending.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// In-place access for cursor editing
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Whether a submit right now would send something
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// Start an exchange.
    ///
    /// `text` overrides the draft (suggestion shortcuts); otherwise the draft
    /// is used. Either way the text is trimmed, and empty text is a no-op.
    /// Returns the request to send, or `None` when nothing was submitted.
    pub fn submit(&mut self, text: Option<&str>) -> Option<ChatRequest> {
        if self.pending {
            debug!("Ignoring submit while a request is in flight");
            return None;
        }

        let effective = match text {
            Some(t) => t.trim(),
            None => self.draft.trim(),
        };
        if effective.is_empty() {
            return None;
        }
        let query = effective.to_string();

        let id = self.next_id();
        self.messages.push(Message::user(id, query.clone()));
        self.draft.clear();
        self.pending = true;

        info!(message_id = id, chars = query.chars().count(), "Submitting query");
        Some(ChatRequest { query })
    }

    /// Submit the suggestion at `index`. Suggestions are only offered while
    /// the conversation is empty.
    pub fn select_suggestion(&mut self, index: usize) -> Option<ChatRequest> {
        if !self.is_empty() {
            return None;
        }
        let suggestion = *SUGGESTIONS.get(index)?;
        self.submit(Some(suggestion.text))
    }

    /// Apply the outcome of the in-flight request. Appends exactly one
    /// assistant message and returns it, or `None` if nothing was pending.
    pub fn settle(&mut self, outcome: Result<ChatReply, ChatError>) -> Option<&Message> {
        if !self.pending {
            warn!("Dropping settlement with no request in flight");
            return None;
        }
        self.pending = false;

        let id = self.next_id();
        let message = match outcome {
            Ok(reply) => {
                info!(
                    message_id = id,
                    category = reply.category.as_deref().unwrap_or("-"),
                    sentiment = reply.sentiment.as_deref().unwrap_or("-"),
                    "Received reply"
                );
                Message::reply(id, reply)
            }
            Err(err) => {
                warn!(message_id = id, kind = ?err.kind(), error = %err, "Exchange failed");
                Message::failure(id, &err)
            }
        };

        self.messages.push(message);
        self.messages.last()
    }

    fn next_id(&mut self) -> MessageId {
        self.last_id += 1;
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Role, CONNECTIVITY_NOTICE, RATE_LIMIT_NOTICE};

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            response: text.to_string(),
            category: Some("Technical".to_string()),
            sentiment: Some("Negative".to_string()),
        }
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let state = ConversationState::new();
        assert!(state.is_empty());
        assert!(!state.is_pending());
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut state = ConversationState::new();
        assert!(state.submit(Some("")).is_none());
        assert!(state.submit(Some("   ")).is_none());

        state.set_draft("   ");
        assert!(state.submit(None).is_none());

        assert!(state.is_empty());
        assert!(!state.is_pending());
        assert_eq!(state.draft(), "   ");
    }

    #[test]
    fn test_submit_uses_trimmed_draft() {
        let mut state = ConversationState::new();
        state.set_draft("  my router is blinking  ");

        let request = state.submit(None).unwrap();

        assert_eq!(request.query, "my router is blinking");
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::User);
        assert_eq!(state.messages()[0].content, "my router is blinking");
        assert_eq!(state.draft(), "");
        assert!(state.is_pending());
    }

    #[test]
    fn test_explicit_text_overrides_and_clears_draft() {
        let mut state = ConversationState::new();
        state.set_draft("half typed");

        let request = state.submit(Some("How do I change my password?")).unwrap();

        assert_eq!(request.query, "How do I change my password?");
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn test_successful_exchange_appends_two() {
        let mut state = ConversationState::new();
        state.set_draft("hello");
        state.submit(None).unwrap();

        let msg = state.settle(Ok(reply("Hi there"))).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
        assert_eq!(msg.category.as_deref(), Some("Technical"));
        assert_eq!(msg.sentiment.as_deref(), Some("Negative"));
        assert!(!msg.is_error());
        assert!(!msg.is_rate_limited());

        assert_eq!(state.messages().len(), 2);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_rate_limited_settlement() {
        let mut state = ConversationState::new();
        state.submit(Some("hello")).unwrap();

        let msg = state.settle(Err(ChatError::RateLimited)).unwrap();
        assert!(msg.is_rate_limited());
        assert!(!msg.is_error());
        assert_eq!(msg.content, RATE_LIMIT_NOTICE);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_other_failures_are_connectivity_errors() {
        let failures = [
            ChatError::Status(500),
            ChatError::Status(404),
            ChatError::Transport("connection refused".to_string()),
            ChatError::Malformed("expected value".to_string()),
        ];

        for failure in failures {
            let mut state = ConversationState::new();
            state.submit(Some("hello")).unwrap();

            let msg = state.settle(Err(failure)).unwrap();
            assert!(msg.is_error());
            assert!(!msg.is_rate_limited());
            assert_eq!(msg.content, CONNECTIVITY_NOTICE);
            assert_eq!(state.messages().len(), 2);
        }
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let mut state = ConversationState::new();
        state.submit(Some("first")).unwrap();

        state.set_draft("second");
        assert!(state.submit(None).is_none());
        assert!(state.submit(Some("third")).is_none());

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.draft(), "second");

        state.settle(Ok(ChatReply::new("reply to first")));
        let request = state.submit(None).unwrap();
        assert_eq!(request.query, "second");

        let roles: Vec<Role> = state.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn test_settle_without_pending_is_ignored() {
        let mut state = ConversationState::new();
        assert!(state.settle(Ok(ChatReply::new("stray"))).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_can_resubmit_after_failure() {
        let mut state = ConversationState::new();
        state.submit(Some("hello")).unwrap();
        state.settle(Err(ChatError::Status(502)));

        assert!(state.submit(Some("hello again")).is_some());
    }

    #[test]
    fn test_suggestion_equivalent_to_submit() {
        let mut via_suggestion = ConversationState::new();
        let a = via_suggestion.select_suggestion(1).unwrap();

        let mut via_submit = ConversationState::new();
        let b = via_submit.submit(Some(SUGGESTIONS[1].text)).unwrap();

        assert_eq!(a, b);
        assert_eq!(via_suggestion.messages(), via_submit.messages());
        assert_eq!(a.query, "I need help with my billing");
    }

    #[test]
    fn test_suggestions_only_when_empty() {
        let mut state = ConversationState::new();
        assert!(state.select_suggestion(SUGGESTIONS.len()).is_none());

        state.submit(Some("hello")).unwrap();
        state.settle(Ok(ChatReply::new("hi")));
        assert!(state.select_suggestion(0).is_none());
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut state = ConversationState::new();
        for i in 0..3 {
            state.submit(Some(&format!("question {}", i))).unwrap();
            state.settle(Ok(ChatReply::new("answer")));
        }

        let ids: Vec<MessageId> = state.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
