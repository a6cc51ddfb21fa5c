//! `support-agent ask`: one exchange without the TUI.

use anyhow::{bail, Result};
use support_agent_core::{ChatClient, ConversationState, Message, SentimentBadge};

/// Run a single exchange. Returns the assistant message it produced.
pub async fn ask(client: &ChatClient, text: &str) -> Result<Message> {
    let mut conversation = ConversationState::new();
    let Some(request) = conversation.submit(Some(text)) else {
        bail!("Nothing to send: the question is empty");
    };

    let outcome = client.send(&request).await;
    match conversation.settle(outcome) {
        Some(message) => Ok(message.clone()),
        None => bail!("Exchange settled without a reply"),
    }
}

/// Plain-text rendering of an assistant message for stdout
pub fn format_message(message: &Message) -> String {
    let mut out = String::new();

    if message.is_rate_limited() {
        out.push_str("Slow down! ");
    }
    out.push_str(message.content.trim_end());

    let mut badges = Vec::new();
    if let Some(category) = message.category_label() {
        badges.push(format!("category: {}", category));
    }
    if let Some(sentiment) = message.sentiment_label() {
        let badge = match SentimentBadge::classify(sentiment) {
            SentimentBadge::Positive => "positive",
            SentimentBadge::Negative => "negative",
            SentimentBadge::Neutral => "neutral",
        };
        badges.push(format!("sentiment: {} ({})", sentiment, badge));
    }
    if !badges.is_empty() {
        out.push_str("\n\n[");
        out.push_str(&badges.join(", "));
        out.push(']');
    }

    out
}
