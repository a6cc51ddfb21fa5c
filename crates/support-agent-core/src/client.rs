use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Body of the single outbound call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Successful reply from the chat endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl ChatReply {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            category: None,
            sentiment: None,
        }
    }
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one query and wait for its settlement. No retries.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ChatError::Malformed(e.to_string()))
    }
}
