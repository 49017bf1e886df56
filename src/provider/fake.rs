//! Scripted generation client for tests and dry runs.
//!
//! Replays a queue of canned replies in order and records every exchange it receives, so
//! callers can assert on prompts, temperatures and the number of attempts made.

use super::{ChatMessage, CompletionOptions, CompletionResponse, GenerationClient, MessageRole, TokenUsage};
use crate::error::ApiError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// One exchange observed by the [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
enum Fallback {
    Text(String),
    Fail(String),
}

/// A client whose replies are fixed up front.
#[derive(Debug)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    fallback: Fallback,
    calls: Mutex<Vec<RecordedCall>>,
    model_name: String,
}

impl ScriptedClient {
    /// Replies are consumed front to back; once exhausted every call fails.
    pub fn new(replies: Vec<Result<String, ApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: Fallback::Fail("scripted replies exhausted".to_string()),
            calls: Mutex::new(Vec::new()),
            model_name: "scripted".to_string(),
        }
    }

    /// A client whose every call fails with a transport error.
    pub fn always_failing(message: &str) -> Self {
        Self {
            fallback: Fallback::Fail(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Answer with `text` once the scripted replies run out.
    pub fn with_fallback_text(mut self, text: &str) -> Self {
        self.fallback = Fallback::Text(text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

fn content_of(messages: &[ChatMessage], role: MessageRole) -> String {
    messages
        .iter()
        .filter(|m| m.role == role)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        self.calls.lock().push(RecordedCall {
            system: content_of(&messages, MessageRole::System),
            user: content_of(&messages, MessageRole::User),
            temperature: options.temperature,
        });

        let next = self.replies.lock().pop_front();
        let content = match next {
            Some(reply) => reply?,
            None => match &self.fallback {
                Fallback::Text(text) => text.clone(),
                Fallback::Fail(message) => {
                    return Err(ApiError::ProviderRequestFailed(message.clone()))
                }
            },
        };

        Ok(CompletionResponse {
            content,
            model: self.model_name.clone(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
