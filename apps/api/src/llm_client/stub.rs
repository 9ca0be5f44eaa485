//! Scripted `LanguageModel` for tests. Never touches the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Completion, LanguageModel, LlmError};
use crate::models::chat::ChatTurn;

pub enum StubReply {
    Text(String),
    ApiError(u16),
}

#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub system: String,
    pub history: Vec<ChatTurn>,
    pub prompt: String,
}

/// Pops one scripted reply per call and records what it was asked.
/// Running out of replies yields `LlmError::EmptyContent`.
pub struct StubModel {
    replies: Mutex<VecDeque<StubReply>>,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCompletion>>,
}

impl StubModel {
    pub fn new(replies: impl IntoIterator<Item = StubReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new([StubReply::Text(text.into())])
    }

    pub fn failing(status: u16) -> Self {
        Self::new([StubReply::ApiError(status)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedCompletion> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, completion: Completion<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(RecordedCompletion {
            system: completion.system.to_string(),
            history: completion.history.to_vec(),
            prompt: completion.prompt.to_string(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(StubReply::Text(text)) => Ok(text),
            Some(StubReply::ApiError(status)) => Err(LlmError::Api {
                status,
                message: "stubbed failure".to_string(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
