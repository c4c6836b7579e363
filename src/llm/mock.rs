//! Scripted `ContentModel` for tests. Replies are popped in order; every
//! prompt and config is recorded for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::LlmError;
use super::types::GenerationConfig;
use super::ContentModel;

/// One scripted reply.
pub enum Reply {
    Text(&'static str),
    Empty,
    Status(u16, &'static str),
}

#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn text(reply: &'static str) -> Self {
        Self::new(vec![Reply::Text(reply)])
    }

    pub fn calls(&self) -> Vec<(String, GenerationConfig)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.calls.lock().unwrap().last().map(|c| c.0.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContentModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, LlmError> {
        self.calls.lock().unwrap().push((prompt.to_string(), config));
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(t)) => Ok(Some(t.to_string())),
            Some(Reply::Empty) | None => Ok(None),
            Some(Reply::Status(status, message)) => Err(LlmError::ApiError {
                status,
                message: message.to_string(),
            }),
        }
    }
}
