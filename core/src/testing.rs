//! Scripted generation client shared by unit tests

use crate::error::{Error, GenerationError, Result};
use crate::generation::{GenerationClient, GenerationRequest, GenerationResult, ImageBlob};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

struct Reply {
    delay: Option<Duration>,
    result: Result<GenerationResult>,
}

/// Replays queued results in order and records every request it receives
#[derive(Default)]
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, delay: Option<Duration>, result: Result<GenerationResult>) -> Self {
        self.script.lock().unwrap().push_back(Reply { delay, result });
        self
    }

    pub fn reply(self, result: GenerationResult) -> Self {
        self.push(None, Ok(result))
    }

    pub fn reply_decoded(self, value: Value) -> Self {
        self.reply(GenerationResult::Decoded(value))
    }

    pub fn reply_images(self, count: usize) -> Self {
        let images = (0..count)
            .map(|i| ImageBlob::new(format!("aW1hZ2U{}", i)))
            .collect();
        self.reply(GenerationResult::Images(images))
    }

    pub fn reply_after(self, delay: Duration, result: GenerationResult) -> Self {
        self.push(Some(delay), Ok(result))
    }

    pub fn fail(self, error: Error) -> Self {
        self.push(None, Err(error))
    }

    pub fn fail_status(self, status: u16) -> Self {
        self.fail(
            GenerationError::Transport {
                status,
                body: "scripted failure".to_string(),
            }
            .into(),
        )
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(reply) => {
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                reply.result
            }
            None => Err(Error::empty("script exhausted")),
        }
    }

    fn backend_name(&self) -> &str {
        "scripted"
    }
}
