//! Scripted backend for running the generator without network access.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ApiConnectionError, CompletionBackend, GenerationSettings};

/// Replies are consumed in order; once the queue is empty the default reply
/// (if any) is returned for every further call.
#[derive(Debug, Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Result<String, String>>>,
    default_reply: Option<String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: &str) -> Self {
        Self::new().then_reply(reply)
    }

    pub fn then_reply(self, reply: &str) -> Self {
        self.push(Ok(reply.to_string()));
        self
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.push(Err(message.to_string()));
        self
    }

    pub fn with_default_reply(mut self, reply: &str) -> Self {
        self.default_reply = Some(reply.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, reply: Result<String, String>) {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn generate_text(
        &self,
        prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<String, ApiConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ApiConnectionError::Backend(message)),
            None => self.default_reply.clone().ok_or_else(|| {
                ApiConnectionError::Backend("FakeBackend: no reply scripted".to_string())
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GenerationSettings {
        GenerationSettings {
            temperature: 0.0,
            max_tokens: 10,
            json_response: true,
        }
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let backend = FakeBackend::with_reply("first").then_fail("boom");
        assert_eq!(backend.generate_text("a", &settings()).await.unwrap(), "first");
        let err = backend.generate_text("b", &settings()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert!(backend.generate_text("c", &settings()).await.is_err());
        assert_eq!(backend.call_count(), 3);
        assert_eq!(backend.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn default_reply_after_queue_drains() {
        let backend = FakeBackend::new().with_default_reply("{}");
        assert_eq!(backend.generate_text("x", &settings()).await.unwrap(), "{}");
        assert_eq!(backend.generate_text("y", &settings()).await.unwrap(), "{}");
    }
}
