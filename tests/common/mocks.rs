use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use topic_muse::{
    Error, Result,
    api::{ApiReply, GenerationApi, GenerationRequest},
};

/// Mock generation API that replays queued replies and records requests
#[derive(Debug, Default)]
pub struct MockGenerationApi {
    pub replies: Mutex<VecDeque<ApiReply>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerationApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(self, replies: Vec<ApiReply>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationApi for MockGenerationApi {
    async fn generate(&self, request: &GenerationRequest) -> Result<ApiReply> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::internal("No more mock replies available"))
    }
}
