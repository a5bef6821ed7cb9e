//! Transport that replays a fixed script of replies.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stepforge_error::HttpError;
use stepforge_models::{Transport, TransportRequest, TransportResponse};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Reply with this status and body
    Body(u16, String),
    /// Fail before any body is read
    NetworkError(String),
}

/// Replays replies in order; once the script runs out, every call fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    credentials: Arc<Mutex<Vec<String>>>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    /// Create a transport replaying `replies` in order.
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            ..Self::default()
        }
    }

    /// Credentials of every request sent so far, in order.
    pub fn credentials(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.credentials.lock().unwrap().len()
    }

    /// URLs of every request sent so far.
    #[allow(dead_code)]
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse, HttpError> {
        self.credentials
            .lock()
            .unwrap()
            .push(request.credential.clone());
        self.urls.lock().unwrap().push(request.url.clone());

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Body(status, body)) => Ok(TransportResponse { status, body }),
            Some(ScriptedReply::NetworkError(message)) => Err(HttpError::new(message)),
            None => Err(HttpError::new("Script exhausted")),
        }
    }
}
