//! Scripted transport for driving a real Gemini client.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stepforge_error::HttpError;
use stepforge_models::{Transport, TransportRequest, TransportResponse};

/// One scripted reply: HTTP status and body.
#[derive(Debug, Clone)]
pub struct ScriptedReply(pub u16, pub String);

/// Replays replies in order and records the credential of every request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    credentials: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    /// Create a transport replaying `replies`.
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            credentials: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Credentials used so far, in order.
    pub fn credentials(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse, HttpError> {
        self.credentials
            .lock()
            .unwrap()
            .push(request.credential.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply(status, body)) => Ok(TransportResponse { status, body }),
            None => Err(HttpError::new("Script exhausted")),
        }
    }
}
