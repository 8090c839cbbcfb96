use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::checks::CheckRecorder;
use super::client::{ApiRequest, ApiResponse, ScenarioClient};
use super::steps::Step;
use crate::error::HttpError;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json(u16, Value),
    Raw(u16, &'static str),
    Unreachable,
}

/// Answers each path with a fixed reply and logs every request it sees.
#[derive(Debug)]
pub(crate) struct ScriptedClient {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedClient {
    /// A service where every step succeeds for the default scenario settings.
    pub(crate) fn healthy() -> Self {
        let replies = HashMap::from([
            ("/register".to_owned(), Reply::Json(200, json!({}))),
            ("/auth".to_owned(), Reply::Json(200, json!({ "token": "abc" }))),
            (
                "/info".to_owned(),
                Reply::Json(200, json!({ "schema": { "coins": 5 } })),
            ),
            ("/sendCoin".to_owned(), Reply::Json(200, json!({}))),
            ("/buy/pen".to_owned(), Reply::Json(200, json!({}))),
        ]);
        Self {
            replies,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with(mut self, path: &str, reply: Reply) -> Self {
        self.replies.insert(path.to_owned(), reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.path)
            .collect()
    }
}

#[async_trait]
impl ScenarioClient for ScriptedClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let reply = self.replies.get(&request.path).cloned();
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
        match reply {
            Some(Reply::Json(status, body)) => {
                Ok(ApiResponse::new(status, body.to_string().into_bytes()))
            }
            Some(Reply::Raw(status, body)) => {
                Ok(ApiResponse::new(status, body.as_bytes().to_vec()))
            }
            Some(Reply::Unreachable) => Err(HttpError::from("connection refused")),
            None => Ok(ApiResponse::new(404, Vec::new())),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryRecorder {
    records: Mutex<Vec<(Step, bool)>>,
}

impl MemoryRecorder {
    pub(crate) fn records(&self) -> Vec<(Step, bool)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl CheckRecorder for MemoryRecorder {
    fn record(&self, step: Step, passed: bool) {
        if let Ok(mut records) = self.records.lock() {
            records.push((step, passed));
        }
    }
}
