//! Shared fixtures: an in-memory content store that versions its one file the
//! way the contents API does.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::Value;

use guestlog::{
    ContentStore, GuestlogConfig, GuestlogError, MessageAppender, Operation, PutFileRequest,
    RemoteFile, RepoSettings, Result,
};

#[derive(Default)]
struct State {
    text: String,
    version: u64,
    reads: usize,
    writes: Vec<PutFileRequest>,
    fail_get: Option<(u16, String)>,
    fail_put: Option<(u16, String)>,
    raw_content: Option<String>,
    encoding: Option<String>,
    race_after_read: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn with_text(text: &str) -> Arc<Self> {
        let store = Self::default();
        store.state.lock().unwrap().text = text.to_string();
        Arc::new(store)
    }

    pub fn empty() -> Arc<Self> {
        Self::with_text("")
    }

    pub fn fail_get(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail_get = Some((status, body.to_string()));
    }

    pub fn fail_put(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail_put = Some((status, body.to_string()));
    }

    /// Serve this exact `content` field on GET instead of encoding the file.
    pub fn serve_raw_content(&self, content: &str) {
        self.state.lock().unwrap().raw_content = Some(content.to_string());
    }

    /// Report this `encoding` on GET, as the API does for oversized files.
    pub fn serve_encoding(&self, encoding: &str) {
        self.state.lock().unwrap().encoding = Some(encoding.to_string());
    }

    /// Simulate another writer committing right after every GET.
    pub fn race_after_read(&self) {
        self.state.lock().unwrap().race_after_read = true;
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }

    pub fn writes(&self) -> Vec<PutFileRequest> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn text(&self) -> String {
        self.state.lock().unwrap().text.clone()
    }

    pub fn log(&self) -> Vec<Value> {
        serde_json::from_str(&self.text()).unwrap()
    }

    fn sha(version: u64) -> String {
        format!("{version:040x}")
    }
}

/// GitHub wraps base64 content at 60 columns.
fn wrap(encoded: &str) -> String {
    encoded
        .as_bytes()
        .chunks(60)
        .map(|c| format!("{}\n", std::str::from_utf8(c).unwrap()))
        .collect()
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read_file(&self, _target: &RepoSettings) -> Result<RemoteFile> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        if let Some((status, body)) = &state.fail_get {
            return Err(GuestlogError::upstream(Operation::Get, *status, body.clone()));
        }
        let file = RemoteFile {
            sha: Self::sha(state.version),
            content: state
                .raw_content
                .clone()
                .unwrap_or_else(|| wrap(&BASE64.encode(&state.text))),
            encoding: Some(
                state
                    .encoding
                    .clone()
                    .unwrap_or_else(|| "base64".to_string()),
            ),
        };
        if state.race_after_read {
            state.version += 1;
        }
        Ok(file)
    }

    async fn write_file(&self, _target: &RepoSettings, request: &PutFileRequest) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.writes.push(request.clone());
        if let Some((status, body)) = &state.fail_put {
            return Err(GuestlogError::upstream(Operation::Put, *status, body.clone()));
        }
        if request.sha != Self::sha(state.version) {
            return Err(GuestlogError::upstream(
                Operation::Put,
                409,
                format!(
                    "{{\"message\":\"is at {} but expected {}\"}}",
                    Self::sha(state.version),
                    request.sha
                ),
            ));
        }
        let bytes = BASE64.decode(&request.content).unwrap();
        state.text = String::from_utf8(bytes).unwrap();
        state.version += 1;
        Ok(())
    }
}

pub fn config() -> GuestlogConfig {
    GuestlogConfig {
        owner: Some("octo".into()),
        repo: Some("guestbook".into()),
        token: Some("ghp_test".into()),
        ..Default::default()
    }
}

pub fn appender(store: Arc<MemoryStore>) -> MessageAppender {
    MessageAppender::new(config(), store)
}
