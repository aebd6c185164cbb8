//! The append handler: validate, read the log, add one entry, write it back.

use std::sync::Arc;

use serde_json::{Map, Number, Value};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::GuestlogConfig;
use crate::error::{GuestlogError, Result};
use crate::message_log;
use crate::model::{AppendOutcome, Committer, FunctionRequest, FunctionResponse, Message, PutFileRequest};
use crate::store::ContentStore;

/// Handles one append request end to end. Holds no per-request state, so one
/// instance serves any number of concurrent invocations.
#[derive(Clone)]
pub struct MessageAppender {
    config: Arc<GuestlogConfig>,
    store: Arc<dyn ContentStore>,
    committer: Committer,
}

impl MessageAppender {
    pub fn new(config: GuestlogConfig, store: Arc<dyn ContentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            committer: Committer::default(),
        }
    }

    pub fn with_committer(mut self, committer: Committer) -> Self {
        self.committer = committer;
        self
    }

    /// Run the request and render the outcome as a status code and body.
    pub async fn handle(&self, request: FunctionRequest) -> FunctionResponse {
        let span = info_span!("append", method = %request.http_method);
        async {
            let result = self
                .append(&request)
                .await
                .and_then(|outcome| Ok(serde_json::to_string(&outcome)?));
            match result {
                Ok(body) => FunctionResponse::text(200, body),
                Err(err) => {
                    match &err {
                        GuestlogError::Upstream { .. } => warn!(error = %err, "upstream rejected request"),
                        err if err.status_code() < 500 => debug!(error = %err, "rejected request"),
                        err => error!(error = %err, "append failed"),
                    }
                    err.into_response()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// The read-modify-write itself. Issues no network call unless the
    /// method, configuration and body all check out, and no PUT unless the
    /// GET produced a readable log.
    pub async fn append(&self, request: &FunctionRequest) -> Result<AppendOutcome> {
        if request.http_method != "POST" {
            return Err(GuestlogError::MethodNotAllowed);
        }
        let target = self.config.resolve()?;
        let submission = Submission::parse(request.body.as_deref())?;

        let remote = self.store.read_file(&target).await?;
        let mut log = message_log::decode_file(&remote)?;
        debug!(entries = log.len(), sha = %remote.sha, "fetched message log");

        let added = Message::new(submission.username, submission.message);
        message_log::push(&mut log, &added)?;

        let put = PutFileRequest {
            message: format!("Add message from {}", added.username),
            content: message_log::encode(&log)?,
            sha: remote.sha,
            committer: self.committer.clone(),
        };
        self.store.write_file(&target, &put).await?;

        info!(
            username = %added.username,
            entries = log.len(),
            path = %target.file_path,
            "message appended"
        );
        Ok(AppendOutcome {
            success: true,
            added,
        })
    }
}

/// Validated `username` and `message` from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Submission {
    username: String,
    message: String,
}

impl Submission {
    fn parse(body: Option<&str>) -> Result<Self> {
        let body = body.ok_or(GuestlogError::InvalidJson)?;
        let value: Value = serde_json::from_str(body).map_err(|_| GuestlogError::InvalidJson)?;
        let Value::Object(fields) = value else {
            return Err(GuestlogError::MissingFields);
        };
        match (field(&fields, "username"), field(&fields, "message")) {
            (Some(username), Some(message)) => Ok(Self { username, message }),
            _ => Err(GuestlogError::MissingFields),
        }
    }
}

/// Present and truthy, coerced to a string. `null`, `false`, `0` and `""`
/// count as missing; other scalars use their JSON text, arrays and objects
/// their compact JSON.
fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

/// Whole floats print without a trailing `.0`, so `1.0` and `1e2` read as
/// `1` and `100`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}
