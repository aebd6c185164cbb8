use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Inbound function event, shaped like the gateway payload serverless hosts deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub http_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl FunctionRequest {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// One guestbook entry as stored in the log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub username: String,
    pub message: String,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

impl Message {
    /// New entry stamped with the current time.
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Body of a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    pub success: bool,
    pub added: Message,
}

/// The parts of a contents API GET response the appender reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub sha: String,
    /// Base64, possibly wrapped with newlines.
    #[serde(default)]
    pub content: String,
    /// `base64` for regular files; `none` when the file is too large to inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

impl Default for Committer {
    fn default() -> Self {
        Self {
            name: "Netlify Function".to_string(),
            email: "netlify@example.com".to_string(),
        }
    }
}

/// Body of a contents API PUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutFileRequest {
    /// Commit message.
    pub message: String,
    pub content: String,
    pub sha: String,
    pub committer: Committer,
}
