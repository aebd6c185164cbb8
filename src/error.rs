use std::fmt;

use thiserror::Error;

use crate::model::FunctionResponse;

/// Which of the two content API calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Put,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => f.write_str("GET"),
            Operation::Put => f.write_str("PUT"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GuestlogError {
    #[error("Use POST")]
    MethodNotAllowed,

    #[error("Invalid JSON")]
    InvalidJson,

    #[error("username and message required")]
    MissingFields,

    #[error("Server misconfigured: missing env vars")]
    Misconfigured,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("GitHub {op} failed: {status} {body}")]
    Upstream {
        op: Operation,
        status: u16,
        body: String,
    },

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stored message log is unreadable: {0}")]
    StoredLog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuestlogError {
    pub fn upstream(op: Operation, status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            op,
            status,
            body: body.into(),
        }
    }

    pub fn stored_log(reason: impl fmt::Display) -> Self {
        Self::StoredLog(reason.to_string())
    }

    /// HTTP status the handler answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::InvalidJson | Self::MissingFields | Self::Input(_) => 400,
            Self::Misconfigured
            | Self::Config(_)
            | Self::Upstream { .. }
            | Self::Http(_)
            | Self::StoredLog(_)
            | Self::Io(_)
            | Self::Json(_) => 500,
        }
    }

    pub fn into_response(self) -> FunctionResponse {
        FunctionResponse::text(self.status_code(), self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuestlogError>;
