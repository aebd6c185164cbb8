//! Serverless function that appends guestbook messages to a JSON file kept in
//! a GitHub repository, using the contents API as its only storage.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod message_log;
pub mod model;
pub mod serve;
pub mod store;

pub use client::GitHubClient;
pub use config::{GuestlogConfig, RepoSettings};
pub use error::{GuestlogError, Operation, Result};
pub use handler::MessageAppender;
pub use model::{
    AppendOutcome, Committer, FunctionRequest, FunctionResponse, Message, PutFileRequest,
    RemoteFile,
};
pub use store::ContentStore;
