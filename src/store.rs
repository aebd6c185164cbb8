//! Seam between the appender and the versioned file store behind it.

use async_trait::async_trait;

use crate::config::RepoSettings;
use crate::error::Result;
use crate::model::{PutFileRequest, RemoteFile};

/// A store of files guarded by a per-version token.
///
/// `write_file` must only succeed if `request.sha` still names the current
/// version; otherwise it fails with [`crate::GuestlogError::Upstream`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the file and its current version token.
    async fn read_file(&self, target: &RepoSettings) -> Result<RemoteFile>;

    /// Conditionally overwrite the file.
    async fn write_file(&self, target: &RepoSettings, request: &PutFileRequest) -> Result<()>;
}
