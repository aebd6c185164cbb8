use async_trait::async_trait;
use reqwest::{Client, Method, Response};

use crate::config::RepoSettings;
use crate::error::{GuestlogError, Operation, Result};
use crate::model::{PutFileRequest, RemoteFile};
use crate::store::ContentStore;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("guestlog/", env!("CARGO_PKG_VERSION"));

/// GitHub contents API client. Holds no credentials of its own; every call
/// authenticates with the token of the [`RepoSettings`] it is given.
#[derive(Debug, Clone, Default)]
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn build_request(&self, method: Method, target: &RepoSettings) -> reqwest::RequestBuilder {
        self.client
            .request(method, target.contents_url())
            .bearer_auth(&target.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    /// Non-success statuses become [`GuestlogError::Upstream`] carrying the raw body.
    async fn check(op: Operation, resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(GuestlogError::upstream(op, status.as_u16(), body))
    }
}

#[async_trait]
impl ContentStore for GitHubClient {
    async fn read_file(&self, target: &RepoSettings) -> Result<RemoteFile> {
        let resp = self.build_request(Method::GET, target).send().await?;
        let resp = Self::check(Operation::Get, resp).await?;
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(GuestlogError::stored_log)
    }

    async fn write_file(&self, target: &RepoSettings, request: &PutFileRequest) -> Result<()> {
        let resp = self
            .build_request(Method::PUT, target)
            .json(request)
            .send()
            .await?;
        Self::check(Operation::Put, resp).await?;
        Ok(())
    }
}
