use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{GuestlogError, Result};

pub const DEFAULT_FILE_PATH: &str = "public/messages.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything the appender may be configured with. Every field is optional
/// here; [`GuestlogConfig::resolve`] decides whether enough is present.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GuestlogConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub file_path: Option<String>,
    pub api_url: Option<String>,
}

/// Fully resolved target of the appender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSettings {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub file_path: String,
    pub api_url: String,
}

impl RepoSettings {
    /// Contents API URL for the configured file.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.file_path.trim_start_matches('/')
        )
    }
}

impl GuestlogConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            let content = std::fs::read_to_string(path).unwrap_or_default();
            toml::from_str(&content).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GuestlogError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".guestlog")
            .join("config.toml")
    }

    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn merge(self, other: GuestlogConfig) -> Self {
        Self {
            owner: other.owner.or(self.owner),
            repo: other.repo.or(self.repo),
            token: other.token.or(self.token),
            file_path: other.file_path.or(self.file_path),
            api_url: other.api_url.or(self.api_url),
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "owner" => self.owner = Some(value),
            "repo" => self.repo = Some(value),
            "token" => self.token = Some(value),
            "file_path" | "file-path" => self.file_path = Some(value),
            "api_url" | "api-url" => self.api_url = Some(value),
            _ => {
                return Err(GuestlogError::Input(format!(
                    "Unknown key '{key}'. Valid keys: owner, repo, token, file_path, api_url"
                )));
            }
        }
        Ok(())
    }

    pub fn resolve(&self) -> Result<RepoSettings> {
        let (Some(owner), Some(repo), Some(token)) = (
            non_empty(&self.owner),
            non_empty(&self.repo),
            non_empty(&self.token),
        ) else {
            return Err(GuestlogError::Misconfigured);
        };

        Ok(RepoSettings {
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.to_string(),
            file_path: non_empty(&self.file_path)
                .unwrap_or(DEFAULT_FILE_PATH)
                .to_string(),
            api_url: non_empty(&self.api_url)
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
