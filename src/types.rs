use crate::error::KnifeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FOLDER: &str = ".obsidian";
pub const PLUGINS_DIR_NAME: &str = "plugins";
pub const DEFAULT_CORS_RELAY: &str = "https://cors-anywhere.herokuapp.com/";
pub const LATEST: &str = "latest";
pub const DEFAULT_HOST: &str = "https://github.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnifeSettings {
    #[serde(default = "default_vault_path")]
    pub vault_path: String,
    #[serde(default = "default_config_folder")]
    pub config_folder: String,
    #[serde(default = "default_cors_relay")]
    pub cors_relay: String,
    #[serde(default)]
    pub use_cors_relay: bool,
}

fn default_vault_path() -> String {
    ".".to_string()
}
fn default_config_folder() -> String {
    DEFAULT_CONFIG_FOLDER.to_string()
}
fn default_cors_relay() -> String {
    DEFAULT_CORS_RELAY.to_string()
}

impl Default for KnifeSettings {
    fn default() -> Self {
        Self {
            vault_path: default_vault_path(),
            config_folder: default_config_folder(),
            cors_relay: default_cors_relay(),
            use_cors_relay: false,
        }
    }
}

impl KnifeSettings {
    /// Vault-relative directory holding one folder per plugin.
    pub fn plugins_dir(&self) -> String {
        format!(
            "{}/{}",
            self.config_folder.trim_end_matches('/'),
            PLUGINS_DIR_NAME
        )
    }

    pub fn vault_root(&self) -> PathBuf {
        PathBuf::from(&self.vault_path)
    }

    /// Relay prefix for asset downloads, if the relay is switched on.
    pub fn relay(&self) -> Option<&str> {
        if self.use_cors_relay && !self.cors_relay.is_empty() {
            Some(&self.cors_relay)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct KnifeConfig {
    #[serde(default)]
    pub settings: KnifeSettings,
}

/// What the user asked to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    repository_url: String,
    version_label: String,
}

impl ReleaseRequest {
    /// Build a request from raw user input.
    ///
    /// Accepts full repository URLs as well as `owner/repo` shorthand. An
    /// empty version label means the latest release.
    pub fn new(repository_url: &str, version_label: &str) -> Result<Self, KnifeError> {
        let mut url = repository_url.trim().trim_end_matches('/');
        url = url.strip_suffix(".git").unwrap_or(url);
        if url.is_empty() {
            return Err(KnifeError::MissingRepository);
        }

        let repository_url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.split('/').count() == 2 && !url.contains(':') {
            format!("{}/{}", DEFAULT_HOST, url)
        } else {
            return Err(KnifeError::resolution(
                url,
                "expected a repository URL or 'owner/repo'",
            ));
        };

        let version_label = match version_label.trim() {
            "" => LATEST.to_string(),
            v => v.to_string(),
        };

        Ok(Self {
            repository_url,
            version_label,
        })
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    pub fn is_latest(&self) -> bool {
        self.version_label == LATEST
    }
}

/// A release page the hosting service confirmed exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub release_url: String,
    pub download_base_url: String,
    pub owner: String,
    pub plugin_name: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub plugin_name: String,
    pub version: String,
    pub target_dir: String,
    pub files: Vec<String>,
}
