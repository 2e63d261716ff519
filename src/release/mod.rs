//! Release resolution and asset fetching
//!
//! This module provides functionality for:
//! - Resolving a repository URL and version label to a release tag page
//! - Deriving the asset download location and plugin name from that page
//! - Fetching the fixed plugin asset set, optionally through a CORS relay

pub mod github;

pub use github::{build_release_url, download_base_url, parse_release_path, ReleasePath};

use crate::error::KnifeError;
use crate::types::{AssetFile, ReleaseRequest, ResolvedRelease};
use async_trait::async_trait;
use futures_util::future::try_join_all;

/// Files a plugin release may ship, in install order.
pub const ASSET_NAMES: [&str; 3] = ["main.js", "manifest.json", "styles.css"];

/// Text the hosting service's fallback page carries when a file is missing.
pub const NOT_FOUND_MARKER: &str = "Not Found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// URL after all redirects were followed.
    pub final_url: String,
    pub ok: bool,
    pub body: String,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`, following redirects.
    async fn get(&self, url: &str) -> Result<HttpResponse, KnifeError>;
}

pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, KnifeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vaultknife/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KnifeError::network("<client setup>", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, KnifeError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| KnifeError::network(url, e))?;

        let final_url = response.url().to_string();
        let status = response.status();
        if final_url != url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        let body = response
            .text()
            .await
            .map_err(|e| KnifeError::network(url, e))?;

        Ok(HttpResponse {
            final_url,
            ok: status.is_success(),
            body,
        })
    }
}

pub struct ReleaseFetcher<C> {
    client: C,
    relay: Option<String>,
}

impl<C: HttpClient> ReleaseFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            relay: None,
        }
    }

    /// Route asset downloads through `relay`, which is prepended verbatim.
    pub fn with_relay(mut self, relay: Option<String>) -> Self {
        self.relay = relay;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Find the tag page for `request` and work out where its assets live.
    pub async fn resolve(&self, request: &ReleaseRequest) -> Result<ResolvedRelease, KnifeError> {
        let lookup_url = build_release_url(request.repository_url(), request.version_label());
        tracing::info!("Resolving release {}", lookup_url);

        let response = self.client.get(&lookup_url).await?;
        if !response.ok {
            return Err(KnifeError::resolution(
                &lookup_url,
                "repository or version not found",
            ));
        }
        if !response.final_url.contains(github::TAG_MARKER) {
            return Err(KnifeError::resolution(
                &lookup_url,
                format!("redirect target {} is not a release page", response.final_url),
            ));
        }

        let path = parse_release_path(&response.final_url)?;
        let download_base_url = download_base_url(&response.final_url)?;
        tracing::debug!("Download base: {}", download_base_url);

        Ok(ResolvedRelease {
            release_url: response.final_url,
            download_base_url,
            owner: path.owner,
            plugin_name: path.repo,
            tag: path.tag,
        })
    }

    /// Download every known asset at once and keep the ones that exist.
    pub async fn fetch_assets(
        &self,
        download_base_url: &str,
    ) -> Result<Vec<AssetFile>, KnifeError> {
        let fetches = ASSET_NAMES.iter().map(|name| async move {
            let url = self.asset_url(download_base_url, name);
            let response = self.client.get(&url).await?;
            Ok::<_, KnifeError>(AssetFile {
                name: name.to_string(),
                content: response.body,
            })
        });

        let fetched = try_join_all(fetches).await?;
        Ok(fetched
            .into_iter()
            .filter(|asset| {
                let present = !asset.content.contains(NOT_FOUND_MARKER);
                if !present {
                    tracing::warn!("Release has no {}, skipping", asset.name);
                }
                present
            })
            .collect())
    }

    fn asset_url(&self, download_base_url: &str, name: &str) -> String {
        let direct = format!("{}/{}", download_base_url, name);
        match &self.relay {
            Some(relay) => format!("{}{}", relay, direct),
            None => direct,
        }
    }
}
