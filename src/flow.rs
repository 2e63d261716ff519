//! The install command end to end: prompt, resolve, fetch, install, report.

use crate::error::KnifeError;
use crate::host::{Host, PromptField};
use crate::install::{Installer, VaultFs};
use crate::release::{HttpClient, ReleaseFetcher, ASSET_NAMES};
use crate::types::{InstallReport, ReleaseRequest, LATEST};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const PROMPT_TITLE: &str = "GH repo url";

pub fn prompt_fields() -> Vec<PromptField> {
    vec![
        PromptField::new("url"),
        PromptField::new("version").with_default(LATEST),
    ]
}

/// Ask the host for a repository URL and version label.
pub fn collect_request<H: Host>(host: &H) -> Result<ReleaseRequest, KnifeError> {
    let answers = host
        .prompt_for_text(PROMPT_TITLE, &prompt_fields())
        .map_err(KnifeError::Prompt)?;
    let url = answers.first().map(String::as_str).unwrap_or_default();
    let version = answers.get(1).map(String::as_str).unwrap_or(LATEST);
    ReleaseRequest::new(url, version)
}

/// Resolve the release, download its assets and write them into the vault.
pub async fn install_release<C, F>(
    request: &ReleaseRequest,
    fetcher: &ReleaseFetcher<C>,
    installer: &Installer<F>,
    progress: &ProgressBar,
) -> Result<InstallReport, KnifeError>
where
    C: HttpClient,
    F: VaultFs,
{
    progress.set_message(format!("Resolving {}", request.repository_url()));
    let release = fetcher.resolve(request).await?;

    progress.set_message(format!("Downloading {} {}", release.plugin_name, release.tag));
    let assets = fetcher.fetch_assets(&release.download_base_url).await?;
    if assets.is_empty() {
        return Err(KnifeError::resolution(
            &release.release_url,
            format!("release has none of {}", ASSET_NAMES.join(", ")),
        ));
    }

    progress.set_message(format!("Installing {}", release.plugin_name));
    installer.install(&release.plugin_name, &release.tag, &assets)
}

pub fn success_message(report: &InstallReport) -> String {
    format!(
        "Successfully installed {} version: {}. Please restart Obsidian to make changes visible.",
        report.plugin_name, report.version
    )
}

/// Show exactly one message for the outcome of an install.
pub fn report<H: Host>(host: &H, outcome: &Result<InstallReport, KnifeError>) {
    match outcome {
        Ok(report) => host.show_message(&success_message(report)),
        Err(e) => {
            tracing::debug!("Install failed: {:?}", e);
            host.show_message(&e.to_string());
        }
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run the whole install command. Every failure ends up as the single
/// message shown to the user. Returns whether the install succeeded.
pub async fn install_flow<H, C, F>(
    host: &H,
    fetcher: &ReleaseFetcher<C>,
    installer: &Installer<F>,
) -> bool
where
    H: Host,
    C: HttpClient,
    F: VaultFs,
{
    let outcome = match collect_request(host) {
        Ok(request) => {
            let progress = spinner();
            let outcome = install_release(&request, fetcher, installer, &progress).await;
            progress.finish_and_clear();
            outcome
        }
        Err(e) => Err(e),
    };
    report(host, &outcome);
    outcome.is_ok()
}
