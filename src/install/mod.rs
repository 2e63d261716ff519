//! Writing fetched release assets into the vault's plugin directory.

use crate::error::KnifeError;
use crate::types::{AssetFile, InstallReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory and file creation, relative to the vault root.
pub trait VaultFs {
    /// Create `dir` and any missing parents. Existing directories are fine.
    fn create_dir_all(&self, dir: &str) -> Result<(), KnifeError>;

    /// Create `path` with `content`, replacing whatever was there.
    fn write_file(&self, path: &str, content: &str) -> Result<(), KnifeError>;
}

/// A vault that is a plain directory on disk.
#[derive(Debug, Clone)]
pub struct DiskVault {
    root: PathBuf,
}

impl DiskVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl VaultFs for DiskVault {
    fn create_dir_all(&self, dir: &str) -> Result<(), KnifeError> {
        let path = self.root.join(dir);
        tracing::debug!("Creating directory {}", path.display());
        fs::create_dir_all(&path).map_err(|e| KnifeError::filesystem(path, e))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<(), KnifeError> {
        let path = self.root.join(path);
        tracing::debug!("Writing {} ({} bytes)", path.display(), content.len());
        fs::write(&path, content).map_err(|e| KnifeError::filesystem(path, e))
    }
}

pub struct Installer<F> {
    fs: F,
    plugins_dir: String,
}

impl<F: VaultFs> Installer<F> {
    pub fn new(fs: F, plugins_dir: impl Into<String>) -> Self {
        Self {
            fs,
            plugins_dir: plugins_dir.into(),
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn target_dir(&self, plugin_name: &str) -> String {
        format!("{}/{}", self.plugins_dir.trim_end_matches('/'), plugin_name)
    }

    /// Create the plugin's directory and write each asset into it.
    ///
    /// Files are written one at a time; a failure part way through leaves
    /// the files written so far in place.
    pub fn install(
        &self,
        plugin_name: &str,
        version: &str,
        assets: &[AssetFile],
    ) -> Result<InstallReport, KnifeError> {
        if !is_safe_name(plugin_name) {
            return Err(KnifeError::InvalidPluginName(plugin_name.to_string()));
        }

        let target_dir = self.target_dir(plugin_name);
        self.fs.create_dir_all(&target_dir)?;

        let mut files = Vec::with_capacity(assets.len());
        for asset in assets {
            if !is_safe_name(&asset.name) {
                return Err(KnifeError::InvalidPluginName(asset.name.clone()));
            }
            self.fs
                .write_file(&format!("{}/{}", target_dir, asset.name), &asset.content)?;
            files.push(asset.name.clone());
        }

        tracing::info!(
            "Installed {} file(s) for {} into {}",
            files.len(),
            plugin_name,
            target_dir
        );
        Ok(InstallReport {
            plugin_name: plugin_name.to_string(),
            version: version.to_string(),
            target_dir,
            files,
        })
    }
}

/// One path component, nothing that climbs out of the plugins directory.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
