use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Stdin,
}

/// Full text of one document at the moment a command runs.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: DocumentSource,
    pub text: String,
}

impl Document {
    /// Load a document from a path, or from stdin when the path is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Could not read document from stdin")?;
            return Ok(Self {
                source: DocumentSource::Stdin,
                text,
            });
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read document at {}", path.display()))?;
        tracing::debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self {
            source: DocumentSource::Path(path.to_path_buf()),
            text,
        })
    }

    /// Replace the whole text with the result of `transform`.
    /// Returns whether anything changed.
    pub fn apply<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&str) -> String,
    {
        let updated = transform(&self.text);
        let changed = updated != self.text;
        self.text = updated;
        changed
    }

    /// Write the text back where it came from. Stdin documents go to stdout.
    ///
    /// Files are replaced in one step: the new content is written to a
    /// sibling temp file which is then renamed over the original. Symlinks
    /// are followed so the link survives, and the file keeps its mode.
    pub fn commit(&self) -> Result<()> {
        match &self.source {
            DocumentSource::Stdin => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(self.text.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
            DocumentSource::Path(path) => {
                let target = fs::canonicalize(path)
                    .with_context(|| format!("Could not resolve {}", path.display()))?;
                let permissions = fs::metadata(&target)
                    .with_context(|| format!("Could not stat {}", target.display()))?
                    .permissions();
                let dir = target.parent().unwrap_or_else(|| Path::new("."));

                let mut tmp = NamedTempFile::new_in(dir)
                    .with_context(|| format!("Could not create temp file in {}", dir.display()))?;
                tmp.write_all(self.text.as_bytes())?;
                tmp.as_file()
                    .set_permissions(permissions)
                    .with_context(|| format!("Could not set permissions for {}", path.display()))?;
                tmp.persist(&target)
                    .map_err(|e| anyhow!("Could not replace {}: {}", path.display(), e.error))?;
                tracing::info!("Updated {}", path.display());
                Ok(())
            }
        }
    }
}
