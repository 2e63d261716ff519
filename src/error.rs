use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong while installing a plugin release.
///
/// The text normalizers have no error type: they cannot fail.
#[derive(Debug, Error)]
pub enum KnifeError {
    /// The repository or version could not be resolved to a release page.
    #[error("Could not resolve release at {url}: {reason}")]
    Resolution { url: String, reason: String },

    #[error("No repository URL given")]
    MissingRepository,

    /// A request was rejected before a response arrived.
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Could not write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Refusing to install plugin with unsafe name '{0}'")]
    InvalidPluginName(String),

    #[error("Could not read input: {0}")]
    Prompt(#[source] io::Error),
}

impl KnifeError {
    pub fn resolution(url: impl Into<String>, reason: impl Into<String>) -> Self {
        KnifeError::Resolution {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn network(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        KnifeError::Network {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        KnifeError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failing_location() {
        let err = KnifeError::resolution("https://github.com/o/r/releases/latest", "status 404");
        assert_eq!(
            err.to_string(),
            "Could not resolve release at https://github.com/o/r/releases/latest: status 404"
        );

        assert_eq!(
            KnifeError::MissingRepository.to_string(),
            "No repository URL given"
        );

        let err = KnifeError::filesystem(
            ".obsidian/plugins/x",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains(".obsidian/plugins/x"));
        assert!(err.to_string().contains("denied"));

        let err = KnifeError::network("https://example.com/main.js", "connection reset");
        assert!(err.to_string().contains("connection reset"));
    }
}
