//! Release URL shapes on the hosting service.
//!
//! Release pages live at `<host>/<owner>/<repo>/releases/tag/<version>`
//! and their assets at `<host>/<owner>/<repo>/releases/download/<version>`.

use crate::error::KnifeError;
use crate::types::LATEST;
use percent_encoding::percent_decode_str;
use reqwest::Url;

pub const TAG_MARKER: &str = "/releases/tag";
const TAG_SEGMENT: &str = "/releases/tag/";
const DOWNLOAD_SEGMENT: &str = "/releases/download/";

/// Build the page URL for a release
///
/// # Arguments
/// * `repository_url` - Repository URL without trailing slash
/// * `version` - "latest" or a specific tag like "v1.2.3"
pub fn build_release_url(repository_url: &str, version: &str) -> String {
    if version == LATEST {
        format!("{}/releases/latest", repository_url)
    } else {
        format!("{}/releases/tag/{}", repository_url, version)
    }
}

/// Rewrite a tag page URL into the base URL its assets download from.
pub fn download_base_url(release_url: &str) -> Result<String, KnifeError> {
    if !release_url.contains(TAG_SEGMENT) {
        return Err(KnifeError::resolution(
            release_url,
            "redirect target is not a release tag page",
        ));
    }
    Ok(release_url
        .replacen(TAG_SEGMENT, DOWNLOAD_SEGMENT, 1)
        .trim_end_matches('/')
        .to_string())
}

/// Named parts of a tag page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePath {
    pub owner: String,
    pub repo: String,
    pub tag: String,
}

/// Parse `<owner>/<repo>/releases/tag/<version>` out of a release page URL.
///
/// Tags may contain slashes (`cli/v0.41.90`), so everything after `tag/`
/// is the version. Segments are percent-decoded, so `plugin%401.0` reads
/// as `plugin@1.0`. Any other path shape is an error.
pub fn parse_release_path(release_url: &str) -> Result<ReleasePath, KnifeError> {
    let shape_error = |reason: &str| {
        KnifeError::resolution(
            release_url,
            format!(
                "{}; expected <owner>/<repo>/releases/tag/<version>",
                reason
            ),
        )
    };

    let url = Url::parse(release_url).map_err(|e| shape_error(e.to_string().as_str()))?;
    let decoded = url
        .path_segments()
        .map(|s| {
            s.filter(|seg| !seg.is_empty())
                .map(|seg| percent_decode_str(seg).decode_utf8().map(|d| d.into_owned()))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|_| shape_error("path is not valid UTF-8"))?
        .unwrap_or_default();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    match segments.as_slice() {
        [owner, repo, "releases", "tag", version @ ..] if !version.is_empty() => Ok(ReleasePath {
            owner: owner.to_string(),
            repo: repo.to_string(),
            tag: version.join("/"),
        }),
        _ => Err(shape_error("unexpected release URL shape")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_release_url() {
        assert_eq!(
            build_release_url("https://github.com/owner/repo", "v1.2.0"),
            "https://github.com/owner/repo/releases/tag/v1.2.0"
        );
        assert_eq!(
            build_release_url("https://github.com/owner/repo", "latest"),
            "https://github.com/owner/repo/releases/latest"
        );
        assert_eq!(
            build_release_url("https://github.com/owner/repo", "prefix/v1.0.0"),
            "https://github.com/owner/repo/releases/tag/prefix/v1.0.0"
        );
    }

    #[test]
    fn test_download_base_url() {
        assert_eq!(
            download_base_url("https://github.com/owner/repo/releases/tag/1.4.0").unwrap(),
            "https://github.com/owner/repo/releases/download/1.4.0"
        );
        assert!(download_base_url("https://github.com/owner/repo/releases").is_err());
    }

    #[test]
    fn test_parse_release_path() {
        let path = parse_release_path("https://github.com/owner/sample-plugin/releases/tag/1.0.0")
            .unwrap();
        assert_eq!(
            path,
            ReleasePath {
                owner: "owner".to_string(),
                repo: "sample-plugin".to_string(),
                tag: "1.0.0".to_string(),
            }
        );

        let path =
            parse_release_path("https://github.com/owner/repo/releases/tag/cli/v0.41.90").unwrap();
        assert_eq!(path.repo, "repo");
        assert_eq!(path.tag, "cli/v0.41.90");
    }

    #[test]
    fn test_parse_release_path_decodes_segments() {
        let path =
            parse_release_path("https://github.com/owner/repo/releases/tag/plugin%401.0").unwrap();
        assert_eq!(path.tag, "plugin@1.0");

        let path = parse_release_path("https://github.com/owner/my%20plugin/releases/tag/1.0.0")
            .unwrap();
        assert_eq!(path.repo, "my plugin");

        let err = parse_release_path("https://github.com/owner/repo/releases/tag/%FF").unwrap_err();
        assert!(matches!(err, KnifeError::Resolution { .. }));
    }

    #[test]
    fn test_parse_release_path_rejects_other_shapes() {
        for url in [
            "https://github.com/owner/repo/releases",
            "https://github.com/owner/repo/releases/tag/",
            "https://example.com/mirror/owner/repo/releases/tag/1.0.0",
            "https://github.com/owner/repo/tree/main",
            "not a url",
        ] {
            let err = parse_release_path(url).unwrap_err();
            assert!(
                matches!(err, KnifeError::Resolution { .. }),
                "{} gave {:?}",
                url,
                err
            );
        }
    }
}
