//! Archive identity and the request/response bodies for archive creation

use crate::config::ARCHIVE_PATH;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// One archive hosted on one server. Two archives are equal when both
/// server and slug match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Archive {
    pub server: String,
    pub slug: String,
}

/// Entry of the recently opened archives list
pub type RecentArchive = Archive;

impl Archive {
    pub fn new(server: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            slug: slug.into(),
        }
    }

    /// `{server}/archive/{slug}`
    pub fn base_url(&self) -> Result<Url> {
        self.endpoint(&[])
    }

    /// `{server}/archive/{slug}/{segments...}` with every segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = archives_url(&self.server)?;
        url.path_segments_mut()
            .map_err(|_| cannot_be_base(&self.server))?
            .push(&self.slug)
            .extend(segments);
        Ok(url)
    }
}

/// `{server}/archive`, tolerating a trailing slash on the server URL
pub fn archives_url(server: &str) -> Result<Url> {
    let mut url = Url::parse(server)?;
    url.path_segments_mut()
        .map_err(|_| cannot_be_base(server))?
        .pop_if_empty()
        .push(ARCHIVE_PATH);
    Ok(url)
}

fn cannot_be_base(server: &str) -> AppError {
    AppError::Generic(format!("Server URL cannot hold a path: {}", server))
}

/// Body of `POST {server}/archive?intent=create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArchiveRequest {
    pub slug: String,
    pub path: String,
    pub target: String,
}

/// Body of `POST {server}/archive?intent=existing`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportArchiveRequest {
    pub slug: String,
    pub path: String,
}

/// Response to archive creation and import; other fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveCreated {
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_with_trailing_slash() {
        let archive = Archive::new("https://h/", "abc");
        assert_eq!(archive.base_url().unwrap().as_str(), "https://h/archive/abc");
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let archive = Archive::new("http://localhost:7667", "abc");
        assert_eq!(
            archive.base_url().unwrap().as_str(),
            "http://localhost:7667/archive/abc"
        );
    }

    #[test]
    fn test_base_url_under_server_prefix() {
        let archive = Archive::new("https://h/yark/", "abc");
        assert_eq!(
            archive.endpoint(&["video", "v1"]).unwrap().as_str(),
            "https://h/yark/archive/abc/video/v1"
        );
    }

    #[test]
    fn test_slug_is_percent_encoded() {
        let archive = Archive::new("https://h", "my archive/1");
        assert_eq!(
            archive.base_url().unwrap().as_str(),
            "https://h/archive/my%20archive%2F1"
        );
    }

    #[test]
    fn test_invalid_server_url() {
        let archive = Archive::new("not a url", "abc");
        assert!(matches!(archive.base_url(), Err(AppError::InvalidUrl(_))));

        let archive = Archive::new("mailto:someone@example.com", "abc");
        assert!(matches!(archive.base_url(), Err(AppError::Generic(_))));
    }

    #[test]
    fn test_equality_by_server_and_slug() {
        assert_eq!(Archive::new("https://h", "a"), Archive::new("https://h", "a"));
        assert_ne!(Archive::new("https://h", "a"), Archive::new("https://h", "b"));
        assert_ne!(Archive::new("https://h", "a"), Archive::new("https://g", "a"));
    }
}
