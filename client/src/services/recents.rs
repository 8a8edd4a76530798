//! Recently opened archives
//!
//! The recents list travels in the `recentArchives` cookie as a
//! percent-encoded JSON array of `{server, slug}` records, and is
//! persisted between runs as a JSON file in the data directory.

use crate::config::{RECENT_ARCHIVES_COOKIE, RECENT_ARCHIVES_FILE};
use crate::error::{AppError, Result};
use crate::models::RecentArchive;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// Encode a recents list as a cookie value
pub fn encode_recent_archives(archives: &[RecentArchive]) -> Result<String> {
    let json = serde_json::to_string(archives)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Decode a cookie value. A missing or empty cookie is an empty list.
pub fn decode_recent_archives(value: Option<&str>) -> Result<Vec<RecentArchive>> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(Vec::new()),
    };

    let json = urlencoding::decode(value)
        .map_err(|e| AppError::Generic(format!("Invalid cookie encoding: {}", e)))?;

    Ok(serde_json::from_str(&json)?)
}

/// Find a cookie by name in a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Read the recents list out of a `Cookie` request header.
/// `None` when the request carries no `recentArchives` cookie.
pub fn recent_archives_from_cookie_header(
    header: Option<&str>,
) -> Result<Option<Vec<RecentArchive>>> {
    header
        .and_then(|h| cookie_value(h, RECENT_ARCHIVES_COOKIE))
        .map(|value| decode_recent_archives(Some(value)))
        .transpose()
}

/// `Set-Cookie` value storing the given recents list
pub fn recent_archives_set_cookie(archives: &[RecentArchive]) -> Result<String> {
    Ok(format!(
        "{}={}; Path=/; SameSite=Lax",
        RECENT_ARCHIVES_COOKIE,
        encode_recent_archives(archives)?
    ))
}

/// Service persisting the recents list to disk
#[derive(Clone)]
pub struct RecentsService {
    recents_path: PathBuf,
}

impl RecentsService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            recents_path: data_dir.join(RECENT_ARCHIVES_FILE),
        }
    }

    /// Load the persisted list; a missing file is an empty list
    pub async fn load(&self) -> Result<Vec<RecentArchive>> {
        let content = match fs::read_to_string(&self.recents_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No recents file at {:?}", self.recents_path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let recents = serde_json::from_str(&content)
            .map_err(|e| AppError::Generic(format!("Failed to parse recents: {}", e)))?;

        Ok(recents)
    }

    /// Save the list to disk
    pub async fn save(&self, recents: &[RecentArchive]) -> Result<()> {
        if let Some(parent) = self.recents_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(recents)?;
        fs::write(&self.recents_path, content).await?;
        tracing::debug!("Saved {} recent archives to {:?}", recents.len(), self.recents_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Archive;
    use tempfile::TempDir;

    fn sample() -> Vec<RecentArchive> {
        vec![
            Archive::new("https://h/", "abc"),
            Archive::new("http://localhost:7667", "music; live=1"),
            Archive::new("https://h/", "abc"),
        ]
    }

    #[test]
    fn test_cookie_round_trip() {
        let encoded = encode_recent_archives(&sample()).unwrap();

        assert!(!encoded.contains(';'));
        assert!(!encoded.contains(' '));
        assert_eq!(decode_recent_archives(Some(&encoded)).unwrap(), sample());
    }

    #[test]
    fn test_absent_cookie_is_empty() {
        assert!(decode_recent_archives(None).unwrap().is_empty());
        assert!(decode_recent_archives(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_cookie_is_error() {
        assert!(decode_recent_archives(Some("not-json")).is_err());
    }

    #[test]
    fn test_cookie_from_header() {
        let encoded = encode_recent_archives(&sample()).unwrap();
        let header = format!("theme=dark; {}={}; other=1", RECENT_ARCHIVES_COOKIE, encoded);

        assert_eq!(cookie_value(&header, "theme"), Some("dark"));
        assert_eq!(cookie_value(&header, "missing"), None);
        assert_eq!(
            recent_archives_from_cookie_header(Some(&header)).unwrap(),
            Some(sample())
        );
        assert_eq!(
            recent_archives_from_cookie_header(Some("theme=dark")).unwrap(),
            None
        );
        assert_eq!(recent_archives_from_cookie_header(None).unwrap(), None);

        let empty = format!("{}=", RECENT_ARCHIVES_COOKIE);
        assert_eq!(
            recent_archives_from_cookie_header(Some(&empty)).unwrap(),
            Some(vec![])
        );
    }

    #[test]
    fn test_set_cookie_value() {
        let set_cookie = recent_archives_set_cookie(&sample()).unwrap();
        let value = cookie_value(&set_cookie, RECENT_ARCHIVES_COOKIE).unwrap();

        assert_eq!(decode_recent_archives(Some(value)).unwrap(), sample());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let service = RecentsService::new(temp.path().to_path_buf());

        assert!(service.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_unreadable_file_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(RECENT_ARCHIVES_FILE)).unwrap();
        let service = RecentsService::new(temp.path().to_path_buf());

        assert!(matches!(service.load().await, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_persistence() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested");

        {
            let service = RecentsService::new(data_dir.clone());
            service.save(&sample()).await.unwrap();
        }

        {
            let service = RecentsService::new(data_dir);
            assert_eq!(service.load().await.unwrap(), sample());
        }
    }
}
