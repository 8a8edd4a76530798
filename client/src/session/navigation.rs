//! Navigation between the pages of the client

use crate::models::ArchiveVideoKind;
use std::fmt;

/// Pages the client can send the user to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Archive picker seeded with recently opened archives
    ArchivePicker,
    /// Video listing of the open archive
    Videos(ArchiveVideoKind),
    /// Detail page for one video of the open archive
    Video(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ArchivePicker => "/".to_string(),
            Route::Videos(ArchiveVideoKind::Videos) => "/archive/videos".to_string(),
            Route::Videos(kind) => format!("/archive/videos?kind={}", kind),
            Route::Video(id) => format!("/archive/video/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Sends the user somewhere else
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator for front ends without pages; only records the move in the log
#[derive(Debug, Default, Clone)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &Route) {
        tracing::info!("Navigating to {}", route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::ArchivePicker.path(), "/");
        assert_eq!(
            Route::Videos(ArchiveVideoKind::Videos).path(),
            "/archive/videos"
        );
        assert_eq!(
            Route::Videos(ArchiveVideoKind::Shorts).path(),
            "/archive/videos?kind=shorts"
        );
        assert_eq!(Route::Video("a b".to_string()).path(), "/archive/video/a%20b");
    }
}
