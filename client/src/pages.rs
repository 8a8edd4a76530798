//! Page-load guards
//!
//! Decide on page load whether to render or redirect, based on whether an
//! archive is open.

use crate::error::Result;
use crate::models::{ArchiveVideoKind, RecentArchive};
use crate::services::recent_archives_from_cookie_header;
use crate::session::{OpenedArchive, Route, SessionStore};

/// Outcome of loading a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad<T> {
    Render(T),
    Redirect(Route),
}

/// Data for the archive picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickerPage {
    pub recents: Vec<RecentArchive>,
}

/// Guard for pages inside an archive: without an open archive, go to the picker
pub async fn archive_guard(session: &SessionStore) -> PageLoad<OpenedArchive> {
    match session.opened_archive_always().await {
        Ok(archive) => PageLoad::Render(archive),
        Err(_) => {
            tracing::debug!("No archive open, redirecting to picker");
            PageLoad::Redirect(Route::ArchivePicker)
        }
    }
}

/// Load the archive picker from the request's `Cookie` header, falling
/// back to the session's own recents when the cookie is absent.
/// With an archive already open, go straight to its videos.
pub async fn picker_load(
    session: &SessionStore,
    cookie_header: Option<&str>,
) -> Result<PageLoad<PickerPage>> {
    if session.current().await.is_some() {
        return Ok(PageLoad::Redirect(Route::Videos(ArchiveVideoKind::default())));
    }

    let recents = match recent_archives_from_cookie_header(cookie_header)? {
        Some(recents) => recents,
        None => session.recents().await,
    };
    Ok(PageLoad::Render(PickerPage { recents }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECENT_ARCHIVES_COOKIE;
    use crate::models::Archive;
    use crate::services::encode_recent_archives;
    use crate::session::LogNavigator;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_guard_redirects_without_archive() {
        let session = SessionStore::new(Arc::new(LogNavigator));

        assert_eq!(
            archive_guard(&session).await,
            PageLoad::Redirect(Route::ArchivePicker)
        );
    }

    #[tokio::test]
    async fn test_guard_renders_open_archive() {
        let session = SessionStore::new(Arc::new(LogNavigator));
        session
            .set_current_archive(Archive::new("https://h/", "abc"))
            .await
            .unwrap();

        match archive_guard(&session).await {
            PageLoad::Render(archive) => assert_eq!(archive.slug, "abc"),
            other => panic!("unexpected page load: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_picker_seeded_from_cookie() {
        let session = SessionStore::new(Arc::new(LogNavigator));
        let recents = vec![Archive::new("https://h/", "abc")];
        let header = format!(
            "{}={}",
            RECENT_ARCHIVES_COOKIE,
            encode_recent_archives(&recents).unwrap()
        );

        assert_eq!(
            picker_load(&session, Some(&header)).await.unwrap(),
            PageLoad::Render(PickerPage { recents })
        );
        assert_eq!(
            picker_load(&session, None).await.unwrap(),
            PageLoad::Render(PickerPage { recents: vec![] })
        );
    }

    #[tokio::test]
    async fn test_picker_lists_archives_opened_in_session() {
        let session = SessionStore::new(Arc::new(LogNavigator));
        let archive = Archive::new("https://h/", "abc");
        session.set_current_archive(archive.clone()).await.unwrap();
        session.reset().await;

        assert_eq!(
            picker_load(&session, None).await.unwrap(),
            PageLoad::Render(PickerPage {
                recents: vec![archive.clone()]
            })
        );

        let set_cookie = session.recents_cookie().await.unwrap();
        let header = format!("theme=dark; {}", set_cookie.split(';').next().unwrap());
        assert_eq!(
            picker_load(&session, Some(&header)).await.unwrap(),
            PageLoad::Render(PickerPage {
                recents: vec![archive]
            })
        );
    }

    #[tokio::test]
    async fn test_picker_redirects_when_open() {
        let session = SessionStore::new(Arc::new(LogNavigator));
        session
            .set_current_archive(Archive::new("https://h/", "abc"))
            .await
            .unwrap();

        assert_eq!(
            picker_load(&session, None).await.unwrap(),
            PageLoad::Redirect(Route::Videos(ArchiveVideoKind::Videos))
        );
    }
}
