//! Archive service
//!
//! High-level operations for the open archive. Ties the session store to
//! the API client so callers never pass the archive explicitly: every
//! archive-scoped call goes through the guarded accessor.

use crate::api::{video_file_api_link, video_thumbnail_api_link, ArchiveClient, FetchedVideo};
use crate::error::Result;
use crate::models::{Archive, ArchiveVideoKind, Note, VideoBrief};
use crate::services::CredentialProvider;
use crate::session::SessionStore;
use url::Url;

/// Service for browsing and annotating the open archive
#[derive(Clone)]
pub struct ArchiveService<C> {
    session: SessionStore,
    client: ArchiveClient<C>,
}

impl<C: CredentialProvider> ArchiveService<C> {
    pub fn new(session: SessionStore, client: ArchiveClient<C>) -> Self {
        Self { session, client }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Open an archive picked by the user
    pub async fn open(&self, archive: Archive) -> Result<()> {
        self.session.set_current_archive(archive).await
    }

    /// Create an archive on the server and open it
    pub async fn create_and_open(
        &self,
        server: &str,
        slug: &str,
        path: &str,
        target: &str,
    ) -> Result<Archive> {
        let archive = self
            .client
            .create_new_remote_archive(server, slug, path, target)
            .await?;
        self.open(archive.clone()).await?;
        Ok(archive)
    }

    /// Import an existing archive into the server and open it
    pub async fn import_and_open(&self, server: &str, slug: &str, path: &str) -> Result<Archive> {
        let archive = self.client.import_new_remote_archive(server, slug, path).await?;
        self.open(archive.clone()).await?;
        Ok(archive)
    }

    /// List one kind of video of the open archive
    pub async fn list_videos(&self, kind: ArchiveVideoKind) -> Result<Vec<VideoBrief>> {
        let archive = self.session.opened_archive_always().await?;
        self.client.fetch_videos_brief(&archive, kind).await
    }

    /// Detail of one video of the open archive
    pub async fn video_details(&self, id: &str) -> Result<FetchedVideo> {
        let archive = self.session.opened_archive_always().await?;
        self.client.fetch_video_details(&archive, id).await
    }

    /// Attach a new note to a video and return it
    pub async fn add_note(
        &self,
        video_id: &str,
        timestamp: f64,
        title: String,
        body: String,
    ) -> Result<Note> {
        let archive = self.session.opened_archive_always().await?;
        let note = Note::new(timestamp, title, body);
        self.client.create_note(&archive, video_id, &note).await?;
        Ok(note)
    }

    pub async fn edit_note(&self, video_id: &str, note: &Note) -> Result<()> {
        let archive = self.session.opened_archive_always().await?;
        self.client.update_note(&archive, video_id, note).await
    }

    /// Best-effort note removal; only a missing open archive is reported
    pub async fn remove_note(&self, video_id: &str, note: &Note) -> Result<()> {
        let archive = self.session.opened_archive_always().await?;
        self.client.delete_note(&archive, video_id, note).await;
        Ok(())
    }

    pub async fn thumbnail_link(&self, thumbnail_id: &str) -> Result<Url> {
        let archive = self.session.opened_archive_always().await?;
        video_thumbnail_api_link(&archive, thumbnail_id)
    }

    pub async fn file_link(&self, video_id: &str) -> Result<Url> {
        let archive = self.session.opened_archive_always().await?;
        video_file_api_link(&archive, video_id)
    }
}
