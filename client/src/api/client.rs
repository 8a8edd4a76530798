//! HTTP client for the archive server
//!
//! Every operation is a single request/response round trip. Failures are
//! reported as [`AppError::Http`] (transport), [`AppError::Status`]
//! (non-2xx reply) or [`AppError::MalformedPayload`] (unexpected body),
//! except for note deletion, which is best-effort.

use crate::config::{ClientConfig, AUTH_HEADER};
use crate::error::{AppError, Result};
use crate::models::{
    archives_url, Archive, ArchiveCreated, ArchiveVideoKind, CreateArchiveRequest,
    ImportArchiveRequest, Note, VideoBrief, VideoDetailed,
};
use crate::services::CredentialProvider;
use crate::session::OpenedArchive;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// A parsed video together with the exact text the server sent
#[derive(Debug, Clone)]
pub struct FetchedVideo {
    pub video: VideoDetailed,
    pub raw: String,
}

/// Client for one or more archive servers
#[derive(Clone)]
pub struct ArchiveClient<C> {
    http: reqwest::Client,
    credentials: C,
}

impl<C: CredentialProvider> ArchiveClient<C> {
    pub fn new(credentials: C) -> Result<Self> {
        Self::with_config(credentials, &ClientConfig::default())
    }

    pub fn with_config(credentials: C, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: config.build_http_client()?,
            credentials,
        })
    }

    /// Create a new archive on `server` that will capture `target`
    pub async fn create_new_remote_archive(
        &self,
        server: &str,
        slug: &str,
        path: &str,
        target: &str,
    ) -> Result<Archive> {
        tracing::info!("Creating archive {} on {}", slug, server);

        let body = CreateArchiveRequest {
            slug: slug.to_string(),
            path: path.to_string(),
            target: target.to_string(),
        };

        let response = self
            .authorized(Method::POST, intent_url(server, "create")?, server)
            .await?
            .json(&body)
            .send()
            .await?;

        let created: ArchiveCreated = read_json(response).await?;
        tracing::info!("Archive created: {}", created.slug);

        Ok(Archive::new(server, created.slug))
    }

    /// Register an archive that already exists at `path` on `server`
    pub async fn import_new_remote_archive(
        &self,
        server: &str,
        slug: &str,
        path: &str,
    ) -> Result<Archive> {
        tracing::info!("Importing archive {} from {} on {}", slug, path, server);

        let body = ImportArchiveRequest {
            slug: slug.to_string(),
            path: path.to_string(),
        };

        let response = self
            .authorized(Method::POST, intent_url(server, "existing")?, server)
            .await?
            .json(&body)
            .send()
            .await?;

        let created: ArchiveCreated = read_json(response).await?;
        tracing::info!("Archive imported: {}", created.slug);

        Ok(Archive::new(server, created.slug))
    }

    /// List one kind of video of the open archive, in server order
    pub async fn fetch_videos_brief(
        &self,
        archive: &OpenedArchive,
        kind: ArchiveVideoKind,
    ) -> Result<Vec<VideoBrief>> {
        let mut url = archive.base_url()?;
        url.query_pairs_mut().append_pair("kind", kind.as_str());

        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        read_json(response).await
    }

    /// Fetch one video, keeping the raw response text alongside the parsed value
    pub async fn fetch_video_details(&self, archive: &OpenedArchive, id: &str) -> Result<FetchedVideo> {
        let url = archive.endpoint(&["video", id])?;

        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let raw = checked(response).await?.text().await?;
        let video = serde_json::from_str(&raw)
            .map_err(|e| AppError::MalformedPayload(format!("Video {}: {}", id, e)))?;

        Ok(FetchedVideo { video, raw })
    }

    /// Attach a new note to a video
    pub async fn create_note(&self, archive: &OpenedArchive, video_id: &str, note: &Note) -> Result<()> {
        let url = archive.endpoint(&["video", video_id, "note"])?;

        let response = self
            .authorized(Method::POST, url, &archive.server)
            .await?
            .json(note)
            .send()
            .await?;
        checked(response).await?;

        tracing::info!("Note {} added to video {}", note.id, video_id);
        Ok(())
    }

    /// Replace the title, body and timestamp of an existing note
    pub async fn update_note(&self, archive: &OpenedArchive, video_id: &str, note: &Note) -> Result<()> {
        let url = note_url(archive, video_id, note)?;

        let response = self
            .authorized(Method::PATCH, url, &archive.server)
            .await?
            .json(note)
            .send()
            .await?;
        checked(response).await?;

        tracing::info!("Note {} updated on video {}", note.id, video_id);
        Ok(())
    }

    /// Delete a note. Best-effort: failures are logged and otherwise ignored.
    pub async fn delete_note(&self, archive: &OpenedArchive, video_id: &str, note: &Note) {
        if let Err(e) = self.try_delete_note(archive, video_id, note).await {
            tracing::warn!("Failed to delete note {} on video {}: {}", note.id, video_id, e);
        }
    }

    async fn try_delete_note(&self, archive: &OpenedArchive, video_id: &str, note: &Note) -> Result<()> {
        let url = note_url(archive, video_id, note)?;

        let response = self
            .authorized(Method::DELETE, url, &archive.server)
            .await?
            .send()
            .await?;
        checked(response).await?;

        tracing::info!("Note {} deleted from video {}", note.id, video_id);
        Ok(())
    }

    async fn authorized(&self, method: Method, url: Url, server: &str) -> Result<RequestBuilder> {
        let token = self.credentials.bearer_token(server).await?;

        tracing::debug!("{} {}", method, url);
        Ok(self
            .http
            .request(method, url)
            .header(AUTH_HEADER, format!("Bearer {}", token)))
    }
}

/// `{server}/archive?intent={intent}`
fn intent_url(server: &str, intent: &str) -> Result<Url> {
    let mut url = archives_url(server)?;
    url.query_pairs_mut().append_pair("intent", intent);
    Ok(url)
}

fn note_url(archive: &OpenedArchive, video_id: &str, note: &Note) -> Result<Url> {
    let note_id = note.id.to_string();
    archive.endpoint(&["video", video_id, "note", note_id.as_str()])
}

/// Turn a non-2xx response into [`AppError::Status`]
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Server returned status {}: {}", status, body);

    Err(AppError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = checked(response).await?.text().await?;
    serde_json::from_str(&text).map_err(|e| AppError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_url() {
        assert_eq!(
            intent_url("https://h/", "create").unwrap().as_str(),
            "https://h/archive?intent=create"
        );
        assert_eq!(
            intent_url("http://localhost:7667", "existing").unwrap().as_str(),
            "http://localhost:7667/archive?intent=existing"
        );
    }
}
