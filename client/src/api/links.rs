//! Direct links to binary resources served by the archive server.
//! Nothing is fetched here; the links are handed to an image or video player.

use crate::error::Result;
use crate::session::OpenedArchive;
use url::Url;

/// `{archive}/thumbnail/{thumbnail_id}`
pub fn video_thumbnail_api_link(archive: &OpenedArchive, thumbnail_id: &str) -> Result<Url> {
    archive.endpoint(&["thumbnail", thumbnail_id])
}

/// `{archive}/video/{video_id}/file`
pub fn video_file_api_link(archive: &OpenedArchive, video_id: &str) -> Result<Url> {
    archive.endpoint(&["video", video_id, "file"])
}
