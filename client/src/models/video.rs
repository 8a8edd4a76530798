//! Video view models returned by the archive server

use super::element::{Element, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which listing of an archive to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveVideoKind {
    #[default]
    Videos,
    Livestreams,
    Shorts,
}

impl ArchiveVideoKind {
    pub const ALL: [ArchiveVideoKind; 3] = [Self::Videos, Self::Livestreams, Self::Shorts];

    /// Query-string token understood by the server
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Videos => "videos",
            Self::Livestreams => "livestreams",
            Self::Shorts => "shorts",
        }
    }
}

impl fmt::Display for ArchiveVideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveVideoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown video kind: {}", s))
    }
}

/// Summary row for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoBrief {
    pub id: String,
    pub title: String,
    pub uploaded: Timestamp,
    #[serde(alias = "thumbnail")]
    pub thumbnail_id: String,
}

/// User-authored annotation anchored to a point in a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Seconds from the start of the video
    pub timestamp: f64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Note {
    pub fn new(timestamp: f64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Full detail of one archived video with the history of its mutable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetailed {
    pub uploaded: Timestamp,
    pub width: u32,
    pub height: u32,
    pub title: Element<String>,
    pub description: Element<String>,
    pub views: Element<Option<u64>>,
    pub likes: Element<Option<u64>>,
    /// Thumbnail ids over time
    pub thumbnail: Element<String>,
    pub deleted: Element<bool>,
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Shape not defined by the server yet
    #[serde(default)]
    pub comments: serde_json::Value,
}

impl VideoDetailed {
    /// Whether the title, description or thumbnail changed since the previous recording
    pub fn was_updated(&self) -> bool {
        self.title.was_updated() || self.description.was_updated() || self.thumbnail.was_updated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "uploaded": "2022-11-03T00:00:00",
        "width": 1920,
        "height": 1080,
        "title": {"2023-01-01T10:00:00": "Original"},
        "description": {"2023-01-01T10:00:00": "About the video"},
        "views": {"2023-01-01T10:00:00": 100, "2023-01-02T10:00:00": 250},
        "likes": {"2023-01-01T10:00:00": null},
        "thumbnail": {"2023-01-01T10:00:00": "a1b2"},
        "deleted": {"2023-01-01T10:00:00": false},
        "notes": [
            {"id": "6f8b3f0e-8d57-4c7c-9df1-5b0f5c8e2a11", "timestamp": 42, "title": "Intro", "body": "Starts here"}
        ],
        "comments": {}
    }"#;

    #[test]
    fn test_kind_tokens() {
        assert_eq!(ArchiveVideoKind::Videos.as_str(), "videos");
        assert_eq!(ArchiveVideoKind::Livestreams.as_str(), "livestreams");
        assert_eq!(ArchiveVideoKind::Shorts.as_str(), "shorts");

        for kind in ArchiveVideoKind::ALL {
            assert_eq!(kind.to_string().parse::<ArchiveVideoKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }

        assert!("clips".parse::<ArchiveVideoKind>().is_err());
        assert!("Videos".parse::<ArchiveVideoKind>().is_err());
    }

    #[test]
    fn test_parse_video_brief() {
        let briefs: Vec<VideoBrief> = serde_json::from_str(
            r#"[
                {"id": "v1", "title": "First", "uploaded": "2022-11-03", "thumbnail_id": "t1"},
                {"id": "v2", "title": "Second", "uploaded": "2022-11-04T12:00:00Z", "thumbnail": "t2"}
            ]"#,
        )
        .unwrap();

        assert_eq!(briefs.len(), 2);
        assert_eq!(briefs[0].thumbnail_id, "t1");
        assert_eq!(briefs[1].thumbnail_id, "t2");
        assert!(briefs[0].uploaded < briefs[1].uploaded);
    }

    #[test]
    fn test_parse_video_detailed() {
        let video: VideoDetailed = serde_json::from_str(DETAIL_JSON).unwrap();

        assert_eq!(video.width, 1920);
        assert_eq!(video.views.current(), Some(&Some(250)));
        assert_eq!(video.likes.current(), Some(&None));
        assert_eq!(video.notes.len(), 1);
        assert_eq!(video.notes[0].title, "Intro");
        assert_eq!(video.notes[0].timestamp, 42.0);
    }

    #[test]
    fn test_fresh_video_not_updated() {
        let video: VideoDetailed = serde_json::from_str(DETAIL_JSON).unwrap();

        // views changed, but only title/description/thumbnail count
        assert!(video.views.was_updated());
        assert!(!video.was_updated());
    }

    #[test]
    fn test_video_updated_on_thumbnail_change() {
        let mut video: VideoDetailed = serde_json::from_str(DETAIL_JSON).unwrap();
        video
            .thumbnail
            .record("2023-03-01T00:00:00".parse().unwrap(), "c3d4".to_string());

        assert!(video.was_updated());
    }

    #[test]
    fn test_video_updated_on_title_change() {
        let mut video: VideoDetailed = serde_json::from_str(DETAIL_JSON).unwrap();
        video
            .title
            .record("2023-03-01T00:00:00".parse().unwrap(), "Renamed".to_string());

        assert!(video.was_updated());
    }

    #[test]
    fn test_note_without_body() {
        let note: Note = serde_json::from_str(
            r#"{"id": "6f8b3f0e-8d57-4c7c-9df1-5b0f5c8e2a11", "timestamp": 3, "title": "Quick"}"#,
        )
        .unwrap();

        assert_eq!(note.body, "");
    }

    #[test]
    fn test_note_with_fractional_timestamp() {
        let note: Note = serde_json::from_str(
            r#"{"id": "6f8b3f0e-8d57-4c7c-9df1-5b0f5c8e2a11", "timestamp": 12.5, "title": "Mid"}"#,
        )
        .unwrap();

        assert_eq!(note.timestamp, 12.5);
    }

    #[test]
    fn test_new_notes_get_distinct_ids() {
        let a = Note::new(1.0, "a", "");
        let b = Note::new(1.0, "a", "");

        assert_ne!(a.id, b.id);
    }
}
