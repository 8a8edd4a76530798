//! Archive API client
//!
//! Maps application intents onto requests against `{server}/archive...`
//! endpoints and parses the JSON replies into typed view models.

pub mod client;
pub mod links;

pub use client::{ArchiveClient, FetchedVideo};
pub use links::{video_file_api_link, video_thumbnail_api_link};
