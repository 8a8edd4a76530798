//! Archive browser library
//!
//! Session store and REST client for browsing video archives hosted on a
//! remote archive server: open an archive, list its videos, livestreams
//! and shorts, inspect the recorded history of a video and annotate it
//! with notes.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod services;
pub mod session;
