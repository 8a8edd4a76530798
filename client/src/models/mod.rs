//! Data model
//!
//! View models exchanged with the archive server.
//! All models use serde for (de)serialization.

pub mod archive;
pub mod element;
pub mod video;

pub use archive::*;
pub use element::{Element, Timestamp};
pub use video::*;
