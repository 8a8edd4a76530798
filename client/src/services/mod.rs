//! Services module
//!
//! Business logic services that coordinate between the session store,
//! the API client and local persistence.

pub mod archive;
pub mod credentials;
pub mod recents;

pub use archive::ArchiveService;
pub use credentials::{CredentialProvider, KeyringCredentials, StaticToken};
pub use recents::{
    cookie_value, decode_recent_archives, encode_recent_archives,
    recent_archives_from_cookie_header, recent_archives_set_cookie, RecentsService,
};
