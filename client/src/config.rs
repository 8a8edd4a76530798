//! Application configuration constants
//!
//! Central location for configuration constants, limits and
//! wire-level names used throughout the client.

use std::time::Duration;

// ===== Session Limits =====

/// Maximum number of recently opened archives kept in the session.
/// The oldest entry is evicted first once the list is full.
pub const MAX_RECENT_ARCHIVES: usize = 30;

// ===== Persistence =====

/// Cookie holding the JSON-encoded list of recently opened archives
pub const RECENT_ARCHIVES_COOKIE: &str = "recentArchives";

/// File name of the persisted recents list inside the data directory
pub const RECENT_ARCHIVES_FILE: &str = "recent_archives.json";

// ===== Remote API =====

/// Path segment every archive endpoint lives under
pub const ARCHIVE_PATH: &str = "archive";

/// Header carrying the bearer token.
/// The archive server reads `Authentication`, not `Authorization`.
pub const AUTH_HEADER: &str = "Authentication";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("archive-browser/", env!("CARGO_PKG_VERSION"));

// ===== Credentials =====

/// Service name used for entries in the OS credential store
pub const CREDENTIAL_SERVICE_NAME: &str = "ArchiveBrowser";

/// Environment variable consulted by the command line for a bearer token
pub const TOKEN_ENV_VAR: &str = "ARCHIVE_BROWSER_TOKEN";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build the underlying reqwest client
    pub fn build_http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}
