//! Credential providers
//!
//! Bearer tokens for archive servers come from an external provider.
//! `KeyringCredentials` keeps one token per server in the OS credential
//! store; `StaticToken` hands out a fixed token.

use crate::config::CREDENTIAL_SERVICE_NAME;
use crate::error::{AppError, Result};
use keyring::Entry;
use std::future::Future;

/// Supplies bearer tokens for archive servers
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self, server: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Same token for every server
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialProvider for StaticToken {
    async fn bearer_token(&self, _server: &str) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Per-server tokens in the OS credential store
#[derive(Clone, Default)]
pub struct KeyringCredentials;

impl KeyringCredentials {
    fn entry(server: &str) -> Result<Entry> {
        Entry::new(CREDENTIAL_SERVICE_NAME, server)
            .map_err(|e| AppError::Credentials(format!("Failed to create keyring entry: {}", e)))
    }

    /// Store the token for a server
    pub fn store_token(server: &str, token: &str) -> Result<()> {
        Self::entry(server)?
            .set_password(token)
            .map_err(|e| AppError::Credentials(format!("Failed to store token: {}", e)))?;

        tracing::info!("Token for {} stored in credential manager", server);
        Ok(())
    }

    /// Retrieve the token for a server
    pub fn get_token(server: &str) -> Result<String> {
        Self::entry(server)?
            .get_password()
            .map_err(|e| AppError::Credentials(format!("No token for {}: {}", server, e)))
    }

    /// Delete the token for a server
    pub fn delete_token(server: &str) -> Result<()> {
        Self::entry(server)?
            .delete_credential()
            .map_err(|e| AppError::Credentials(format!("Failed to delete token: {}", e)))?;

        tracing::info!("Token for {} deleted from credential manager", server);
        Ok(())
    }

    /// Check if a token is stored for a server
    pub fn has_token(server: &str) -> bool {
        Self::get_token(server).is_ok()
    }
}

impl CredentialProvider for KeyringCredentials {
    async fn bearer_token(&self, server: &str) -> Result<String> {
        let server = server.to_string();
        tokio::task::spawn_blocking(move || Self::get_token(&server))
            .await
            .map_err(|e| AppError::Generic(format!("Keyring lookup task failed: {}", e)))?
    }
}
