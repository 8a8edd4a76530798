//! Archive session store
//!
//! Holds the single currently open archive and the bounded list of
//! recently opened archives. State transitions are pure functions on
//! [`SessionState`]; [`SessionStore`] is the shared context object that
//! applies them, persists the recents list and triggers navigation.
//!
//! Archive-scoped operations need an [`OpenedArchive`], which can only be
//! obtained from [`SessionStore::opened_archive_always`].

pub mod navigation;

pub use navigation::{LogNavigator, Navigator, Route};

use crate::config::MAX_RECENT_ARCHIVES;
use crate::error::{AppError, Result};
use crate::models::{Archive, ArchiveVideoKind, RecentArchive};
use crate::services::{recent_archives_set_cookie, RecentsService};
use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    current: Option<Archive>,
    recents: VecDeque<RecentArchive>,
}

impl SessionState {
    /// State with no open archive and the newest `MAX_RECENT_ARCHIVES` of `recents`
    pub fn with_recents(recents: impl IntoIterator<Item = RecentArchive>) -> Self {
        let mut state = Self::default();
        for archive in recents {
            state.push_recent(archive);
        }
        state
    }

    /// Open `archive`: it becomes current and is appended to the recents
    pub fn open(mut self, archive: Archive) -> Self {
        self.push_recent(archive.clone());
        self.current = Some(archive);
        self
    }

    /// Re-open the newest recent archive without touching the recents list
    pub fn resume_last(mut self) -> Self {
        self.current = self.recents.back().cloned();
        self
    }

    /// Close the open archive; recents are kept
    pub fn reset(mut self) -> Self {
        self.current = None;
        self
    }

    pub fn current(&self) -> Option<&Archive> {
        self.current.as_ref()
    }

    /// Recently opened archives, oldest first
    pub fn recents(&self) -> impl ExactSizeIterator<Item = &RecentArchive> {
        self.recents.iter()
    }

    fn push_recent(&mut self, archive: RecentArchive) {
        while self.recents.len() >= MAX_RECENT_ARCHIVES {
            self.recents.pop_front();
        }
        self.recents.push_back(archive);
    }

    fn recents_vec(&self) -> Vec<RecentArchive> {
        self.recents.iter().cloned().collect()
    }
}

/// Handle proving an archive was open when it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedArchive(Archive);

impl OpenedArchive {
    pub fn archive(&self) -> &Archive {
        &self.0
    }
}

impl Deref for OpenedArchive {
    type Target = Archive;

    fn deref(&self) -> &Archive {
        &self.0
    }
}

/// Shared session context
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    recents_service: Option<RecentsService>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Store that keeps its state in memory only
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            recents_service: None,
            navigator,
        }
    }

    /// Store seeded with, and persisting to, the recents on disk
    pub async fn restore(recents_service: RecentsService, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let recents = recents_service.load().await?;
        tracing::info!("Restored {} recent archives", recents.len());

        Ok(Self {
            state: Arc::new(RwLock::new(SessionState::with_recents(recents))),
            recents_service: Some(recents_service),
            navigator,
        })
    }

    /// Open an archive, persist the recents and go to its video listing.
    ///
    /// The transition, persistence and navigation happen under one write
    /// lock; if persisting fails the state is left unchanged.
    pub async fn set_current_archive(&self, archive: Archive) -> Result<()> {
        let mut state = self.state.write().await;
        let next = state.clone().open(archive);

        if let Some(service) = &self.recents_service {
            service.save(&next.recents_vec()).await?;
        }

        if let Some(current) = next.current() {
            tracing::info!("Opened archive {} on {}", current.slug, current.server);
        }
        *state = next;

        self.navigator
            .navigate(&Route::Videos(ArchiveVideoKind::default()));

        Ok(())
    }

    /// The open archive. Fails with [`AppError::NoArchiveOpen`] when none is.
    pub async fn opened_archive_always(&self) -> Result<OpenedArchive> {
        self.state
            .read()
            .await
            .current()
            .cloned()
            .map(OpenedArchive)
            .ok_or(AppError::NoArchiveOpen)
    }

    /// Re-open the newest recent archive, if there is one
    pub async fn resume_last(&self) -> Option<OpenedArchive> {
        let mut state = self.state.write().await;
        *state = state.clone().resume_last();
        state.current().cloned().map(OpenedArchive)
    }

    pub async fn current(&self) -> Option<Archive> {
        self.state.read().await.current().cloned()
    }

    /// Recently opened archives, oldest first
    pub async fn recents(&self) -> Vec<RecentArchive> {
        self.state.read().await.recents_vec()
    }

    /// `Set-Cookie` value carrying the current recents list
    pub async fn recents_cookie(&self) -> Result<String> {
        recent_archives_set_cookie(&self.recents().await)
    }

    /// Close the open archive
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = state.clone().reset();
        tracing::info!("Session reset");
    }
}
