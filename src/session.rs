//! Project Session
//!
//! State shared by the editor and the viewer: which project is selected,
//! whether it exists, and its record and sources once loaded.
//!
//! Loads run as an explicit pipeline: existence check, then the project
//! record and source list fetched together. Every load takes a new
//! generation number; a load that finds its generation superseded when a
//! response arrives drops that response, so state always reflects the most
//! recently requested project regardless of response order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::api::{ApiError, SourceApi};
use crate::model::{Project, Source};

/// What is known about the selected project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Existence {
    /// Not checked yet, or a check is in flight
    #[default]
    Unknown,
    /// Backend reported no such project, or no project is selected
    Missing,
    /// Backend confirmed the project
    Exists,
}

/// Errors raised by editor and viewer operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No project selected")]
    MissingProjectId,

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Load superseded by a newer request")]
    Superseded,
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Snapshot of session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub project_id: Option<String>,
    pub existence: Existence,
    pub project: Option<Project>,
    pub sources: Vec<Source>,
}

/// Monotonic load counter
#[derive(Debug, Default)]
struct Generation(AtomicU64);

impl Generation {
    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Project state plus the load pipeline feeding it
pub struct Session {
    api: Arc<dyn SourceApi>,
    state: RwLock<SessionState>,
    generation: Generation,
}

impl Session {
    pub fn new(api: Arc<dyn SourceApi>, project_id: Option<String>) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState {
                project_id,
                ..Default::default()
            }),
            generation: Generation::default(),
        }
    }

    pub fn api(&self) -> &Arc<dyn SourceApi> {
        &self.api
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn project_id(&self) -> Option<String> {
        self.state.read().await.project_id.clone()
    }

    /// Selected project id, or an error when none is selected
    pub async fn require_project_id(&self) -> SessionResult<String> {
        self.project_id().await.ok_or(SessionError::MissingProjectId)
    }

    /// Run `f` against the state if `project_id` is still the selected project.
    ///
    /// Returns `None` without touching the state when another project was
    /// selected in the meantime.
    pub async fn update_selected<R>(
        &self,
        project_id: &str,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Option<R> {
        let mut state = self.state.write().await;
        if state.project_id.as_deref() != Some(project_id) {
            tracing::debug!(project_id, "project changed, dropping write");
            return None;
        }
        Some(f(&mut state))
    }

    /// Select a project and load it
    pub async fn load(&self, project_id: Option<String>) -> SessionResult<Existence> {
        let ticket = self.generation.begin();
        let existence = match project_id {
            Some(_) => Existence::Unknown,
            None => Existence::Missing,
        };
        let reset = SessionState {
            project_id: project_id.clone(),
            existence,
            ..Default::default()
        };
        self.commit(ticket, |state| *state = reset).await?;

        let Some(id) = project_id else {
            return Ok(Existence::Missing);
        };

        tracing::debug!(project_id = %id, generation = ticket, "checking project existence");
        let exists = self.api.project_exists(&id).await;
        let exists = self.settle(ticket, exists)?;

        let existence = if exists {
            Existence::Exists
        } else {
            Existence::Missing
        };
        self.commit(ticket, |state| state.existence = existence).await?;

        if !exists {
            tracing::info!(project_id = %id, "project does not exist");
            return Ok(existence);
        }

        let (project, sources) =
            tokio::join!(self.api.get_project(&id), self.api.list_sources(&id));
        let project = self.settle(ticket, project)?;
        let sources = self.settle(ticket, sources)?;

        tracing::debug!(project_id = %id, sources = sources.len(), "project loaded");
        self.commit(ticket, |state| {
            state.project = Some(project);
            state.sources = sources;
        })
        .await?;

        Ok(Existence::Exists)
    }

    /// Reload the currently selected project
    pub async fn reload(&self) -> SessionResult<Existence> {
        let id = self.project_id().await;
        self.load(id).await
    }

    /// Take over a project the caller just created, abandoning any load
    pub async fn adopt(&self, project: Project) {
        let mut state = self.state.write().await;
        self.generation.begin();
        *state = SessionState {
            project_id: Some(project.id.clone()),
            existence: Existence::Exists,
            project: Some(project),
            sources: Vec::new(),
        };
    }

    /// Forget a deleted project's data, unless another project was selected since
    pub async fn clear(&self, project_id: &str) {
        let mut state = self.state.write().await;
        if state.project_id.as_deref() != Some(project_id) {
            return;
        }
        self.generation.begin();
        *state = SessionState {
            project_id: Some(project_id.to_string()),
            existence: Existence::Missing,
            ..Default::default()
        };
    }

    /// Write to the state only if `ticket` is still the newest load.
    ///
    /// The check and the write happen under one lock acquisition, so a load
    /// that starts while this one waits for the lock always wins.
    async fn commit(&self, ticket: u64, f: impl FnOnce(&mut SessionState)) -> SessionResult<()> {
        let mut state = self.state.write().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(generation = ticket, "discarding superseded write");
            return Err(SessionError::Superseded);
        }
        f(&mut state);
        Ok(())
    }

    /// Turn a response into a value, or drop it if a newer load started
    fn settle<T>(&self, ticket: u64, response: Result<T, ApiError>) -> SessionResult<T> {
        if !self.generation.is_current(ticket) {
            tracing::debug!(generation = ticket, "discarding superseded response");
            return Err(SessionError::Superseded);
        }
        response.map_err(|e| {
            tracing::warn!(error = %e, "project load failed");
            SessionError::Api(e)
        })
    }
}
