//! Source Editor
//!
//! Owns the mutable client state for one project: the loaded project and
//! sources (via [`Session`]) plus the project form. Saves create or update
//! the project; source edits forwarded by edit-mode entries are persisted one
//! source at a time.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::SourceApi;
use crate::entry::{EntryMode, SourceChange, SourceEntry};
use crate::model::{Project, ProjectCreate, ProjectDelete, ProjectUpdate, Source, SourceDraft};
use crate::session::{Existence, Session, SessionError, SessionResult, SessionState};

/// Project form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub password: String,
    /// Save as a new project instead of updating the selected one
    pub create_new: bool,
}

/// The request a save issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSave {
    Create(ProjectCreate),
    Update(ProjectUpdate),
}

impl ProjectForm {
    /// Build the save request for the given project id
    pub fn save_request(&self, project_id: Option<&str>) -> SessionResult<ProjectSave> {
        if self.create_new {
            return Ok(ProjectSave::Create(ProjectCreate {
                name: self.name.clone(),
                description: self.description.clone(),
                password: self.password.clone(),
            }));
        }

        let id = project_id.ok_or(SessionError::MissingProjectId)?;
        Ok(ProjectSave::Update(ProjectUpdate {
            id: id.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            password: self.password.clone(),
        }))
    }
}

/// Editor controller
pub struct SourceEditor {
    session: Session,
    form: RwLock<ProjectForm>,
}

impl SourceEditor {
    pub fn new(api: Arc<dyn SourceApi>, project_id: Option<String>) -> Self {
        Self {
            session: Session::new(api, project_id),
            form: RwLock::new(ProjectForm::default()),
        }
    }

    /// Select another project and load it
    pub async fn set_project_id(&self, project_id: Option<String>) -> SessionResult<Existence> {
        self.session.load(project_id).await
    }

    /// Load the currently selected project
    pub async fn reload(&self) -> SessionResult<Existence> {
        self.session.reload().await
    }

    pub async fn state(&self) -> SessionState {
        self.session.snapshot().await
    }

    pub async fn project_id(&self) -> Option<String> {
        self.session.project_id().await
    }

    /// Edit-mode entries, one per source, in backend order
    pub async fn entries(&self) -> Vec<SourceEntry> {
        let state = self.session.snapshot().await;
        SourceEntry::list(&state.sources, EntryMode::Edit)
    }

    pub async fn form(&self) -> ProjectForm {
        self.form.read().await.clone()
    }

    /// Mutate the form inputs
    pub async fn edit_form(&self, f: impl FnOnce(&mut ProjectForm)) {
        f(&mut *self.form.write().await);
    }

    /// Create or update the project from the form
    pub async fn save(&self) -> SessionResult<Project> {
        let project_id = self.session.project_id().await;
        let request = self.form.read().await.save_request(project_id.as_deref())?;
        let api = self.session.api();

        match request {
            ProjectSave::Create(body) => {
                let project = api.create_project(&body).await?;
                tracing::info!(project_id = %project.id, "project created");
                self.session.adopt(project.clone()).await;
                self.form.write().await.create_new = false;
                Ok(project)
            }
            ProjectSave::Update(body) => {
                let project = api.update_project(&body).await?;
                tracing::info!(project_id = %project.id, "project updated");
                self.session
                    .update_selected(&body.id, |state| state.project = Some(project.clone()))
                    .await;
                Ok(project)
            }
        }
    }

    /// Apply a field edit and persist the whole source.
    ///
    /// On failure the previous value is put back.
    pub async fn change_source(&self, change: SourceChange) -> SessionResult<Source> {
        let project_id = self.session.require_project_id().await?;

        let (edited, previous) = self
            .session
            .update_selected(&project_id, |state| {
                let source = state.sources.iter_mut().find(|s| s.id == change.id)?;
                let previous = source.set(change.field, change.value.clone());
                Some((source.clone(), previous))
            })
            .await
            .flatten()
            .ok_or_else(|| SessionError::SourceNotFound(change.id.clone()))?;

        match self.session.api().update_source(&project_id, &edited).await {
            Ok(saved) => {
                self.replace_source(&project_id, saved.clone()).await;
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(
                    source_id = %change.id,
                    field = %change.field,
                    error = %e,
                    "source update failed"
                );
                self.session
                    .update_selected(&project_id, |state| {
                        if let Some(source) = state.sources.iter_mut().find(|s| s.id == change.id) {
                            source.set(change.field, previous);
                        }
                    })
                    .await;
                Err(e.into())
            }
        }
    }

    /// Create a source and append it to the list
    pub async fn add_source(&self, draft: SourceDraft) -> SessionResult<Source> {
        let project_id = self.session.require_project_id().await?;
        let created = self.session.api().create_source(&project_id, &draft).await?;
        tracing::info!(source_id = %created.id, "source created");

        self.session
            .update_selected(&project_id, |state| state.sources.push(created.clone()))
            .await;
        Ok(created)
    }

    /// Delete a source and drop it from the list
    pub async fn delete_source(&self, source_id: &str) -> SessionResult<()> {
        let project_id = self.session.require_project_id().await?;
        let response = self.session.api().delete_source(&project_id, source_id).await?;
        if let Some(reason) = response.rejection() {
            tracing::warn!(source_id, %reason, "source delete rejected");
            return Err(SessionError::Rejected(reason));
        }
        tracing::info!(source_id, "source deleted");

        self.session
            .update_selected(&project_id, |state| state.sources.retain(|s| s.id != source_id))
            .await;
        Ok(())
    }

    /// Delete the selected project
    pub async fn delete_project(&self, password: &str) -> SessionResult<()> {
        let project_id = self.session.require_project_id().await?;
        let body = ProjectDelete {
            id: project_id.clone(),
            password: password.to_string(),
        };
        let response = self.session.api().delete_project(&body).await?;
        if let Some(reason) = response.rejection() {
            tracing::warn!(project_id = %project_id, %reason, "project delete rejected");
            return Err(SessionError::Rejected(reason));
        }
        tracing::info!(project_id = %project_id, "project deleted");

        self.session.clear(&project_id).await;
        Ok(())
    }

    async fn replace_source(&self, project_id: &str, saved: Source) {
        self.session
            .update_selected(project_id, |state| {
                if let Some(slot) = state.sources.iter_mut().find(|s| s.id == saved.id) {
                    *slot = saved;
                }
            })
            .await;
    }
}
