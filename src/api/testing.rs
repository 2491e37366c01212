//! In-memory backend used by controller tests.
//!
//! Records every call so tests can assert which requests were issued and
//! with what bodies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{ApiError, ApiResult, SourceApi};
use crate::model::{
    DeleteResponse, Project, ProjectCreate, ProjectDelete, ProjectUpdate, Source, SourceDraft,
};

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Exists(String),
    GetProject(String),
    ListProjects,
    CreateProject(ProjectCreate),
    UpdateProject(ProjectUpdate),
    DeleteProject(ProjectDelete),
    ListSources(String),
    GetSource(String, String),
    CreateSource(String, SourceDraft),
    UpdateSource(String, Source),
    DeleteSource(String, String),
}

#[derive(Default)]
struct MockState {
    projects: HashMap<String, Project>,
    sources: HashMap<String, Vec<Source>>,
    passwords: HashMap<String, String>,
    calls: Vec<Call>,
    next_id: u32,
    fail_source_updates: bool,
    fail_exists: bool,
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

pub fn source(id: &str, tag: &str, title: &str) -> Source {
    Source {
        id: id.to_string(),
        tag: tag.to_string(),
        url: format!("https://example.org/{}", id),
        author: "Au".to_string(),
        title: title.to_string(),
        date_accessed: "2024-01-01".to_string(),
        date_published: "2023-01-01".to_string(),
    }
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_project(self: &Arc<Self>, id: &str, sources: Vec<Source>) -> Arc<Self> {
        let mut state = self.state.lock().unwrap();
        state.projects.insert(
            id.to_string(),
            Project {
                id: id.to_string(),
                name: format!("{} name", id),
                description: format!("{} description", id),
            },
        );
        state.sources.insert(id.to_string(), sources);
        state.passwords.insert(id.to_string(), "x".to_string());
        drop(state);
        Arc::clone(self)
    }

    pub fn fail_source_updates(&self) {
        self.state.lock().unwrap().fail_source_updates = true;
    }

    pub fn fail_exists(&self) {
        self.state.lock().unwrap().fail_exists = true;
    }

    /// Hold existence checks for `project_id` until the returned handle is notified
    pub fn gate_exists(&self, project_id: &str) -> Arc<Notify> {
        self.gate(format!("exists:{}", project_id))
    }

    /// Hold source updates in `project_id` until the returned handle is notified
    pub fn gate_source_updates(&self, project_id: &str) -> Arc<Notify> {
        self.gate(format!("update:{}", project_id))
    }

    fn gate(&self, key: String) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(key, Arc::clone(&notify));
        notify
    }

    async fn pass_gate(&self, key: String) {
        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn missing(what: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("{} not found", what),
        }
    }
}

#[async_trait]
impl SourceApi for MockApi {
    async fn project_exists(&self, project_id: &str) -> ApiResult<bool> {
        self.record(Call::Exists(project_id.to_string()));

        self.pass_gate(format!("exists:{}", project_id)).await;

        let state = self.state.lock().unwrap();
        if state.fail_exists {
            return Err(ApiError::Unavailable("mock".to_string()));
        }
        Ok(state.projects.contains_key(project_id))
    }

    async fn get_project(&self, project_id: &str) -> ApiResult<Project> {
        self.record(Call::GetProject(project_id.to_string()));
        self.state
            .lock()
            .unwrap()
            .projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| Self::missing("project"))
    }

    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.record(Call::ListProjects);
        let mut projects: Vec<Project> =
            self.state.lock().unwrap().projects.values().cloned().collect();
        projects.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(projects)
    }

    async fn create_project(&self, body: &ProjectCreate) -> ApiResult<Project> {
        self.record(Call::CreateProject(body.clone()));
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let project = Project {
            id: format!("generated-{}", state.next_id),
            name: body.name.clone(),
            description: body.description.clone(),
        };
        state.projects.insert(project.id.clone(), project.clone());
        state.sources.insert(project.id.clone(), Vec::new());
        state.passwords.insert(project.id.clone(), body.password.clone());
        Ok(project)
    }

    async fn update_project(&self, body: &ProjectUpdate) -> ApiResult<Project> {
        self.record(Call::UpdateProject(body.clone()));
        let mut state = self.state.lock().unwrap();
        let project = state
            .projects
            .get_mut(&body.id)
            .ok_or_else(|| Self::missing("project"))?;
        project.name = body.name.clone();
        project.description = body.description.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, body: &ProjectDelete) -> ApiResult<DeleteResponse> {
        self.record(Call::DeleteProject(body.clone()));
        let mut state = self.state.lock().unwrap();
        if state.passwords.get(&body.id) != Some(&body.password) {
            return Ok(DeleteResponse {
                success: Some(false),
                message: Some("Invalid password".to_string()),
            });
        }
        state.passwords.remove(&body.id);
        state.sources.remove(&body.id);
        Ok(DeleteResponse {
            success: Some(state.projects.remove(&body.id).is_some()),
            message: None,
        })
    }

    async fn list_sources(&self, project_id: &str) -> ApiResult<Vec<Source>> {
        self.record(Call::ListSources(project_id.to_string()));
        Ok(self
            .state
            .lock()
            .unwrap()
            .sources
            .get(project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_source(&self, project_id: &str, source_id: &str) -> ApiResult<Source> {
        self.record(Call::GetSource(project_id.to_string(), source_id.to_string()));
        self.state
            .lock()
            .unwrap()
            .sources
            .get(project_id)
            .and_then(|list| list.iter().find(|s| s.id == source_id).cloned())
            .ok_or_else(|| Self::missing("source"))
    }

    async fn create_source(&self, project_id: &str, draft: &SourceDraft) -> ApiResult<Source> {
        self.record(Call::CreateSource(project_id.to_string(), draft.clone()));
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Source {
            id: format!("generated-{}", state.next_id),
            tag: draft.tag.clone(),
            url: draft.url.clone(),
            author: draft.author.clone(),
            title: draft.title.clone(),
            date_accessed: draft.date_accessed.clone(),
            date_published: draft.date_published.clone(),
        };
        state
            .sources
            .entry(project_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_source(&self, project_id: &str, source: &Source) -> ApiResult<Source> {
        self.record(Call::UpdateSource(project_id.to_string(), source.clone()));
        self.pass_gate(format!("update:{}", project_id)).await;

        let mut state = self.state.lock().unwrap();
        if state.fail_source_updates {
            return Err(ApiError::Status {
                status: 500,
                message: "update failed".to_string(),
            });
        }
        let slot = state
            .sources
            .get_mut(project_id)
            .and_then(|list| list.iter_mut().find(|s| s.id == source.id))
            .ok_or_else(|| Self::missing("source"))?;
        *slot = source.clone();
        Ok(source.clone())
    }

    async fn delete_source(&self, project_id: &str, source_id: &str) -> ApiResult<DeleteResponse> {
        self.record(Call::DeleteSource(project_id.to_string(), source_id.to_string()));
        let mut state = self.state.lock().unwrap();
        let list = state.sources.entry(project_id.to_string()).or_default();
        let before = list.len();
        list.retain(|s| s.id != source_id);
        Ok(DeleteResponse {
            success: Some(list.len() < before),
            message: None,
        })
    }
}
