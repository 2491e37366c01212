//! Project Session
//!
//! Signals holding one project and its sources, plus the effect that loads
//! them whenever the project id changes. Each load takes a generation number;
//! responses belonging to an older generation are dropped, so a slow answer
//! for a previous project never overwrites the current one.

use leptos::*;

use crate::api::{self, Project, Source};
use crate::state::GlobalState;

/// What is known about the selected project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Existence {
    #[default]
    Unknown,
    Missing,
    Exists,
    /// The last load failed; the project may or may not exist
    Failed,
}

/// Reactive project state shared by the editor and viewer
#[derive(Clone, Copy)]
pub struct ProjectSession {
    pub existence: RwSignal<Existence>,
    pub project: RwSignal<Option<Project>>,
    pub sources: RwSignal<Vec<Source>>,
    generation: StoredValue<u64>,
}

impl ProjectSession {
    /// Start a new load generation, invalidating any in-flight load
    pub fn begin(&self) -> u64 {
        let ticket = self.generation.get_value() + 1;
        self.generation.set_value(ticket);
        ticket
    }

    /// The generation a write must still match to be applied
    pub fn ticket(&self) -> u64 {
        self.generation.get_value()
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get_value() == ticket
    }
}

/// Create a session that reloads whenever `project_id` changes
pub fn use_project_session(project_id: Signal<Option<String>>) -> ProjectSession {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let session = ProjectSession {
        existence: create_rw_signal(Existence::Unknown),
        project: create_rw_signal(None),
        sources: create_rw_signal(Vec::new()),
        generation: store_value(0),
    };

    create_effect(move |_| {
        let id = project_id.get();
        let ticket = session.begin();

        session.project.set(None);
        session.sources.set(Vec::new());

        let Some(id) = id else {
            session.existence.set(Existence::Missing);
            return;
        };
        session.existence.set(Existence::Unknown);

        let state = state.clone();
        spawn_local(async move {
            if let Err(e) = load(session, ticket, &id).await {
                if session.is_current(ticket) {
                    session.existence.set(Existence::Failed);
                    state.show_error(&e);
                }
            }
        });
    });

    session
}

async fn load(session: ProjectSession, ticket: u64, project_id: &str) -> Result<(), String> {
    let exists = api::project_exists(project_id).await?;
    if !session.is_current(ticket) {
        return Ok(());
    }

    if !exists {
        session.existence.set(Existence::Missing);
        return Ok(());
    }
    session.existence.set(Existence::Exists);

    let project = api::fetch_project(project_id).await?;
    let sources = api::fetch_sources(project_id).await?;
    if !session.is_current(ticket) {
        return Ok(());
    }

    session.project.set(Some(project));
    session.sources.set(sources);
    Ok(())
}
