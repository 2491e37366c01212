//! Source Viewer
//!
//! Read-only counterpart of the editor: loads a project and its sources
//! through the same pipeline and renders them in view mode.

use std::sync::Arc;

use crate::api::SourceApi;
use crate::entry::{EntryMode, SourceEntry};
use crate::session::{Existence, Session, SessionError, SessionResult, SessionState};

/// Viewer controller
pub struct SourceViewer {
    session: Session,
}

impl SourceViewer {
    pub fn new(api: Arc<dyn SourceApi>, project_id: Option<String>) -> Self {
        Self {
            session: Session::new(api, project_id),
        }
    }

    /// Select another project and load it
    pub async fn set_project_id(&self, project_id: Option<String>) -> SessionResult<Existence> {
        self.session.load(project_id).await
    }

    pub async fn reload(&self) -> SessionResult<Existence> {
        self.session.reload().await
    }

    pub async fn state(&self) -> SessionState {
        self.session.snapshot().await
    }

    pub async fn entries(&self) -> Vec<SourceEntry> {
        let state = self.session.snapshot().await;
        SourceEntry::list(&state.sources, EntryMode::View)
    }

    /// Navigation target for activating the entry of `source_id`
    pub async fn open(&self, source_id: &str) -> SessionResult<String> {
        self.entries()
            .await
            .iter()
            .find(|entry| entry.key() == source_id)
            .and_then(SourceEntry::activate)
            .ok_or_else(|| SessionError::SourceNotFound(source_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{source, Call, MockApi};

    #[tokio::test]
    async fn test_viewer_renders_view_entries() {
        let api = MockApi::new()
            .with_project("p1", vec![source("1", "A", "T1"), source("2", "B", "T2")]);
        let viewer = SourceViewer::new(api.clone(), Some("p1".to_string()));

        assert_eq!(viewer.reload().await.unwrap(), Existence::Exists);

        let entries = viewer.entries().await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.mode() == EntryMode::View));
        assert_eq!(viewer.state().await.project.unwrap().name, "p1 name");
    }

    #[tokio::test]
    async fn test_open_navigates_to_source_url() {
        let mut cited = source("1", "A", "T1");
        cited.url = "foo".to_string();
        let api = MockApi::new().with_project("p1", vec![cited]);
        let viewer = SourceViewer::new(api, Some("p1".to_string()));
        viewer.reload().await.unwrap();

        assert_eq!(viewer.open("1").await.unwrap(), "/source/foo");
        assert!(matches!(
            viewer.open("9").await,
            Err(SessionError::SourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_viewer_never_writes() {
        let api = MockApi::new().with_project("p1", vec![source("1", "A", "T1")]);
        let viewer = SourceViewer::new(api.clone(), None);
        viewer.set_project_id(Some("p1".to_string())).await.unwrap();

        assert!(api.calls().iter().all(|c| matches!(
            c,
            Call::Exists(_) | Call::GetProject(_) | Call::ListSources(_)
        )));
    }
}
