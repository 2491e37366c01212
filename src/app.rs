//! App Root
//!
//! Routes a location path to the editor or the viewer and hands it the
//! configured backend.

use std::sync::Arc;

use crate::api::{ApiResult, SourceApi, SourceApiClient};
use crate::config::Config;
use crate::editor::SourceEditor;
use crate::route::{Route, ViewMode};
use crate::session::{Existence, SessionResult};
use crate::viewer::SourceViewer;

/// The screen mounted for a path
pub enum Screen {
    Editor(SourceEditor),
    Viewer(SourceViewer),
}

/// Root of the client
pub struct App {
    mode: ViewMode,
    screen: Screen,
}

impl App {
    /// Mount the screen a path selects
    pub fn mount(path: &str, api: Arc<dyn SourceApi>) -> Self {
        let route = Route::parse(path);
        tracing::debug!(?route, "mounting");

        let screen = match route.mode {
            ViewMode::Edit => Screen::Editor(SourceEditor::new(api, route.project_id)),
            ViewMode::View => Screen::Viewer(SourceViewer::new(api, route.project_id)),
        };

        Self {
            mode: route.mode,
            screen,
        }
    }

    /// Mount against the HTTP backend named in the configuration
    pub fn connect(path: &str, config: &Config) -> ApiResult<Self> {
        let client = SourceApiClient::new(&config.api)?;
        Ok(Self::mount(path, Arc::new(client)))
    }

    /// Run the initial load of the mounted screen
    pub async fn start(&self) -> SessionResult<Existence> {
        match &self.screen {
            Screen::Editor(editor) => editor.reload().await,
            Screen::Viewer(viewer) => viewer.reload().await,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current route; follows the editor when it switches projects
    pub async fn route(&self) -> Route {
        let project_id = match &self.screen {
            Screen::Editor(editor) => editor.project_id().await,
            Screen::Viewer(viewer) => viewer.state().await.project_id,
        };

        Route {
            project_id,
            mode: self.mode,
        }
    }
}
