//! # Sourcebook
//!
//! Client for managing bibliographic sources (citations) attached to
//! projects. Persistence lives in a separate backend reached over HTTP/JSON;
//! this crate holds client state and issues requests.
//!
//! ## Modules
//!
//! - [`api`]: `SourceApi` trait and its reqwest client
//! - [`route`]: `/<project id>/<mode>` path routing
//! - [`entry`]: view/edit rendering of one source
//! - [`session`]: existence-gated load pipeline shared by both screens
//! - [`editor`]: project form, saves and per-source edits
//! - [`viewer`]: read-only screen
//! - [`app`]: mounts the screen a path selects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sourcebook::{App, Config, Screen};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let app = App::connect("/my-project/view", &config)?;
//!     app.start().await?;
//!
//!     if let Screen::Viewer(viewer) = app.screen() {
//!         for entry in viewer.entries().await {
//!             println!("{:?}", entry.render());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod editor;
pub mod entry;
pub mod model;
pub mod route;
pub mod session;
pub mod viewer;

pub use api::{ApiError, ApiResult, SourceApi, SourceApiClient};
pub use app::{App, Screen};
pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig};
pub use editor::{ProjectForm, ProjectSave, SourceEditor};
pub use entry::{source_link, EntryInput, EntryMode, EntryView, SourceChange, SourceEntry};
pub use model::{
    DeleteResponse, FieldError, Project, ProjectCreate, ProjectDelete, ProjectUpdate, Source,
    SourceDelete, SourceDraft, SourceField,
};
pub use route::{Route, ViewMode};
pub use session::{Existence, SessionError, SessionResult, SessionState};
pub use viewer::SourceViewer;
