//! Backend API
//!
//! The [`SourceApi`] trait is the seam between the controllers and the
//! backend service. [`SourceApiClient`] talks HTTP/JSON; tests swap in an
//! in-memory implementation.
//!
//! ## Endpoints
//!
//! - `GET /projects/exists?project_id=ID` -> `{exists}`
//! - `GET|POST|PUT|DELETE /projects`
//! - `GET|POST|PUT|DELETE /projects/:project_id/sources`
//! - `GET /projects/:project_id/sources/:source_id`

mod client;
mod error;
#[cfg(test)]
pub(crate) mod testing;

pub use client::SourceApiClient;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::model::{
    DeleteResponse, Project, ProjectCreate, ProjectDelete, ProjectUpdate, Source, SourceDraft,
};

/// Operations the backend exposes for projects and their sources
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Whether a project with this id exists
    async fn project_exists(&self, project_id: &str) -> ApiResult<bool>;

    /// Fetch one project
    async fn get_project(&self, project_id: &str) -> ApiResult<Project>;

    /// Fetch every project
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;

    /// Create a project; the backend assigns the id
    async fn create_project(&self, body: &ProjectCreate) -> ApiResult<Project>;

    /// Update an existing project
    async fn update_project(&self, body: &ProjectUpdate) -> ApiResult<Project>;

    /// Delete a project and its sources
    async fn delete_project(&self, body: &ProjectDelete) -> ApiResult<DeleteResponse>;

    /// Fetch the sources of a project, in backend order
    async fn list_sources(&self, project_id: &str) -> ApiResult<Vec<Source>>;

    /// Fetch one source
    async fn get_source(&self, project_id: &str, source_id: &str) -> ApiResult<Source>;

    /// Create a source under a project
    async fn create_source(&self, project_id: &str, draft: &SourceDraft) -> ApiResult<Source>;

    /// Replace a source
    async fn update_source(&self, project_id: &str, source: &Source) -> ApiResult<Source>;

    /// Delete a source
    async fn delete_source(&self, project_id: &str, source_id: &str) -> ApiResult<DeleteResponse>;
}
