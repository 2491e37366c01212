//! Backend REST API Client
//!
//! reqwest implementation of [`SourceApi`] against the project/source backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use urlencoding::encode;

use super::{ApiError, ApiResult, SourceApi};
use crate::config::ApiConfig;
use crate::model::{
    DeleteResponse, ExistsResponse, Project, ProjectCreate, ProjectDelete, ProjectUpdate, Source,
    SourceDelete, SourceDraft,
};

/// HTTP client for the backend
#[derive(Debug, Clone)]
pub struct SourceApiClient {
    client: Client,
    base_url: String,
}

impl SourceApiClient {
    /// Create a client from the API configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every request is issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn sources_url(&self, project_id: &str) -> String {
        self.url(&format!("/projects/{}/sources", encode(project_id)))
    }

    /// Send a request and decode a JSON body from a 2xx response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "backend response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %message, "backend returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url))
    }
}

#[async_trait]
impl SourceApi for SourceApiClient {
    async fn project_exists(&self, project_id: &str) -> ApiResult<bool> {
        let url = self.url(&format!("/projects/exists?project_id={}", encode(project_id)));
        let body: ExistsResponse = self.send(self.client.get(url)).await?;
        Ok(body.exists)
    }

    async fn get_project(&self, project_id: &str) -> ApiResult<Project> {
        let url = self.url(&format!("/projects?project_id={}", encode(project_id)));
        self.send(self.client.get(url)).await
    }

    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.send(self.client.get(self.url("/projects"))).await
    }

    async fn create_project(&self, body: &ProjectCreate) -> ApiResult<Project> {
        self.send(self.client.post(self.url("/projects")).json(body)).await
    }

    async fn update_project(&self, body: &ProjectUpdate) -> ApiResult<Project> {
        self.send(self.client.put(self.url("/projects")).json(body)).await
    }

    async fn delete_project(&self, body: &ProjectDelete) -> ApiResult<DeleteResponse> {
        self.send(self.client.delete(self.url("/projects")).json(body)).await
    }

    async fn list_sources(&self, project_id: &str) -> ApiResult<Vec<Source>> {
        self.send(self.client.get(self.sources_url(project_id))).await
    }

    async fn get_source(&self, project_id: &str, source_id: &str) -> ApiResult<Source> {
        let url = format!("{}/{}", self.sources_url(project_id), encode(source_id));
        self.send(self.client.get(url)).await
    }

    async fn create_source(&self, project_id: &str, draft: &SourceDraft) -> ApiResult<Source> {
        self.send(self.client.post(self.sources_url(project_id)).json(draft)).await
    }

    async fn update_source(&self, project_id: &str, source: &Source) -> ApiResult<Source> {
        self.send(self.client.put(self.sources_url(project_id)).json(source)).await
    }

    async fn delete_source(&self, project_id: &str, source_id: &str) -> ApiResult<DeleteResponse> {
        let body = SourceDelete {
            id: source_id.to_string(),
        };
        self.send(self.client.delete(self.sources_url(project_id)).json(&body)).await
    }
}
