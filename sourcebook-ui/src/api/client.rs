//! HTTP API Client
//!
//! Functions for communicating with the project/source backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:1960";

const API_BASE_KEY: &str = "sourcebook_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn encode(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

fn sources_url(api_base: &str, project_id: &str) -> String {
    format!("{}/projects/{}/sources", api_base, encode(project_id))
}

// ============ Types ============

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Source {
    pub id: String,
    pub tag: String,
    pub url: String,
    pub author: String,
    pub title: String,
    pub date_accessed: String,
    pub date_published: String,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SourceDraft {
    pub tag: String,
    pub url: String,
    pub author: String,
    pub title: String,
    pub date_accessed: String,
    pub date_published: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Tag,
    Url,
    Author,
    Title,
    DateAccessed,
    DatePublished,
}

impl SourceField {
    /// Editable fields with their input placeholders, in display order
    pub const INPUTS: [(SourceField, &'static str); 6] = [
        (SourceField::Tag, "Tag"),
        (SourceField::Url, "URL"),
        (SourceField::Title, "Title"),
        (SourceField::Author, "Author"),
        (SourceField::DateAccessed, "Date Accessed"),
        (SourceField::DatePublished, "Date Published"),
    ];
}

impl Source {
    pub fn get(&self, field: SourceField) -> &str {
        match field {
            SourceField::Tag => &self.tag,
            SourceField::Url => &self.url,
            SourceField::Author => &self.author,
            SourceField::Title => &self.title,
            SourceField::DateAccessed => &self.date_accessed,
            SourceField::DatePublished => &self.date_published,
        }
    }

    /// Replace one field, returning the previous value
    pub fn set(&mut self, field: SourceField, value: String) -> String {
        let slot = match field {
            SourceField::Tag => &mut self.tag,
            SourceField::Url => &mut self.url,
            SourceField::Author => &mut self.author,
            SourceField::Title => &mut self.title,
            SourceField::DateAccessed => &mut self.date_accessed,
            SourceField::DatePublished => &mut self.date_published,
        };
        std::mem::replace(slot, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProjectUpdate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize)]
struct ExistsResponse {
    exists: bool,
}

#[derive(Debug, Default, serde::Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl DeleteResponse {
    /// An explicit `success: false` is a refusal, anything else counts as done
    fn into_result(self) -> Result<(), String> {
        match self.success {
            Some(false) => Err(self
                .message
                .unwrap_or_else(|| "Delete rejected by backend".to_string())),
            _ => Ok(()),
        }
    }
}

// ============ API Functions ============

/// Decode a JSON body, turning non-2xx answers into their error text
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(format!("API error {}: {}", status, text));
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn send(request: Request) -> Result<Response, String> {
    request.send()
        .await
        .map_err(|e| format!("Network error: {}", e))
}

fn get_request(url: &str) -> Result<Request, String> {
    Request::get(url)
        .build()
        .map_err(|e| format!("Request build error: {}", e))
}

/// Check whether a project exists
pub async fn project_exists(project_id: &str) -> Result<bool, String> {
    let api_base = get_api_base();
    let url = format!("{}/projects/exists?project_id={}", api_base, encode(project_id));

    let result: ExistsResponse = read_json(send(get_request(&url)?).await?).await?;
    Ok(result.exists)
}

/// Fetch one project
pub async fn fetch_project(project_id: &str) -> Result<Project, String> {
    let api_base = get_api_base();
    let url = format!("{}/projects?project_id={}", api_base, encode(project_id));

    read_json(send(get_request(&url)?).await?).await
}

/// Create a project
pub async fn create_project(body: &ProjectCreate) -> Result<Project, String> {
    let api_base = get_api_base();

    let request = Request::post(&format!("{}/projects", api_base))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?;

    read_json(send(request).await?).await
}

/// Update a project
pub async fn update_project(body: &ProjectUpdate) -> Result<Project, String> {
    let api_base = get_api_base();

    let request = Request::put(&format!("{}/projects", api_base))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?;

    read_json(send(request).await?).await
}

/// Delete a project; a refusal from the backend is an error
pub async fn delete_project(project_id: &str, password: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct DeleteProjectRequest<'a> {
        id: &'a str,
        password: &'a str,
    }

    let api_base = get_api_base();

    let request = Request::delete(&format!("{}/projects", api_base))
        .json(&DeleteProjectRequest { id: project_id, password })
        .map_err(|e| format!("Request build error: {}", e))?;

    let response: DeleteResponse = read_json(send(request).await?).await?;
    response.into_result()
}

/// Fetch the sources of a project
pub async fn fetch_sources(project_id: &str) -> Result<Vec<Source>, String> {
    let api_base = get_api_base();

    read_json(send(get_request(&sources_url(&api_base, project_id))?).await?).await
}

/// Create a source
pub async fn create_source(project_id: &str, draft: &SourceDraft) -> Result<Source, String> {
    let api_base = get_api_base();

    let request = Request::post(&sources_url(&api_base, project_id))
        .json(draft)
        .map_err(|e| format!("Request build error: {}", e))?;

    read_json(send(request).await?).await
}

/// Replace a source
pub async fn update_source(project_id: &str, source: &Source) -> Result<Source, String> {
    let api_base = get_api_base();

    let request = Request::put(&sources_url(&api_base, project_id))
        .json(source)
        .map_err(|e| format!("Request build error: {}", e))?;

    read_json(send(request).await?).await
}

/// Delete a source; a refusal from the backend is an error
pub async fn delete_source(project_id: &str, source_id: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct DeleteSourceRequest<'a> {
        id: &'a str,
    }

    let api_base = get_api_base();

    let request = Request::delete(&sources_url(&api_base, project_id))
        .json(&DeleteSourceRequest { id: source_id })
        .map_err(|e| format!("Request build error: {}", e))?;

    let response: DeleteResponse = read_json(send(request).await?).await?;
    response.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:1960/"), "http://localhost:1960");
        assert_eq!(normalize_base(" http://api.example.org "), "http://api.example.org");
    }

    #[test]
    fn test_delete_refusal_is_error() {
        let refused: DeleteResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid password"}"#).unwrap();
        assert_eq!(refused.into_result(), Err("Invalid password".to_string()));

        let done: DeleteResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(done.into_result(), Ok(()));

        let bare: DeleteResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.into_result(), Ok(()));
    }

    #[test]
    fn test_source_set_returns_previous() {
        let mut source = Source { title: "Old".to_string(), ..Default::default() };
        assert_eq!(source.set(SourceField::Title, "New".to_string()), "Old");
        assert_eq!(source.get(SourceField::Title), "New");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_base_round_trip() {
        set_api_base("http://backend.test:8000/");
        assert_eq!(get_api_base(), "http://backend.test:8000");
        set_api_base(DEFAULT_API_BASE);
    }

    #[wasm_bindgen_test]
    fn test_sources_url_encodes_project() {
        assert_eq!(
            sources_url("http://x", "a b/c"),
            "http://x/projects/a%20b%2Fc/sources"
        );
    }
}
