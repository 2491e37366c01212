//! Data Model
//!
//! Projects, sources and the request/response bodies exchanged with the
//! backend. All source fields are plain strings; the backend owns validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named collection of citations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// One bibliographic citation belonging to a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub tag: String,
    pub url: String,
    pub author: String,
    pub title: String,
    pub date_accessed: String,
    pub date_published: String,
}

/// A source that has not been assigned an id yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDraft {
    pub tag: String,
    pub url: String,
    pub author: String,
    pub title: String,
    pub date_accessed: String,
    pub date_published: String,
}

/// Editable source fields, named as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    Tag,
    Url,
    Author,
    Title,
    DateAccessed,
    DatePublished,
}

impl SourceField {
    /// Fields in display order
    pub const ALL: [SourceField; 6] = [
        SourceField::Tag,
        SourceField::Url,
        SourceField::Title,
        SourceField::Author,
        SourceField::DateAccessed,
        SourceField::DatePublished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceField::Tag => "tag",
            SourceField::Url => "url",
            SourceField::Author => "author",
            SourceField::Title => "title",
            SourceField::DateAccessed => "date_accessed",
            SourceField::DatePublished => "date_published",
        }
    }
}

impl fmt::Display for SourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SourceField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(SourceField::Tag),
            "url" => Ok(SourceField::Url),
            "author" => Ok(SourceField::Author),
            "title" => Ok(SourceField::Title),
            "date_accessed" => Ok(SourceField::DateAccessed),
            "date_published" => Ok(SourceField::DatePublished),
            other => Err(FieldError::Unknown(other.to_string())),
        }
    }
}

/// Source field name errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown source field: {0}")]
    Unknown(String),
}

impl Source {
    /// Read one field
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
    pub fn set(&mut self, field: SourceField, value: impl Into<String>) -> String {
        let slot = match field {
            SourceField::Tag => &mut self.tag,
            SourceField::Url => &mut self.url,
            SourceField::Author => &mut self.author,
            SourceField::Title => &mut self.title,
            SourceField::DateAccessed => &mut self.date_accessed,
            SourceField::DatePublished => &mut self.date_published,
        };
        std::mem::replace(slot, value.into())
    }
}

// ============ Request Bodies ============

/// POST /projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub password: String,
}

/// PUT /projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectUpdate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub password: String,
}

/// DELETE /projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDelete {
    pub id: String,
    pub password: String,
}

/// DELETE /projects/:project_id/sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDelete {
    pub id: String,
}

// ============ Response Bodies ============

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExistsResponse {
    pub exists: bool,
}

/// Body returned by the delete endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeleteResponse {
    /// Reason the backend refused the delete, if it did.
    ///
    /// Only an explicit `success: false` is a refusal; a bare message or an
    /// empty body counts as done.
    pub fn rejection(&self) -> Option<String> {
        match self.success {
            Some(false) => Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "Delete rejected by backend".to_string()),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in SourceField::ALL {
            assert_eq!(field.as_str().parse::<SourceField>(), Ok(field));
        }
        assert_eq!(
            "publisher".parse::<SourceField>(),
            Err(FieldError::Unknown("publisher".to_string()))
        );
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut source = Source {
            id: "1".to_string(),
            title: "Old".to_string(),
            ..Default::default()
        };

        let previous = source.set(SourceField::Title, "New");
        assert_eq!(previous, "Old");
        assert_eq!(source.get(SourceField::Title), "New");
    }

    #[test]
    fn test_create_body_has_no_id() {
        let body = serde_json::to_value(ProjectCreate {
            name: "N".to_string(),
            description: "D".to_string(),
            password: "x".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"name": "N", "description": "D", "password": "x"})
        );
    }

    #[test]
    fn test_delete_response_accepts_message_only() {
        let parsed: DeleteResponse =
            serde_json::from_str(r#"{"message": "Source deleted"}"#).unwrap();
        assert_eq!(parsed.success, None);
        assert_eq!(parsed.message.as_deref(), Some("Source deleted"));
    }

    #[test]
    fn test_delete_rejection() {
        let refused: DeleteResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid password"}"#).unwrap();
        assert_eq!(refused.rejection().as_deref(), Some("Invalid password"));

        let bare: DeleteResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(bare.rejection().is_some());

        let done: DeleteResponse =
            serde_json::from_str(r#"{"message": "Source deleted"}"#).unwrap();
        assert_eq!(done.rejection(), None);
    }
}
