//! URL Routing
//!
//! Paths have the shape `/<project id>/<mode>`. Mode `edit` selects the
//! editor; any other value, or none at all, selects the viewer.

use std::fmt;

/// Which screen a path mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Edit,
    #[default]
    View,
}

impl ViewMode {
    /// Interpret the mode segment of a path
    pub fn from_segment(segment: Option<&str>) -> Self {
        match segment {
            Some("edit") => ViewMode::Edit,
            _ => ViewMode::View,
        }
    }

    pub fn as_segment(&self) -> &'static str {
        match self {
            ViewMode::Edit => "edit",
            ViewMode::View => "view",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_segment())
    }
}

/// A parsed location path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub project_id: Option<String>,
    pub mode: ViewMode,
}

impl Route {
    /// Parse a location path. Missing or empty segments become `None`.
    pub fn parse(path: &str) -> Self {
        let mut segments = path.split('/').skip(1);
        let project_id = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let mode = ViewMode::from_segment(segments.next());

        Self { project_id, mode }
    }

    /// Render back to a location path
    pub fn path(&self) -> String {
        match &self.project_id {
            Some(id) => format!("/{}/{}", id, self.mode),
            None => "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_route() {
        let route = Route::parse("/p1/edit");
        assert_eq!(route.project_id.as_deref(), Some("p1"));
        assert_eq!(route.mode, ViewMode::Edit);
        assert_eq!(route.path(), "/p1/edit");
    }

    #[test]
    fn test_anything_else_is_view() {
        assert_eq!(Route::parse("/p1/view").mode, ViewMode::View);
        assert_eq!(Route::parse("/p1/Edit").mode, ViewMode::View);
        assert_eq!(Route::parse("/p1/edits").mode, ViewMode::View);
        assert_eq!(Route::parse("/p1").mode, ViewMode::View);
    }

    #[test]
    fn test_missing_segments() {
        assert_eq!(Route::parse("/"), Route::default());
        assert_eq!(Route::parse(""), Route::default());

        let route = Route::parse("//edit");
        assert_eq!(route.project_id, None);
        assert_eq!(route.mode, ViewMode::Edit);
        assert_eq!(route.path(), "/");
    }

    #[test]
    fn test_extra_segments_ignored() {
        let route = Route::parse("/p1/edit/extra");
        assert_eq!(route.project_id.as_deref(), Some("p1"));
        assert_eq!(route.mode, ViewMode::Edit);
    }
}
