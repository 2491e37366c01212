//! Location Routing
//!
//! `/<project id>/<mode>`: mode `edit` mounts the editor, anything else the
//! viewer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Edit,
    #[default]
    View,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub project_id: Option<String>,
    pub mode: ViewMode,
}

/// Parse a location pathname. Missing or empty segments become `None`.
pub fn parse_route(path: &str) -> Route {
    let mut segments = path.split('/').skip(1);
    let project_id = segments
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let mode = match segments.next() {
        Some("edit") => ViewMode::Edit,
        _ => ViewMode::View,
    };

    Route { project_id, mode }
}

/// Path of the editor for a project
pub fn edit_path(project_id: &str) -> String {
    format!("/{}/edit", project_id)
}

/// Navigation target of a view-mode source entry
pub fn source_link(url: &str) -> String {
    format!("/source/{}", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let route = parse_route("/p1/edit");
        assert_eq!(route.project_id.as_deref(), Some("p1"));
        assert_eq!(route.mode, ViewMode::Edit);

        assert_eq!(parse_route("/p1/view").mode, ViewMode::View);
        assert_eq!(parse_route("/p1").mode, ViewMode::View);
        assert_eq!(parse_route("/"), Route::default());
    }

    #[test]
    fn test_links() {
        assert_eq!(edit_path("abc"), "/abc/edit");
        assert_eq!(source_link("foo"), "/source/foo");
    }
}
