//! UI Components
//!
//! Leptos components for editing and viewing project sources.

pub mod loading;
pub mod source_editor;
pub mod source_entry;
pub mod source_viewer;
pub mod toast;

pub use loading::Loading;
pub use source_editor::SourceEditor;
pub use source_viewer::SourceViewer;
pub use toast::Toast;
