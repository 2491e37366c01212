//! Source Entry
//!
//! Rendering of a single source in either mode. Entries hold no state of
//! their own: a view-mode entry yields a navigation target when activated, an
//! edit-mode entry turns input edits into [`SourceChange`]s for its owner.

use serde::Serialize;

use crate::model::{Source, SourceField};

/// How an entry is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Static display, navigates on activation
    View,
    /// One text input per field
    Edit,
}

/// A field edit forwarded to whoever owns the source list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceChange {
    pub id: String,
    pub field: SourceField,
    pub value: String,
}

/// One labelled input of an edit-mode entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInput {
    pub field: SourceField,
    pub value: String,
}

/// Rendered form of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EntryView {
    View {
        tag: String,
        title: String,
        author: String,
        date_accessed: String,
        date_published: String,
        link: String,
    },
    Edit {
        inputs: Vec<EntryInput>,
    },
}

/// Navigation target of a view-mode entry
pub fn source_link(url: &str) -> String {
    format!("/source/{}", url)
}

/// A source rendered in one mode, keyed by the source id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    source: Source,
    mode: EntryMode,
}

impl SourceEntry {
    pub fn new(source: Source, mode: EntryMode) -> Self {
        Self { source, mode }
    }

    /// Build one entry per source, order preserved
    pub fn list(sources: &[Source], mode: EntryMode) -> Vec<SourceEntry> {
        sources
            .iter()
            .map(|source| SourceEntry::new(source.clone(), mode))
            .collect()
    }

    pub fn key(&self) -> &str {
        &self.source.id
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn render(&self) -> EntryView {
        match self.mode {
            EntryMode::View => EntryView::View {
                tag: self.source.tag.clone(),
                title: self.source.title.clone(),
                author: self.source.author.clone(),
                date_accessed: self.source.date_accessed.clone(),
                date_published: self.source.date_published.clone(),
                link: source_link(&self.source.url),
            },
            EntryMode::Edit => EntryView::Edit {
                inputs: SourceField::ALL
                    .iter()
                    .map(|&field| EntryInput {
                        field,
                        value: self.source.get(field).to_string(),
                    })
                    .collect(),
            },
        }
    }

    /// Activate (click) the entry. Only view-mode entries navigate.
    pub fn activate(&self) -> Option<String> {
        match self.mode {
            EntryMode::View => Some(source_link(&self.source.url)),
            EntryMode::Edit => None,
        }
    }

    /// Edit one input. Only edit-mode entries produce changes.
    pub fn change(&self, field: SourceField, value: impl Into<String>) -> Option<SourceChange> {
        match self.mode {
            EntryMode::Edit => Some(SourceChange {
                id: self.source.id.clone(),
                field,
                value: value.into(),
            }),
            EntryMode::View => None,
        }
    }
}
