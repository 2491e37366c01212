//! Source Entry Component
//!
//! One citation row, either static (navigates on click) or a row of text
//! inputs that report edits to the parent. Inputs follow the source signal,
//! so a value the parent puts back shows up without rebuilding the row.

use leptos::*;

use crate::api::{Source, SourceField};
use crate::route::source_link;

/// How an entry is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    View,
    Edit,
}

/// A field edit reported by an edit-mode entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChange {
    pub id: String,
    pub field: SourceField,
    pub value: String,
}

#[component]
pub fn SourceEntry(
    #[prop(into)]
    source: MaybeSignal<Source>,
    mode: EntryMode,
    /// Receives field edits in edit mode
    #[prop(optional)]
    on_change: Option<Callback<SourceChange>>,
    /// Receives the source id when the delete button is pressed
    #[prop(optional)]
    on_delete: Option<Callback<String>>,
) -> impl IntoView {
    match mode {
        EntryMode::View => {
            let source = source.get_untracked();
            let link = source_link(&source.url);

            view! {
                <div class="source-entry" on:click=move |_| {
                    let _ = window().location().set_href(&link);
                }>
                    <div class="hbox">
                        <h3>{source.tag}</h3>
                        <h3>{source.title}</h3>
                        <h3>{source.author}</h3>
                        <div class="date-box">
                            <h3>{source.date_accessed}</h3>
                            <h3>{source.date_published}</h3>
                        </div>
                    </div>
                </div>
            }.into_view()
        }
        EntryMode::Edit => {
            let id = source.with_untracked(|s| s.id.clone());

            let input = |field: SourceField, placeholder: &'static str| {
                let id = id.clone();
                let source = source.clone();

                view! {
                    <input
                        type="text"
                        placeholder=placeholder
                        prop:value=move || source.with(|s| s.get(field).to_string())
                        on:change=move |ev| {
                            if let Some(on_change) = on_change {
                                on_change.call(SourceChange {
                                    id: id.clone(),
                                    field,
                                    value: event_target_value(&ev),
                                });
                            }
                        }
                    />
                }
            };

            let (date_fields, text_fields): (Vec<_>, Vec<_>) = SourceField::INPUTS
                .into_iter()
                .partition(|(field, _)| {
                    matches!(field, SourceField::DateAccessed | SourceField::DatePublished)
                });
            let delete_id = id.clone();

            view! {
                <div class="source-entry">
                    <div class="hbox">
                        {text_fields.into_iter().map(|(f, p)| input(f, p)).collect_view()}
                        <div class="date-box">
                            {date_fields.into_iter().map(|(f, p)| input(f, p)).collect_view()}
                        </div>
                        {on_delete.map(|on_delete| view! {
                            <button
                                class="delete"
                                on:click=move |_| on_delete.call(delete_id.clone())
                            >
                                "Delete"
                            </button>
                        })}
                    </div>
                </div>
            }.into_view()
        }
    }
}
