//! Source Viewer Component
//!
//! Read-only rendering of a project and its sources.

use leptos::*;

use crate::components::source_entry::{EntryMode, SourceEntry};
use crate::components::Loading;
use crate::state::{use_project_session, Existence};

#[component]
pub fn SourceViewer(
    #[prop(into)]
    project_id: Signal<Option<String>>,
) -> impl IntoView {
    let session = use_project_session(project_id);
    let project_name = move || session.project.get().map(|p| p.name).unwrap_or_default();
    let project_description =
        move || session.project.get().map(|p| p.description).unwrap_or_default();

    view! {
        <div>
            {move || match session.existence.get() {
                Existence::Unknown => view! { <Loading /> }.into_view(),
                Existence::Failed => view! {
                    <p class="error">"Could not load this project."</p>
                }.into_view(),
                Existence::Missing => view! {
                    <p class="empty">"Project not found."</p>
                }.into_view(),
                Existence::Exists => view! {
                    <div class="project-info">
                        <h1>{project_name}</h1>
                        <p>{project_description}</p>
                    </div>
                    <div class="sources">
                        <For
                            each=move || session.sources.get()
                            key=|source| source.id.clone()
                            children=move |source| view! {
                                <SourceEntry source=source mode=EntryMode::View />
                            }
                        />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}
