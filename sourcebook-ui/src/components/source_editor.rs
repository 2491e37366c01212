//! Source Editor Component
//!
//! Project form plus the editable list of sources.

use leptos::*;

use crate::api::{self, ProjectCreate, ProjectUpdate, Source, SourceDraft};
use crate::components::source_entry::{EntryMode, SourceChange, SourceEntry};
use crate::components::Loading;
use crate::state::{use_project_session, Existence, GlobalState};

/// Request issued by the Save button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(ProjectCreate),
    Update(ProjectUpdate),
}

/// Build the save request from the form inputs
pub fn save_request(
    project_id: Option<&str>,
    name: &str,
    description: &str,
    password: &str,
    create_new: bool,
) -> Result<SaveRequest, String> {
    if create_new {
        return Ok(SaveRequest::Create(ProjectCreate {
            name: name.to_string(),
            description: description.to_string(),
            password: password.to_string(),
        }));
    }

    let id = project_id.ok_or_else(|| "No project selected".to_string())?;
    Ok(SaveRequest::Update(ProjectUpdate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        password: password.to_string(),
    }))
}

/// Current value of the source with `id`, if it is still listed
fn find_source(sources: &[Source], id: &str) -> Option<Source> {
    sources.iter().find(|s| s.id == id).cloned()
}

#[component]
pub fn SourceEditor(
    #[prop(into)]
    project_id: Signal<Option<String>>,
    /// Called with the id the backend assigned to a newly created project
    set_project_id: Callback<String>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_project_session(project_id);

    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (create_new, set_create_new) = create_signal(false);
    let (saving, set_saving) = create_signal(false);

    let state_for_save = state.clone();
    let on_save = move |_| {
        let request = match save_request(
            project_id.get_untracked().as_deref(),
            &name.get_untracked(),
            &description.get_untracked(),
            &password.get_untracked(),
            create_new.get_untracked(),
        ) {
            Ok(request) => request,
            Err(e) => {
                state_for_save.show_error(&e);
                return;
            }
        };

        set_saving.set(true);
        let ticket = session.ticket();
        let state_clone = state_for_save.clone();
        spawn_local(async move {
            let result = match &request {
                SaveRequest::Create(body) => api::create_project(body).await,
                SaveRequest::Update(body) => api::update_project(body).await,
            };

            match (result, &request) {
                (Ok(project), SaveRequest::Create(_)) => {
                    let id = project.id.clone();
                    session.project.set(Some(project));
                    set_create_new.set(false);
                    set_project_id.call(id);
                    state_clone.show_success("Project created");
                }
                (Ok(project), SaveRequest::Update(_)) => {
                    if session.is_current(ticket) {
                        session.project.set(Some(project));
                    }
                    state_clone.show_success("Project saved");
                }
                (Err(e), _) => state_clone.show_error(&e),
            }
            set_saving.set(false);
        });
    };

    let state_for_change = state.clone();
    let on_change = Callback::new(move |change: SourceChange| {
        let Some(project_id) = project_id.get_untracked() else {
            return;
        };

        let mut edited = None;
        let mut previous = String::new();
        session.sources.update(|sources| {
            if let Some(source) = sources.iter_mut().find(|s| s.id == change.id) {
                previous = source.set(change.field, change.value.clone());
                edited = Some(source.clone());
            }
        });
        let Some(edited) = edited else {
            return;
        };

        let ticket = session.ticket();
        let state_clone = state_for_change.clone();
        spawn_local(async move {
            let result = api::update_source(&project_id, &edited).await;
            if !session.is_current(ticket) {
                return;
            }

            match result {
                Ok(saved) => session.sources.update(|sources| {
                    if let Some(slot) = sources.iter_mut().find(|s| s.id == saved.id) {
                        *slot = saved;
                    }
                }),
                Err(e) => {
                    session.sources.update(|sources| {
                        if let Some(source) = sources.iter_mut().find(|s| s.id == change.id) {
                            source.set(change.field, previous);
                        }
                    });
                    state_clone.show_error(&e);
                }
            }
        });
    });

    let state_for_delete = state.clone();
    let on_delete = Callback::new(move |source_id: String| {
        let Some(project_id) = project_id.get_untracked() else {
            return;
        };

        let ticket = session.ticket();
        let state_clone = state_for_delete.clone();
        spawn_local(async move {
            match api::delete_source(&project_id, &source_id).await {
                Ok(()) if session.is_current(ticket) => {
                    session.sources.update(|sources| sources.retain(|s| s.id != source_id))
                }
                Ok(()) => {}
                Err(e) => state_clone.show_error(&e),
            }
        });
    });

    let state_for_add = state.clone();
    let on_add = move |_| {
        let Some(project_id) = project_id.get_untracked() else {
            return;
        };

        let ticket = session.ticket();
        let state_clone = state_for_add.clone();
        spawn_local(async move {
            match api::create_source(&project_id, &SourceDraft::default()).await {
                Ok(source) if session.is_current(ticket) => {
                    session.sources.update(|sources| sources.push(source))
                }
                Ok(_) => {}
                Err(e) => state_clone.show_error(&e),
            }
        });
    };

    let state_for_remove = state.clone();
    let on_delete_project = move |_| {
        let Some(id) = project_id.get_untracked() else {
            return;
        };
        let pw = password.get_untracked();

        let ticket = session.ticket();
        let state_clone = state_for_remove.clone();
        spawn_local(async move {
            match api::delete_project(&id, &pw).await {
                Ok(()) => {
                    if session.is_current(ticket) {
                        session.begin();
                        session.project.set(None);
                        session.sources.set(Vec::new());
                        session.existence.set(Existence::Missing);
                    }
                    state_clone.show_success("Project deleted");
                }
                Err(e) => state_clone.show_error(&e),
            }
        });
    };

    let project_name = move || session.project.get().map(|p| p.name).unwrap_or_default();
    let project_description =
        move || session.project.get().map(|p| p.description).unwrap_or_default();

    view! {
        <div>
            <div class="project-info">
                <h1>"Project Info"</h1>
                <input
                    type="text"
                    placeholder="Project Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Project Description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
                <input
                    type="password"
                    placeholder="Project Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <label for="create-new-project">"Create New Project"</label>
                <input
                    type="checkbox"
                    id="create-new-project"
                    prop:checked=move || create_new.get()
                    on:change=move |ev| set_create_new.set(event_target_checked(&ev))
                />

                <button on:click=on_save disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>

                <p>"Project ID: " {move || project_id.get().unwrap_or_default()}</p>
                <p>"Project Name: " {project_name}</p>
                <p>"Project Description: " {project_description}</p>
            </div>

            {move || match session.existence.get() {
                Existence::Unknown => view! { <Loading /> }.into_view(),
                Existence::Failed => view! {
                    <p class="error">
                        "Could not load this project. Check the API URL and reload."
                    </p>
                }.into_view(),
                Existence::Missing => view! {
                    <p class="empty">
                        "No such project yet. Tick \"Create New Project\" and save to start one."
                    </p>
                }.into_view(),
                Existence::Exists => view! {
                    <div class="sources">
                        <For
                            each=move || session.sources.get()
                            key=|source| source.id.clone()
                            children=move |source| {
                                let id = source.id.clone();
                                let current = Signal::derive(move || {
                                    session.sources
                                        .with(|sources| find_source(sources, &id))
                                        .unwrap_or_else(|| source.clone())
                                });
                                view! {
                                    <SourceEntry
                                        source=current
                                        mode=EntryMode::Edit
                                        on_change=on_change
                                        on_delete=on_delete
                                    />
                                }
                            }
                        />
                        <button on:click=on_add.clone()>"Add Source"</button>
                        <button class="danger" on:click=on_delete_project.clone()>
                            "Delete Project"
                        </button>
                    </div>
                }.into_view(),
            }}
        </div>
    }
}
