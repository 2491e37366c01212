//! App Root Component
//!
//! Reads the project id and mode from the location path and mounts the
//! editor or the viewer.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{SourceEditor, SourceViewer, Toast};
use crate::route::{edit_path, parse_route, ViewMode};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="App">
                <Shell />
                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Picks the screen for the current path
#[component]
fn Shell() -> impl IntoView {
    let location = use_location();
    let route = create_memo(move |_| parse_route(&location.pathname.get()));
    let project_id = Signal::derive(move || route.get().project_id);
    let mode = create_memo(move |_| route.get().mode);

    let navigate = use_navigate();
    let set_project_id = Callback::new(move |id: String| {
        navigate(&edit_path(&id), Default::default());
    });

    move || match mode.get() {
        ViewMode::Edit => view! {
            <SourceEditor project_id=project_id set_project_id=set_project_id />
        }.into_view(),
        ViewMode::View => view! {
            <SourceViewer project_id=project_id />
        }.into_view(),
    }
}

/// Footer with the backend URL setting
#[component]
fn Footer() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        let _ = window().location().reload();
    };

    view! {
        <footer>
            <label>"Backend: "</label>
            <input
                type="text"
                prop:value=move || api_url.get()
                on:input=move |ev| set_api_url.set(event_target_value(&ev))
            />
            <button on:click=save_url>"Use"</button>
        </footer>
    }
}
