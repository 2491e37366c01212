//! Loading Component
//!
//! Spinner shown while a project is being looked up.

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading-spinner" />
        </div>
    }
}
