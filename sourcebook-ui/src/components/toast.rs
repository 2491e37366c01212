//! Toast Notification Component
//!
//! Shows success and error messages.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="toasts">
            // Success toast
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            // Error toast
            {move || {
                state.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let (icon, class) = match variant {
        ToastVariant::Success => ("✓", "toast toast-success"),
        ToastVariant::Error => ("✕", "toast toast-error"),
    };

    view! {
        <div class=class>
            <span class="toast-icon">{icon}</span>
            <span class="toast-message">{message}</span>
        </div>
    }
}
