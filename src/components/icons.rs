//! Inline SVG icons shared across the screens.

use leptos::prelude::*;

#[component]
pub fn CheckIcon() -> impl IntoView {
    view! {
        <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7" />
        </svg>
    }
}

#[component]
pub fn CrossIcon() -> impl IntoView {
    view! {
        <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
        </svg>
    }
}
