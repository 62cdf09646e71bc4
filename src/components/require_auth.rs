//! Route guard for views that need a session.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::session::{SessionPhase, use_session};

/// Placeholder shown while the session bootstrap is still running.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex h-screen items-center justify-center text-slate-600">"Loading..."</div>
    }
}

/// Wraps a protected view. While the session is loading, render a
/// placeholder and decide nothing. Without an access token, capture the
/// requested location and redirect to login. Otherwise render the children.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let phase = session.phase();

    move || match phase.get() {
        SessionPhase::Loading => view! { <LoadingScreen /> }.into_any(),
        SessionPhase::Anonymous => {
            let path = location.pathname.get_untracked();
            let search = location.search.get_untracked();
            session.return_to.set(Some(format!("{path}{search}")));
            view! { <Redirect path="/login" /> }.into_any()
        }
        SessionPhase::Authenticated => children().into_any(),
    }
}

/// Landing route: token holders go to the dashboard, everyone else to login.
#[component]
pub fn HomeRedirect() -> impl IntoView {
    let session = use_session();
    let phase = session.phase();

    move || match phase.get() {
        SessionPhase::Loading => view! { <LoadingScreen /> }.into_any(),
        SessionPhase::Anonymous => view! { <Redirect path="/login" /> }.into_any(),
        SessionPhase::Authenticated => view! { <Redirect path="/dashboard" /> }.into_any(),
    }
}
