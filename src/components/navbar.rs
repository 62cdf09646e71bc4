use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::use_api;
use crate::session::{self, use_session};

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let navigate = use_navigate();

    let user = session.user();
    let has_token = session.has_token();

    let brand_href = move || {
        if has_token.get() {
            "/dashboard".to_string()
        } else {
            "/login".to_string()
        }
    };

    let on_logout = move |_| {
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            session::logout(session, &api).await;
            navigate("/login", Default::default());
        });
    };

    let display_name = move || {
        user.get()
            .map(|u| u.name)
            .unwrap_or_else(|| "User".to_string())
    };

    view! {
        <nav class="border-b border-slate-200 bg-white/80 backdrop-blur">
            <div class="mx-auto flex max-w-5xl items-center justify-between px-4 py-3">
                <a href=brand_href class="text-lg font-semibold text-slate-900">
                    "MediTrack"
                </a>
                <Show
                    when=move || has_token.get()
                    fallback=|| view! {
                        <div class="flex items-center gap-3 text-sm">
                            <a href="/login" class="text-slate-600 hover:text-slate-900">"Login"</a>
                            <a href="/register" class="rounded bg-slate-900 px-3 py-1.5 text-white transition hover:bg-slate-800">
                                "Register"
                            </a>
                        </div>
                    }
                >
                    <div class="flex items-center gap-4 text-sm">
                        <span class="text-slate-700">"Hi, " {display_name}</span>
                        <div class="flex items-center gap-3">
                            <a href="/dashboard" class="text-slate-600 hover:text-slate-900">"Dashboard"</a>
                            <a href="/drug-library" class="text-slate-600 hover:text-slate-900">"Drug Library"</a>
                            <a href="/medications" class="text-slate-600 hover:text-slate-900">"Medications"</a>
                            <a href="/profile" class="text-slate-600 hover:text-slate-900">"Profile"</a>
                            <button
                                type="button"
                                on:click=on_logout.clone()
                                class="rounded bg-slate-900 px-3 py-1.5 text-white transition hover:bg-slate-800"
                            >
                                "Logout"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
