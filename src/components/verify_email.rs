use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api::use_api;
use crate::components::icons::{CheckIcon, CrossIcon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerifyStatus {
    Verifying,
    Success,
    Failed,
}

/// Consumes the `?token=` from the verification link. The request fires
/// exactly once, on mount; the component body runs a single time.
#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let query = use_query_map();

    let (status, set_status) = signal(VerifyStatus::Verifying);
    let (message, set_message) = signal(String::new());

    let redirect_soon = {
        let navigate = navigate.clone();
        move || {
            let navigate = navigate.clone();
            set_timeout(
                move || navigate("/login", Default::default()),
                Duration::from_secs(2),
            );
        }
    };

    match query.get_untracked().get("token") {
        None => {
            set_status.set(VerifyStatus::Failed);
            set_message.set("Invalid verification link.".to_string());
        }
        Some(token) => {
            let redirect_soon = redirect_soon.clone();
            spawn_local(async move {
                match api.verify_email(&token).await {
                    Ok(body) => {
                        set_status.set(VerifyStatus::Success);
                        let text = body.trim().to_string();
                        set_message.set(if text.is_empty() {
                            "Email verified successfully!".to_string()
                        } else {
                            text
                        });
                        redirect_soon();
                    }
                    Err(err) => {
                        let text = err.display_message(
                            "Verification failed. Token may be expired or invalid.",
                        );
                        // An already-consumed token still means the address
                        // is good; treat it as success.
                        if text.to_lowercase().contains("already verified") {
                            set_status.set(VerifyStatus::Success);
                            set_message
                                .set("Email is already verified. You can login now.".to_string());
                            redirect_soon();
                        } else {
                            set_status.set(VerifyStatus::Failed);
                            set_message.set(text);
                        }
                    }
                }
            });
        }
    }

    let go_to_login = move |_| navigate("/login", Default::default());

    view! {
        <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
            <div class="rounded-lg bg-white p-6 shadow-sm text-center">
                {move || match status.get() {
                    VerifyStatus::Verifying => view! {
                        <div class="mx-auto mb-4 h-12 w-12 animate-spin rounded-full border-4 border-slate-200 border-t-slate-900"></div>
                        <h1 class="text-xl font-semibold text-slate-900">"Verifying Email..."</h1>
                        <p class="mt-2 text-sm text-slate-600">"Please wait while we verify your email address."</p>
                    }.into_any(),
                    VerifyStatus::Success => view! {
                        <div class="mx-auto mb-4 flex h-12 w-12 items-center justify-center rounded-full bg-green-100">
                            <CheckIcon attr:class="h-6 w-6 text-green-600" />
                        </div>
                        <h1 class="text-xl font-semibold text-slate-900">"Email Verified!"</h1>
                        <p class="mt-2 text-sm text-slate-600">{message.get()}</p>
                        <p class="mt-4 text-sm text-slate-500">"Redirecting to login..."</p>
                    }.into_any(),
                    VerifyStatus::Failed => view! {
                        <div class="mx-auto mb-4 flex h-12 w-12 items-center justify-center rounded-full bg-red-100">
                            <CrossIcon attr:class="h-6 w-6 text-red-600" />
                        </div>
                        <h1 class="text-xl font-semibold text-slate-900">"Verification Failed"</h1>
                        <p class="mt-2 text-sm text-red-600">{message.get()}</p>
                        <button
                            on:click=go_to_login.clone()
                            class="mt-6 rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800"
                        >
                            "Go to Login"
                        </button>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
