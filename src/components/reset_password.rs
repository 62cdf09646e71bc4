use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api::use_api;
use crate::components::icons::CheckIcon;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let query = use_query_map();

    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success, set_success) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        set_error_msg.set(None);

        let password = new_password.get_untracked();
        if password != confirm_password.get_untracked() {
            set_error_msg.set(Some("Passwords do not match.".to_string()));
            set_submitting.set(false);
            return;
        }
        if password.chars().count() < 8 {
            set_error_msg.set(Some("Password must be at least 8 characters.".to_string()));
            set_submitting.set(false);
            return;
        }
        let Some(token) = query.get_untracked().get("token") else {
            set_error_msg.set(Some("Invalid reset link.".to_string()));
            set_submitting.set(false);
            return;
        };

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.reset_password(&token, &password).await {
                Ok(()) => {
                    set_success.set(true);
                    set_timeout(
                        move || navigate("/login", Default::default()),
                        Duration::from_secs(2),
                    );
                }
                Err(err) => {
                    set_error_msg.set(Some(err.display_message(
                        "Password reset failed. Token may be expired or invalid.",
                    )));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Show
            when=move || success.get()
            fallback=move || view! {
                <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
                    <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Reset Password"</h1>
                    <form on:submit=on_submit.clone() class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
                        <p class="text-sm text-slate-600">"Enter your new password below."</p>
                        <div class="space-y-2">
                            <label class="block text-sm font-medium text-slate-700" for="newPassword">"New Password"</label>
                            <input
                                id="newPassword"
                                type="password"
                                prop:value=new_password
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                required
                                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                            />
                        </div>
                        <div class="space-y-2">
                            <label class="block text-sm font-medium text-slate-700" for="confirmPassword">"Confirm Password"</label>
                            <input
                                id="confirmPassword"
                                type="password"
                                prop:value=confirm_password
                                on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                required
                                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                            />
                        </div>
                        <Show when=move || error_msg.get().is_some()>
                            <p class="text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
                        </Show>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                        >
                            {move || if submitting.get() { "Resetting..." } else { "Reset Password" }}
                        </button>
                    </form>
                </div>
            }
        >
            <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
                <div class="rounded-lg bg-white p-6 shadow-sm text-center">
                    <div class="mx-auto mb-4 flex h-12 w-12 items-center justify-center rounded-full bg-green-100">
                        <CheckIcon attr:class="h-6 w-6 text-green-600" />
                    </div>
                    <h1 class="text-xl font-semibold text-slate-900">"Password Reset Successfully!"</h1>
                    <p class="mt-2 text-sm text-slate-600">"Your password has been changed."</p>
                    <p class="mt-4 text-sm text-slate-500">"Redirecting to login..."</p>
                </div>
            </div>
        </Show>
    }
}
