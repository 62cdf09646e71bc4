use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::api::use_api;
use crate::session::{self, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (email_not_verified, set_email_not_verified) = signal(false);
    let (resending, set_resending) = signal(false);
    let (resend_success, set_resend_success) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let submit_api = api.clone();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        set_error_msg.set(None);
        set_email_not_verified.set(false);
        set_resend_success.set(false);

        let api = submit_api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = session::login(
                session,
                &api,
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await;
            match result {
                Ok(_) => {
                    // Return to wherever the guard bounced the user from.
                    let target = session
                        .return_to
                        .get_untracked()
                        .unwrap_or_else(|| "/dashboard".to_string());
                    session.return_to.set(None);
                    navigate(
                        &target,
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Err(err) => {
                    let message = err.display_message("Login failed. Please try again.");
                    if err.status() == Some(403) && message.to_lowercase().contains("verify") {
                        set_email_not_verified.set(true);
                        set_error_msg
                            .set(Some("Please verify your email before logging in.".to_string()));
                    } else {
                        set_error_msg.set(Some(message));
                    }
                }
            }
            set_submitting.set(false);
        });
    };

    let resend_api = api.clone();
    let on_resend = move |_| {
        set_resending.set(true);
        set_resend_success.set(false);

        let api = resend_api.clone();
        spawn_local(async move {
            match api.resend_verification(&email.get_untracked()).await {
                Ok(()) => set_resend_success.set(true),
                Err(err) => {
                    let message = err.display_message("");
                    if message.to_lowercase().contains("already verified") {
                        set_error_msg.set(Some(
                            "Email is already verified. Please try logging in.".to_string(),
                        ));
                        set_email_not_verified.set(false);
                    } else {
                        set_error_msg
                            .set(Some("Failed to resend verification email.".to_string()));
                    }
                }
            }
            set_resending.set(false);
        });
    };

    view! {
        <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
            <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Login"</h1>
            <form on:submit=on_submit class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
                <div class="space-y-2">
                    <label class="block text-sm font-medium text-slate-700" for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        required
                        class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                </div>
                <div class="space-y-2">
                    <label class="block text-sm font-medium text-slate-700" for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        required
                        class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                </div>
                <Show when=move || error_msg.get().is_some()>
                    <p class="text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || email_not_verified.get()>
                    <div class="rounded border border-blue-200 bg-blue-50 p-3">
                        <p class="text-sm text-blue-800">"Didn't receive the email?"</p>
                        <button
                            type="button"
                            on:click=on_resend.clone()
                            disabled=move || resending.get()
                            class="mt-2 text-sm font-medium text-blue-600 hover:text-blue-700 disabled:opacity-60"
                        >
                            {move || if resending.get() { "Sending..." } else { "Resend verification email" }}
                        </button>
                        <Show when=move || resend_success.get()>
                            <p class="mt-2 text-sm text-green-700">"Verification email sent!"</p>
                        </Show>
                    </div>
                </Show>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Login" }}
                </button>
                <div class="space-y-2 text-center text-sm text-slate-600">
                    <p>
                        "Need an account? "
                        <a href="/register" class="font-medium text-blue-600 hover:text-blue-700">"Register"</a>
                    </p>
                    <p>
                        <a href="/forgot-password" class="font-medium text-blue-600 hover:text-blue-700">"Forgot password?"</a>
                    </p>
                </div>
            </form>
        </div>
    }
}
