use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::CheckIcon;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (sent, set_sent) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let api = api.clone();
        spawn_local(async move {
            // Always report success so the form never leaks whether an
            // account exists for the address.
            let _ = api.forgot_password(&email.get_untracked()).await;
            set_sent.set(true);
            set_submitting.set(false);
        });
    };

    view! {
        <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
            <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Forgot Password"</h1>
            <Show
                when=move || sent.get()
                fallback=move || view! {
                    <form on:submit=on_submit.clone() class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
                        <p class="text-sm text-slate-600">
                            "Enter your email address and we'll send you a link to reset your password."
                        </p>
                        <div class="space-y-2">
                            <label class="block text-sm font-medium text-slate-700" for="email">"Email Address"</label>
                            <input
                                id="email"
                                type="email"
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                required
                                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                            />
                        </div>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                        >
                            {move || if submitting.get() { "Sending..." } else { "Send Reset Link" }}
                        </button>
                        <p class="text-center text-sm text-slate-600">
                            "Remember your password? "
                            <a href="/login" class="font-medium text-blue-600 hover:text-blue-700">"Login"</a>
                        </p>
                    </form>
                }
            >
                <div class="rounded-lg bg-white p-6 shadow-sm">
                    <div class="mx-auto mb-4 flex h-12 w-12 items-center justify-center rounded-full bg-green-100">
                        <CheckIcon attr:class="h-6 w-6 text-green-600" />
                    </div>
                    <h2 class="text-center text-lg font-semibold text-slate-900">"Check Your Email"</h2>
                    <p class="mt-2 text-center text-sm text-slate-600">
                        "If an account exists for "
                        <span class="font-medium">{move || email.get()}</span>
                        ", we've sent a password reset link."
                    </p>
                    <a
                        href="/login"
                        class="mt-6 block w-full rounded bg-slate-900 px-4 py-2 text-center text-sm font-medium text-white transition hover:bg-slate-800"
                    >
                        "Back to Login"
                    </a>
                </div>
            </Show>
        </div>
    }
}
