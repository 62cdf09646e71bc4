use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::use_api;
use crate::session::{self, use_session};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let navigate = use_navigate();
    let user = session.user();

    let (resending, set_resending) = signal(false);
    let (resend_success, set_resend_success) = signal(false);

    let resend_api = api.clone();
    let on_resend = move |_| {
        let Some(email) = user.get_untracked().map(|u| u.email) else {
            return;
        };
        set_resending.set(true);
        set_resend_success.set(false);

        let api = resend_api.clone();
        spawn_local(async move {
            match api.resend_verification(&email).await {
                Ok(()) => set_resend_success.set(true),
                Err(err) => {
                    let message = err.display_message("");
                    if message.to_lowercase().contains("already verified") {
                        // The banner disappears once the refreshed profile
                        // reports the address as verified.
                        let _ = session::refresh_profile(session, &api).await;
                    } else {
                        leptos::logging::error!("resend verification failed: {err}");
                    }
                }
            }
            set_resending.set(false);
        });
    };

    let logout_api = api.clone();
    let on_logout = move |_| {
        let api = logout_api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            session::logout(session, &api).await;
            navigate("/login", Default::default());
        });
    };

    let show_banner = move || user.get().is_some_and(|u| !u.email_verified);

    view! {
        <div class="mx-auto max-w-4xl px-4 py-8">
            <Show when=show_banner>
                <div class="mb-6 rounded border border-amber-200 bg-amber-50 p-4">
                    <p class="text-sm text-amber-800">
                        "Your email is not verified. Some features may be limited."
                    </p>
                    <button
                        on:click=on_resend.clone()
                        disabled=move || resending.get()
                        class="mt-2 text-sm font-medium text-amber-700 underline hover:text-amber-800 disabled:opacity-60"
                    >
                        {move || if resending.get() { "Sending..." } else { "Resend verification email" }}
                    </button>
                    <Show when=move || resend_success.get()>
                        <p class="mt-2 text-sm text-green-700">"Verification email sent! Check your inbox."</p>
                    </Show>
                </div>
            </Show>

            <div class="mb-8 flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-semibold text-slate-900">
                        "Welcome, "
                        {move || user.get().map(|u| u.name).unwrap_or_else(|| "User".to_string())}
                        "!"
                    </h1>
                    <p class="mt-1 text-sm text-slate-600">"Manage your medications and account from here."</p>
                </div>
                <button
                    on:click=on_logout
                    class="rounded border border-slate-300 px-4 py-2 text-sm font-medium text-slate-700 transition hover:bg-slate-100"
                >
                    "Logout"
                </button>
            </div>

            <div class="grid gap-4 sm:grid-cols-3">
                <a
                    href="/profile"
                    class="block rounded-lg bg-white p-6 shadow-sm transition hover:shadow-md"
                >
                    <h2 class="font-semibold text-slate-900">"My Profile"</h2>
                    <p class="mt-1 text-sm text-slate-600">"View and update your account details."</p>
                </a>
                <a
                    href="/medications"
                    class="block rounded-lg bg-white p-6 shadow-sm transition hover:shadow-md"
                >
                    <h2 class="font-semibold text-slate-900">"My Medications"</h2>
                    <p class="mt-1 text-sm text-slate-600">"See everything you are currently taking."</p>
                </a>
                <a
                    href="/medications/add"
                    class="block rounded-lg bg-white p-6 shadow-sm transition hover:shadow-md"
                >
                    <h2 class="font-semibold text-slate-900">"Add Medication"</h2>
                    <p class="mt-1 text-sm text-slate-600">"Search the drug library and add a medication."</p>
                </a>
            </div>
        </div>
    }
}
