use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::session::{self, use_session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Success,
    Error,
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let user = session.user();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (profile_status, set_profile_status) = signal(Option::<(StatusKind, String)>::None);
    let (saving_profile, set_saving_profile) = signal(false);

    let (current_password, set_current_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (password_status, set_password_status) = signal(Option::<(StatusKind, String)>::None);
    let (saving_password, set_saving_password) = signal(false);

    // Form fields follow the session user, including the refresh right
    // after login.
    Effect::new(move |_| {
        if let Some(u) = user.get() {
            set_name.set(u.name);
            set_email.set(u.email);
        }
    });

    let profile_api = api.clone();
    let on_submit_profile = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_saving_profile.set(true);
        set_profile_status.set(None);

        let api = profile_api.clone();
        spawn_local(async move {
            match api
                .update_profile(&name.get_untracked(), &email.get_untracked())
                .await
            {
                Ok(updated) => {
                    session::set_user(session, updated);
                    set_profile_status.set(Some((
                        StatusKind::Success,
                        "Profile updated successfully.".to_string(),
                    )));
                }
                Err(err) => {
                    set_profile_status.set(Some((
                        StatusKind::Error,
                        err.display_message("Update failed. Please try again."),
                    )));
                }
            }
            set_saving_profile.set(false);
        });
    };

    let password_api = api.clone();
    let on_submit_password = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_saving_password.set(true);
        set_password_status.set(None);

        let api = password_api.clone();
        spawn_local(async move {
            match api
                .change_password(&current_password.get_untracked(), &new_password.get_untracked())
                .await
            {
                Ok(()) => {
                    set_password_status.set(Some((
                        StatusKind::Success,
                        "Password changed successfully. A confirmation email has been sent."
                            .to_string(),
                    )));
                    set_current_password.set(String::new());
                    set_new_password.set(String::new());
                }
                Err(err) => {
                    set_password_status.set(Some((
                        StatusKind::Error,
                        err.display_message("Password change failed."),
                    )));
                }
            }
            set_saving_password.set(false);
        });
    };

    let status_line = move |status: ReadSignal<Option<(StatusKind, String)>>| {
        move || {
            status.get().map(|(kind, message)| {
                let class = match kind {
                    StatusKind::Success => "text-sm text-green-700",
                    StatusKind::Error => "text-sm text-red-600",
                };
                view! { <p class=class>{message}</p> }
            })
        }
    };

    view! {
        <div class="mx-auto max-w-2xl px-4 py-8">
            <h1 class="mb-6 text-2xl font-semibold text-slate-900">"My Profile"</h1>

            <form on:submit=on_submit_profile class="mb-8 space-y-4 rounded-lg bg-white p-6 shadow-sm">
                <h2 class="font-semibold text-slate-900">"Account Details"</h2>
                <div class="space-y-2">
                    <label class="block text-sm font-medium text-slate-700" for="name">"Name"</label>
                    <input
                        id="name"
                        type="text"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        required
                        class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                </div>
                <div class="space-y-2">
                    <label class="block text-sm font-medium text-slate-700" for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        prop:value=email
                        disabled
                        class="w-full rounded border border-slate-200 bg-slate-100 px-3 py-2 text-sm text-slate-500 shadow-sm"
                    />
                    <p class="text-xs text-slate-500">"Email cannot be changed for security reasons"</p>
                </div>
                {status_line(profile_status)}
                <button
                    type="submit"
                    disabled=move || saving_profile.get()
                    class="rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                >
                    {move || if saving_profile.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>

            <form on:submit=on_submit_password class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
                <h2 class="font-semibold text-slate-900">"Change Password"</h2>
                <div class="space-y-2">
                    <label class="block text-sm font-medium text-slate-700" for="currentPassword">"Current Password"</label>
                    <input
                        id="currentPassword"
                        type="password"
                        prop:value=current_password
                        on:input=move |ev| set_current_password.set(event_target_value(&ev))
                        required
                        class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                </div>
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
                {status_line(password_status)}
                <button
                    type="submit"
                    disabled=move || saving_password.get()
                    class="rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                >
                    {move || if saving_password.get() { "Changing..." } else { "Change Password" }}
                </button>
            </form>
        </div>
    }
}
