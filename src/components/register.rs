use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::CheckIcon;
use crate::session::{self, use_session};

/// Client-side mirror of the server's password policy: 8+ characters with
/// at least one lowercase, one uppercase, one digit and one special.
fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success, set_success) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        set_error_msg.set(None);

        if !password_meets_policy(&password.get_untracked()) {
            set_error_msg.set(Some(
                "Password must be 8+ chars with uppercase, lowercase, number, and special character."
                    .to_string(),
            ));
            set_submitting.set(false);
            return;
        }

        let api = api.clone();
        spawn_local(async move {
            let result = session::register(
                session,
                &api,
                &name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await;
            match result {
                Ok(_) => set_success.set(true),
                Err(err) => set_error_msg
                    .set(Some(err.display_message("Registration failed. Please try again."))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Show
            when=move || success.get()
            fallback=move || view! {
                <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
                    <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Register"</h1>
                    <form on:submit=on_submit.clone() class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
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
                            <p class="text-xs text-slate-500">
                                "Must include uppercase, lowercase, number, special character, and be 8+ characters."
                            </p>
                        </div>
                        <Show when=move || error_msg.get().is_some()>
                            <p class="text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
                        </Show>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                        >
                            {move || if submitting.get() { "Creating account..." } else { "Register" }}
                        </button>
                        <p class="text-sm text-slate-600">
                            "Already have an account? "
                            <a href="/login" class="font-medium text-blue-600 hover:text-blue-700">"Login"</a>
                        </p>
                    </form>
                </div>
            }
        >
            <div class="mx-auto flex min-h-screen max-w-md flex-col justify-center px-4">
                <div class="rounded-lg bg-white p-6 shadow-sm text-center">
                    <div class="mx-auto mb-4 flex h-12 w-12 items-center justify-center rounded-full bg-green-100">
                        <CheckIcon attr:class="h-6 w-6 text-green-600" />
                    </div>
                    <h1 class="text-xl font-semibold text-slate-900">"Registration Successful!"</h1>
                    <p class="mt-2 text-sm text-slate-600">
                        "Please check your email "
                        <span class="font-medium">{move || email.get()}</span>
                        " to verify your account."
                    </p>
                    <a
                        href="/login"
                        class="mt-6 inline-block rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800"
                    >
                        "Go to Login"
                    </a>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_icon_takes_a_spread_class_attribute() {
        let owner = Owner::new();
        owner.set();
        let _ = view! { <CheckIcon attr:class="h-6 w-6 text-green-600" /> };
    }

    #[test]
    fn accepts_a_compliant_password() {
        assert!(password_meets_policy("Passw0rd!"));
    }

    #[test]
    fn rejects_missing_character_classes() {
        assert!(!password_meets_policy("password1!")); // no uppercase
        assert!(!password_meets_policy("PASSWORD1!")); // no lowercase
        assert!(!password_meets_policy("Password!!")); // no digit
        assert!(!password_meets_policy("Passw0rdX")); // no special
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(!password_meets_policy("Pa0!"));
    }
}
