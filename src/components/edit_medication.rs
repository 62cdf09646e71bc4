use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api::use_api;
use crate::components::medication_form::{MedicationFormFields, MedicationFormState};
use crate::models::Medication;

#[component]
pub fn EditMedicationPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let params = use_params_map();

    let (medication, set_medication) = signal(Option::<Medication>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let form = MedicationFormState::new();

    let id = params
        .get_untracked()
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok());

    // Fetching one record means filtering the list; the backend has no
    // single-medication read.
    {
        let api = api.clone();
        spawn_local(async move {
            let Some(id) = id else {
                set_error_msg.set(Some("Medication not found.".to_string()));
                set_loading.set(false);
                return;
            };
            match api.list_medications().await {
                Ok(meds) => match meds.into_iter().find(|m| m.id == id) {
                    Some(med) => {
                        form.load(&med);
                        set_medication.set(Some(med));
                    }
                    None => set_error_msg.set(Some("Medication not found.".to_string())),
                },
                Err(err) => {
                    set_error_msg.set(Some(err.display_message("Could not load medication.")))
                }
            }
            set_loading.set(false);
        });
    }

    // Copy handle, so the handler passes freely through the nested views.
    let on_submit = StoredValue::new_local(move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let Some(id) = medication.get_untracked().map(|m| m.id) else {
            return;
        };
        let Some(update) = form.to_update() else {
            set_error_msg.set(Some("Please enter both dosage amount and unit.".to_string()));
            return;
        };

        set_saving.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.update_medication(id, &update).await {
                Ok(_) => navigate("/medications", Default::default()),
                Err(err) => {
                    set_error_msg.set(Some(err.display_message("Update failed.")));
                    set_saving.set(false);
                }
            }
        });
    });

    view! {
        <div class="mx-auto max-w-2xl px-4 py-8">
            <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Edit Medication"</h1>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-sm text-slate-600">"Loading..."</p> }
            >
                <Show
                    when=move || medication.get().is_some()
                    fallback=move || view! {
                        <p class="text-sm text-red-600">
                            {move || {
                                error_msg
                                    .get()
                                    .unwrap_or_else(|| "Medication not found.".to_string())
                            }}
                        </p>
                    }
                >
                    <form
                        on:submit=move |ev| on_submit.with_value(|submit| submit(ev))
                        class="space-y-4 rounded-lg bg-white p-6 shadow-sm"
                    >
                        <p class="text-sm text-slate-600">
                            "Editing: "
                            <span class="font-medium text-slate-900">
                                {move || {
                                    medication.get().map(|m| m.drug_name).unwrap_or_default()
                                }}
                            </span>
                        </p>
                        <MedicationFormFields form=form />
                        <Show when=move || error_msg.get().is_some()>
                            <p class="text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
                        </Show>
                        <button
                            type="submit"
                            disabled=move || saving.get()
                            class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                        >
                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                        </button>
                    </form>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use leptos::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn stored_submit_handler_is_callable_from_nested_closures() {
        let owner = Owner::new();
        owner.set();

        let submitted = Rc::new(Cell::new(0u32));
        let handler = {
            let submitted = submitted.clone();
            StoredValue::new_local(move |_ev: ()| submitted.set(submitted.get() + 1))
        };
        // Two re-callable layers around the handler, as in the page view.
        let render_form = move || {
            let submit = move || handler.with_value(|f| f(()));
            submit();
            submit();
        };
        render_form();
        render_form();
        assert_eq!(submitted.get(), 4);
    }
}
