use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::use_api;
use crate::components::drug_library::dedupe_and_filter;
use crate::components::medication_form::{MedicationFormFields, MedicationFormState};
use crate::models::DrugResult;

#[component]
pub fn AddMedicationPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<DrugResult>::new());
    let (searching, set_searching) = signal(false);
    let (selected, set_selected) = signal(Option::<DrugResult>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let form = MedicationFormState::new();

    let search_api = api.clone();
    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let term = query.get_untracked().trim().to_string();
        if term.is_empty() {
            return;
        }
        set_searching.set(true);
        set_error_msg.set(None);

        let api = search_api.clone();
        spawn_local(async move {
            match api.search_drugs(&term).await {
                Ok(hits) => {
                    let filtered = dedupe_and_filter(hits, &term);
                    if filtered.is_empty() {
                        set_error_msg.set(Some(
                            "No drugs found. Try searching by generic name (e.g., \"atorvastatin\" instead of \"Lipitor\").".to_string(),
                        ));
                    }
                    set_results.set(filtered);
                }
                Err(_) => {
                    set_results.set(Vec::new());
                    set_error_msg.set(Some(
                        "No drugs found. Try searching by brand name (e.g., \"Lipitor\") or generic name (e.g., \"atorvastatin\").".to_string(),
                    ));
                }
            }
            set_searching.set(false);
        });
    };

    let save_api = api.clone();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let Some(drug) = selected.get_untracked() else {
            set_error_msg.set(Some("Select a drug from search results.".to_string()));
            return;
        };
        let drug_name = drug.primary_name().to_string();
        let Some(create) = form.to_create(drug_name, drug.rxcui.clone()) else {
            set_error_msg.set(Some("Please enter both dosage amount and unit.".to_string()));
            return;
        };

        set_saving.set(true);
        let api = save_api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.create_medication(&create).await {
                Ok(_) => navigate("/medications", Default::default()),
                Err(err) => {
                    set_error_msg.set(Some(err.display_message("Could not add medication.")));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="mx-auto max-w-2xl px-4 py-8">
            <h1 class="mb-6 text-2xl font-semibold text-slate-900">"Add Medication"</h1>

            <div class="mb-6 rounded-lg bg-white p-6 shadow-sm">
                <h2 class="mb-4 font-semibold text-slate-900">"1. Find your drug"</h2>
                <form on:submit=on_search class="flex gap-2">
                    <input
                        type="text"
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        placeholder="Search by brand or generic name"
                        class="flex-1 rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                    <button
                        type="submit"
                        disabled=move || searching.get()
                        class="rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                    >
                        {move || if searching.get() { "Searching..." } else { "Search" }}
                    </button>
                </form>

                <div class="mt-4 space-y-2">
                    <For
                        each=move || results.get()
                        key=|drug| drug.dedup_key()
                        children=move |drug| {
                            let key = drug.dedup_key();
                            let name = drug.primary_name().to_string();
                            let generic = drug.generic_name.clone().unwrap_or_default();
                            let pick = drug.clone();
                            let is_selected = Signal::derive(move || {
                                selected.get().is_some_and(|s| s.dedup_key() == key)
                            });
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if is_selected.get() {
                                            "block w-full rounded border border-blue-500 bg-blue-50 p-3 text-left"
                                        } else {
                                            "block w-full rounded border border-slate-200 p-3 text-left hover:border-slate-400"
                                        }
                                    }
                                    on:click=move |_| set_selected.set(Some(pick.clone()))
                                >
                                    <span class="font-medium text-slate-900">{name}</span>
                                    <Show when={
                                        let generic = generic.clone();
                                        move || !generic.is_empty()
                                    }>
                                        <span class="ml-2 text-sm text-slate-500">{format!("({generic})")}</span>
                                    </Show>
                                </button>
                            }
                        }
                    />
                </div>
            </div>

            <form on:submit=on_submit class="space-y-4 rounded-lg bg-white p-6 shadow-sm">
                <h2 class="font-semibold text-slate-900">"2. Dosage and schedule"</h2>
                <Show when=move || selected.get().is_some()>
                    <p class="text-sm text-slate-600">
                        "Adding: "
                        <span class="font-medium text-slate-900">
                            {move || {
                                selected
                                    .get()
                                    .map(|s| s.primary_name().to_string())
                                    .unwrap_or_default()
                            }}
                        </span>
                    </p>
                </Show>
                <MedicationFormFields form=form />
                <Show when=move || error_msg.get().is_some()>
                    <p class="text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
                </Show>
                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="w-full rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800 disabled:opacity-60"
                >
                    {move || if saving.get() { "Adding..." } else { "Add Medication" }}
                </button>
            </form>
        </div>
    }
}
