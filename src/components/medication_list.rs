use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::models::Medication;

/// Shorten free-text notes for the table cell. Cuts on a character boundary
/// and appends an ellipsis.
pub fn truncate_notes(notes: &str, max_chars: usize) -> String {
    if notes.chars().count() <= max_chars {
        return notes.to_string();
    }
    let cut: String = notes.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[component]
pub fn MedicationListPage() -> impl IntoView {
    let api = use_api();

    let (medications, set_medications) = signal(Vec::<Medication>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notes_modal, set_notes_modal) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.list_medications().await {
                Ok(meds) => set_medications.set(meds),
                Err(err) => {
                    set_error_msg.set(Some(err.display_message("Could not load medications.")))
                }
            }
            set_loading.set(false);
        });
    }

    // Copy handle, so the handler passes freely through the nested views.
    let delete_api = api.clone();
    let on_delete = StoredValue::new_local(move |id: i64| {
        let api = delete_api.clone();
        spawn_local(async move {
            match api.delete_medication(id).await {
                Ok(()) => set_medications.update(|meds| meds.retain(|m| m.id != id)),
                Err(err) => set_error_msg.set(Some(err.display_message("Delete failed."))),
            }
        });
    });

    view! {
        <div class="mx-auto max-w-4xl px-4 py-8">
            <div class="mb-6 flex items-center justify-between">
                <h1 class="text-2xl font-semibold text-slate-900">"My Medications"</h1>
                <a
                    href="/medications/add"
                    class="rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800"
                >
                    "Add Medication"
                </a>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <p class="mb-4 text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-sm text-slate-600">"Loading..."</p> }
            >
                <Show
                    when=move || !medications.get().is_empty()
                    fallback=|| view! {
                        <div class="rounded-lg bg-white p-8 text-center shadow-sm">
                            <p class="text-sm text-slate-600">"You haven't added any medications yet."</p>
                            <a
                                href="/medications/add"
                                class="mt-4 inline-block rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800"
                            >
                                "Add your first medication"
                            </a>
                        </div>
                    }
                >
                    <div class="overflow-x-auto rounded-lg bg-white shadow-sm">
                        <table class="w-full text-left text-sm">
                            <thead class="border-b border-slate-200 text-slate-700">
                                <tr>
                                    <th class="px-4 py-3 font-medium">"Drug"</th>
                                    <th class="px-4 py-3 font-medium">"Dosage"</th>
                                    <th class="px-4 py-3 font-medium">"Frequency"</th>
                                    <th class="px-4 py-3 font-medium">"Start Date"</th>
                                    <th class="px-4 py-3 font-medium">"Notes"</th>
                                    <th class="px-4 py-3 font-medium">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || medications.get()
                                    key=|med| med.id
                                    children=move |med| {
                                        let id = med.id;
                                        let notes = med.instructions.clone().unwrap_or_default();
                                        let notes_full = notes.clone();
                                        let notes_truncated = notes.chars().count() > 50;
                                        view! {
                                            <tr class="border-b border-slate-100">
                                                <td class="px-4 py-3 font-medium text-slate-900">{med.drug_name.clone()}</td>
                                                <td class="px-4 py-3 text-slate-600">{med.dosage.clone()}</td>
                                                <td class="px-4 py-3 text-slate-600">{med.frequency.clone()}</td>
                                                <td class="px-4 py-3 text-slate-600">
                                                    {med.start_date.clone().unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td class="px-4 py-3 text-slate-600">
                                                    {if notes.is_empty() {
                                                        view! { <span>"-"</span> }.into_any()
                                                    } else if notes_truncated {
                                                        view! {
                                                            <span>
                                                                {truncate_notes(&notes, 50)}
                                                                " "
                                                                <button
                                                                    class="text-blue-600 hover:text-blue-700"
                                                                    on:click=move |_| set_notes_modal.set(Some(notes_full.clone()))
                                                                >
                                                                    "View"
                                                                </button>
                                                            </span>
                                                        }.into_any()
                                                    } else {
                                                        view! { <span>{notes.clone()}</span> }.into_any()
                                                    }}
                                                </td>
                                                <td class="px-4 py-3">
                                                    <a
                                                        href=format!("/medications/edit/{id}")
                                                        class="mr-3 text-sm font-medium text-blue-600 hover:text-blue-700"
                                                    >
                                                        "Edit"
                                                    </a>
                                                    <button
                                                        class="text-sm font-medium text-red-600 hover:text-red-700"
                                                        on:click=move |_| on_delete.with_value(|delete| delete(id))
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>

            <Show when=move || notes_modal.get().is_some()>
                <div class="fixed inset-0 z-10 flex items-center justify-center bg-slate-900/50 px-4">
                    <div class="w-full max-w-md rounded-lg bg-white p-6 shadow-lg">
                        <h2 class="font-semibold text-slate-900">"Instructions"</h2>
                        <p class="mt-2 whitespace-pre-wrap text-sm text-slate-600">
                            {move || notes_modal.get().unwrap_or_default()}
                        </p>
                        <button
                            class="mt-4 rounded bg-slate-900 px-4 py-2 text-sm font-medium text-white transition hover:bg-slate-800"
                            on:click=move |_| set_notes_modal.set(None)
                        >
                            "Close"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_notes;
    use leptos::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn stored_delete_handler_is_callable_from_nested_closures() {
        let owner = Owner::new();
        owner.set();

        let deleted = Rc::new(Cell::new(0i64));
        let handler = {
            let deleted = deleted.clone();
            StoredValue::new_local(move |id: i64| deleted.set(deleted.get() + id))
        };
        // Mirrors the view nesting: re-callable closures all sharing one
        // Copy handle.
        let render_row = move |id: i64| {
            let click = move || handler.with_value(|delete| delete(id));
            click();
            click();
        };
        render_row(3);
        render_row(4);
        assert_eq!(deleted.get(), 14);
    }

    #[test]
    fn short_notes_pass_through() {
        assert_eq!(truncate_notes("take with food", 50), "take with food");
    }

    #[test]
    fn long_notes_are_cut_with_ellipsis() {
        let notes = "a".repeat(60);
        let out = truncate_notes(&notes, 50);
        assert_eq!(out, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn cut_lands_on_a_character_boundary() {
        let notes = "é".repeat(60);
        let out = truncate_notes(&notes, 50);
        assert!(out.starts_with(&"é".repeat(50)));
        assert!(out.ends_with("..."));
    }
}
