use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::models::{DrugResult, split_list};

/// Collapse duplicate hits and keep only results whose names match the
/// search term. The upstream label data returns near-identical records for
/// every package size, so duplicates are the norm, not the exception.
pub fn dedupe_and_filter(results: Vec<DrugResult>, term: &str) -> Vec<DrugResult> {
    let needle = term.trim().to_lowercase();
    let mut seen = HashSet::new();
    let mut kept: Vec<DrugResult> = results
        .into_iter()
        .filter(|drug| {
            let mut haystack = drug.primary_name().to_lowercase();
            for brand in drug.brand_list() {
                haystack.push(' ');
                haystack.push_str(&brand.to_lowercase());
            }
            if let Some(generic) = drug.generic_name.as_deref() {
                haystack.push(' ');
                haystack.push_str(&generic.to_lowercase());
            }
            haystack.contains(&needle)
        })
        .filter(|drug| seen.insert(drug.dedup_key()))
        .collect();
    kept.sort_by_key(|drug| drug.primary_name().to_lowercase());
    kept
}

// `use<>`: the rendered section owns its text and must outlive the borrowed
// input.
fn text_section(label: &'static str, value: Option<&str>) -> impl IntoView + use<> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|value| {
            view! {
                <div class="mt-3">
                    <h4 class="text-sm font-semibold text-slate-700">{label}</h4>
                    <p class="mt-1 text-sm text-slate-600">{value.to_string()}</p>
                </div>
            }
        })
}

fn list_section(label: &'static str, value: Option<&str>) -> impl IntoView + use<> {
    let items = split_list(value.unwrap_or(""));
    (!items.is_empty()).then(|| {
        view! {
            <div class="mt-3">
                <h4 class="text-sm font-semibold text-slate-700">{label}</h4>
                <ul class="mt-1 list-disc space-y-1 pl-5 text-sm text-slate-600">
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ul>
            </div>
        }
    })
}

/// Expanded label sections for one search hit. Renders once; nothing in
/// here is reactive.
#[component]
fn DrugDetails(drug: DrugResult) -> impl IntoView {
    view! {
        <div class="mt-2 border-t border-slate-100 pt-2">
            {text_section("Purpose", drug.purpose.as_deref())}
            {list_section("Indications", drug.indications.as_deref())}
            {list_section("Warnings", drug.warnings.as_deref())}
            {list_section("Side Effects", drug.side_effects.as_deref())}
            {text_section("Dosage", drug.dosage.as_deref())}
            {text_section("Route", drug.route.as_deref())}
        </div>
    }
}

#[component]
pub fn DrugLibraryPage() -> impl IntoView {
    let api = use_api();

    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<DrugResult>::new());
    let (searched, set_searched) = signal(false);
    let (searching, set_searching) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (open_key, set_open_key) = signal(Option::<String>::None);

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let term = query.get_untracked().trim().to_string();
        if term.is_empty() {
            return;
        }
        set_searching.set(true);
        set_error_msg.set(None);
        set_open_key.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.search_drugs(&term).await {
                Ok(hits) => {
                    set_results.set(dedupe_and_filter(hits, &term));
                    set_searched.set(true);
                }
                Err(err) => {
                    set_results.set(Vec::new());
                    set_searched.set(true);
                    set_error_msg.set(Some(err.display_message("Search failed.")));
                }
            }
            set_searching.set(false);
        });
    };

    view! {
        <div class="mx-auto max-w-3xl px-4 py-8">
            <h1 class="mb-2 text-2xl font-semibold text-slate-900">"Drug Library"</h1>
            <p class="mb-6 text-sm text-slate-600">
                "Search FDA label data by brand or generic name."
            </p>

            <form on:submit=on_search class="mb-6 flex gap-2">
                <input
                    type="text"
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    placeholder="e.g. ibuprofen"
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

            <Show when=move || error_msg.get().is_some()>
                <p class="mb-4 text-sm text-red-600">{move || error_msg.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || searched.get() && results.get().is_empty() && error_msg.get().is_none()>
                <p class="text-sm text-slate-600">
                    "No drugs found. Try searching by generic name (e.g., \"atorvastatin\" instead of \"Lipitor\")."
                </p>
            </Show>

            <div class="space-y-3">
                <For
                    each=move || results.get()
                    key=|drug| drug.dedup_key()
                    children=move |drug| {
                        let key = drug.dedup_key();
                        let toggle_key = key.clone();
                        let is_open = Signal::derive(move || open_key.get().as_deref() == Some(key.as_str()));
                        let name = drug.primary_name().to_string();
                        let generic = drug.generic_name.clone().unwrap_or_default();
                        let details = drug.clone();
                        view! {
                            <div class="rounded-lg bg-white p-4 shadow-sm">
                                <button
                                    class="flex w-full items-center justify-between text-left"
                                    on:click=move |_| {
                                        let key = toggle_key.clone();
                                        set_open_key.update(|open| {
                                            *open = if open.as_deref() == Some(key.as_str()) {
                                                None
                                            } else {
                                                Some(key)
                                            };
                                        });
                                    }
                                >
                                    <span>
                                        <span class="font-semibold text-slate-900">{name}</span>
                                        <Show when={
                                            let generic = generic.clone();
                                            move || !generic.is_empty()
                                        }>
                                            <span class="ml-2 text-sm text-slate-500">{format!("({generic})")}</span>
                                        </Show>
                                    </span>
                                    <span class="text-sm text-blue-600">
                                        {move || if is_open.get() { "Hide details" } else { "Show details" }}
                                    </span>
                                </button>
                                <Show when=move || is_open.get()>
                                    <DrugDetails drug=details.clone() />
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug(brand: &str, generic: &str, rxcui: Option<&str>) -> DrugResult {
        DrugResult {
            brand_name: (!brand.is_empty()).then(|| brand.to_string()),
            generic_name: (!generic.is_empty()).then(|| generic.to_string()),
            rxcui: rxcui.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn duplicates_collapse_on_rxcui() {
        let hits = vec![
            drug("Lipitor", "atorvastatin", Some("617312")),
            drug("LIPITOR 10mg", "atorvastatin", Some("617312")),
        ];
        let out = dedupe_and_filter(hits, "lipitor");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].primary_name(), "Lipitor");
    }

    #[test]
    fn duplicates_without_rxcui_collapse_on_name() {
        let hits = vec![
            drug("Advil", "ibuprofen", None),
            drug("Advil", "ibuprofen", None),
        ];
        assert_eq!(dedupe_and_filter(hits, "advil").len(), 1);
    }

    #[test]
    fn unrelated_hits_are_filtered_out() {
        let hits = vec![
            drug("Advil", "ibuprofen", Some("1")),
            drug("Tylenol", "acetaminophen", Some("2")),
        ];
        let out = dedupe_and_filter(hits, "ibuprofen");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].primary_name(), "Advil");
    }

    #[test]
    fn term_matches_generic_name_case_insensitively() {
        let hits = vec![drug("Lipitor", "Atorvastatin Calcium", Some("1"))];
        assert_eq!(dedupe_and_filter(hits, "ATORVASTATIN").len(), 1);
    }

    #[test]
    fn detail_sections_outlive_the_borrowed_label_fields() {
        fn assert_owned<T: 'static>(_: T) {}
        let purpose = String::from("Pain reliever");
        let warnings = String::from("Do not exceed 6 tablets; ask a doctor");
        assert_owned(text_section("Purpose", Some(purpose.as_str())));
        assert_owned(list_section("Warnings", Some(warnings.as_str())));
    }

    #[test]
    fn results_sort_by_display_name() {
        let hits = vec![
            drug("Zyrtec", "cetirizine", Some("1")),
            drug("allegra", "fexofenadine", Some("2")),
        ];
        // Both match an empty-ish term via their shared letter.
        let out = dedupe_and_filter(hits, "e");
        assert_eq!(out[0].primary_name(), "allegra");
        assert_eq!(out[1].primary_name(), "Zyrtec");
    }
}
