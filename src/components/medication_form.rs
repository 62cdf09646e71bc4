//! Shared dosage/frequency/schedule form used by the add and edit pages.

use leptos::prelude::*;

use crate::models::{Medication, MedicationCreate, MedicationUpdate};

/// Units offered in the dosage dropdown. "Other" opens a free-text field.
pub const DOSAGE_UNITS: &[&str] = &[
    "mg", "mcg", "g", "ml", "L", "tablet", "tablets", "capsule", "capsules", "drop", "drops",
    "spray", "sprays", "puff", "puffs", "patch", "IU", "Other",
];

/// Join amount and unit into the stored dosage string, e.g. `"10 mg"`.
pub fn combine_dosage(amount: &str, unit: &str) -> String {
    format!("{} {}", amount.trim(), unit.trim())
        .trim()
        .to_string()
}

/// Split a stored dosage string back into amount and unit. Accepts both the
/// spaced form this app writes (`"10 mg"`) and the glued form older records
/// carry (`"10mg"`). Anything unsplittable lands entirely in the amount with
/// an `"mg"` unit fallback.
pub fn split_dosage(dosage: &str) -> (String, String) {
    let trimmed = dosage.trim();
    if let Some((amount, unit)) = trimmed.split_once(char::is_whitespace) {
        return (amount.trim().to_string(), unit.trim().to_string());
    }
    let digits_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    if digits_len > 0 && digits_len < trimmed.len() {
        let (amount, unit) = trimmed.split_at(digits_len);
        return (amount.to_string(), unit.to_string());
    }
    (trimmed.to_string(), "mg".to_string())
}

/// Map a parsed unit onto the dropdown: a known unit selects itself, anything
/// else selects "Other" with the raw text in the custom field.
pub fn unit_selection(unit: &str) -> (String, String) {
    if DOSAGE_UNITS.contains(&unit) {
        (unit.to_string(), String::new())
    } else {
        ("Other".to_string(), unit.to_string())
    }
}

/// Signal bundle backing the medication form. `Copy` so closures can capture
/// it freely.
#[derive(Clone, Copy)]
pub struct MedicationFormState {
    pub dosage_amount: RwSignal<String>,
    pub dosage_unit: RwSignal<String>,
    pub custom_unit: RwSignal<String>,
    pub frequency: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub instructions: RwSignal<String>,
}

impl MedicationFormState {
    pub fn new() -> Self {
        Self {
            dosage_amount: RwSignal::new(String::new()),
            dosage_unit: RwSignal::new("mg".to_string()),
            custom_unit: RwSignal::new(String::new()),
            frequency: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            instructions: RwSignal::new(String::new()),
        }
    }

    /// Populate the form from an existing record.
    pub fn load(&self, med: &Medication) {
        let (amount, unit) = split_dosage(&med.dosage);
        let (selected, custom) = unit_selection(&unit);
        self.dosage_amount.set(amount);
        self.dosage_unit.set(selected);
        self.custom_unit.set(custom);
        self.frequency.set(med.frequency.clone());
        self.start_date
            .set(med.start_date.clone().unwrap_or_default());
        self.instructions
            .set(med.instructions.clone().unwrap_or_default());
    }

    fn effective_unit(&self) -> String {
        let selected = self.dosage_unit.get_untracked();
        if selected == "Other" {
            self.custom_unit.get_untracked().trim().to_string()
        } else {
            selected
        }
    }

    /// Combined dosage string, or `None` when amount or unit is missing.
    pub fn dosage(&self) -> Option<String> {
        let amount = self.dosage_amount.get_untracked().trim().to_string();
        let unit = self.effective_unit();
        if amount.is_empty() || unit.is_empty() {
            return None;
        }
        Some(combine_dosage(&amount, &unit))
    }

    fn start_date_value(&self) -> Option<String> {
        let date = self.start_date.get_untracked();
        (!date.trim().is_empty()).then_some(date)
    }

    fn instructions_value(&self) -> Option<String> {
        let text = self.instructions.get_untracked().trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    pub fn to_create(&self, drug_name: String, rxcui: Option<String>) -> Option<MedicationCreate> {
        Some(MedicationCreate {
            drug_name,
            rxcui,
            dosage: self.dosage()?,
            frequency: self.frequency.get_untracked(),
            start_date: self.start_date_value(),
            instructions: self.instructions_value(),
        })
    }

    pub fn to_update(&self) -> Option<MedicationUpdate> {
        Some(MedicationUpdate {
            dosage: self.dosage()?,
            frequency: self.frequency.get_untracked(),
            start_date: self.start_date_value(),
            instructions: self.instructions_value(),
        })
    }
}

impl Default for MedicationFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn MedicationFormFields(form: MedicationFormState) -> impl IntoView {
    view! {
        <div class="grid gap-4 sm:grid-cols-2">
            <div class="space-y-2">
                <label class="block text-sm font-medium text-slate-700" for="dosageAmount">"Dosage Amount"</label>
                <input
                    id="dosageAmount"
                    type="text"
                    prop:value=form.dosage_amount
                    on:input=move |ev| form.dosage_amount.set(event_target_value(&ev))
                    placeholder="e.g. 10"
                    class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                />
            </div>
            <div class="space-y-2">
                <label class="block text-sm font-medium text-slate-700" for="dosageUnit">"Unit"</label>
                <select
                    id="dosageUnit"
                    prop:value=form.dosage_unit
                    on:change=move |ev| form.dosage_unit.set(event_target_value(&ev))
                    class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                >
                    {DOSAGE_UNITS
                        .iter()
                        .map(|unit| view! { <option value=*unit>{*unit}</option> })
                        .collect_view()}
                </select>
                <Show when=move || form.dosage_unit.get() == "Other">
                    <input
                        type="text"
                        prop:value=form.custom_unit
                        on:input=move |ev| form.custom_unit.set(event_target_value(&ev))
                        placeholder="Custom unit"
                        class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
                    />
                </Show>
            </div>
        </div>
        <div class="space-y-2">
            <label class="block text-sm font-medium text-slate-700" for="frequency">"Frequency"</label>
            <input
                id="frequency"
                type="text"
                prop:value=form.frequency
                on:input=move |ev| form.frequency.set(event_target_value(&ev))
                placeholder="e.g. twice daily"
                required
                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
            />
        </div>
        <div class="space-y-2">
            <label class="block text-sm font-medium text-slate-700" for="startDate">"Start Date"</label>
            <input
                id="startDate"
                type="date"
                prop:value=form.start_date
                on:input=move |ev| form.start_date.set(event_target_value(&ev))
                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
            />
        </div>
        <div class="space-y-2">
            <label class="block text-sm font-medium text-slate-700" for="instructions">"Instructions"</label>
            <textarea
                id="instructions"
                prop:value=form.instructions
                on:input=move |ev| form.instructions.set(event_target_value(&ev))
                placeholder="e.g. take with food"
                rows=3
                class="w-full rounded border border-slate-200 px-3 py-2 text-sm shadow-sm focus:border-slate-400"
            ></textarea>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_joins_with_single_space() {
        assert_eq!(combine_dosage("10", "mg"), "10 mg");
        assert_eq!(combine_dosage(" 2 ", " tablets "), "2 tablets");
    }

    #[test]
    fn split_handles_spaced_form() {
        assert_eq!(split_dosage("10 mg"), ("10".into(), "mg".into()));
        assert_eq!(split_dosage("2 tablets"), ("2".into(), "tablets".into()));
    }

    #[test]
    fn split_handles_glued_form() {
        assert_eq!(split_dosage("10mg"), ("10".into(), "mg".into()));
        assert_eq!(split_dosage("2.5ml"), ("2.5".into(), "ml".into()));
    }

    #[test]
    fn split_falls_back_to_mg() {
        assert_eq!(split_dosage("10"), ("10".into(), "mg".into()));
        assert_eq!(split_dosage("one"), ("one".into(), "mg".into()));
    }

    #[test]
    fn unit_selection_maps_unknown_units_to_other() {
        assert_eq!(unit_selection("mg"), ("mg".into(), String::new()));
        assert_eq!(unit_selection("tablets"), ("tablets".into(), String::new()));
        assert_eq!(unit_selection("sachet"), ("Other".into(), "sachet".into()));
    }

    #[test]
    fn round_trip_spaced_dosage() {
        let (amount, unit) = split_dosage("75 mcg");
        assert_eq!(combine_dosage(&amount, &unit), "75 mcg");
    }
}
