//! Form Fields
//!
//! Labelled inputs bound to a signal.

use leptos::*;

#[component]
pub fn TextField(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
    #[prop(default = "text")]
    kind: &'static str,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm font-medium text-gray-700 mb-1">
                {label}
                {required.then(|| view! { <span class="text-red-500">" *"</span> })}
            </span>
            <input
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent"
            />
        </label>
    }
}

#[component]
pub fn TextArea(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(default = 3)]
    rows: u32,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm font-medium text-gray-700 mb-1">{label}</span>
            <textarea
                rows=rows
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent"
            />
        </label>
    }
}

/// Dropdown; the first option is `any_label` with an empty value
#[component]
pub fn SelectField(
    #[prop(into)]
    label: String,
    options: Vec<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(default = "All")]
    any_label: &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm font-medium text-gray-700 mb-1">{label}</span>
            <select
                on:change=move |ev| on_change.call(event_target_value(&ev))
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500"
            >
                <option value="" selected=move || value.get().is_empty()>{any_label}</option>
                {options.into_iter().map(|option| {
                    let current = option.clone();
                    view! {
                        <option value=option.clone() selected=move || value.get() == current>
                            {option}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
