//! Health Alerts Page
//!
//! Community alerts filtered by type, severity and free text, plus the
//! emergency contacts panel.

use leptos::*;

use symptrack::filter::SEARCH_SLOT;
use symptrack::format::{miles, time_ago_str, EMERGENCY_CONTACTS, tel_link};
use symptrack::models::{Alert, ALERT_TYPES};
use symptrack::view::{DisplayState, ListView};
use symptrack::Severity;

use crate::api;
use crate::components::{ListSkeleton, SelectField, SeverityBadge, TextField};
use crate::state::ListScreen;

#[component]
pub fn Alerts() -> impl IntoView {
    let alerts = ListScreen::new(ListView::<Alert>::new());
    alerts.load(api::fetch_alerts());

    let search_list = alerts.clone();
    let type_list = alerts.clone();
    let severity_list = alerts.clone();
    let clear_list = alerts.clone();
    let count_list = alerts.clone();
    let list = alerts.clone();

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Health Alerts"</h1>
                <p class="text-gray-600 mt-1">"Outbreaks and public health notices near you"</p>
            </div>

            <div class="grid lg:grid-cols-4 gap-8">
                <div class="lg:col-span-3 space-y-6">
                    <div class="bg-white rounded-xl shadow-sm p-4 space-y-4">
                        <div class="grid md:grid-cols-3 gap-4">
                            <TextField
                                label="Search"
                                placeholder="Search alerts..."
                                value=Signal::derive({
                                    let alerts = alerts.clone();
                                    move || alerts.filter_value(SEARCH_SLOT)
                                })
                                on_input=move |v| search_list.set_search(v)
                            />
                            <SelectField
                                label="Type"
                                options=ALERT_TYPES.iter().map(|t| t.to_string()).collect()
                                value=Signal::derive({
                                    let alerts = alerts.clone();
                                    move || alerts.filter_value("type")
                                })
                                on_change=move |v| type_list.set_filter("type", v)
                                any_label="All Types"
                            />
                            <SelectField
                                label="Severity"
                                options=Severity::ALL.iter().map(|s| s.as_str().to_string()).collect()
                                value=Signal::derive({
                                    let alerts = alerts.clone();
                                    move || alerts.filter_value("severity")
                                })
                                on_change=move |v| severity_list.set_filter("severity", v)
                                any_label="All Severities"
                            />
                        </div>

                        <div class="flex items-center justify-between text-sm">
                            <span class="text-gray-600">
                                {move || format!(
                                    "Showing {} of {} alerts",
                                    count_list.visible().len(),
                                    count_list.source_len()
                                )}
                            </span>
                            <Show when={
                                let alerts = alerts.clone();
                                move || alerts.active_filters() > 0
                            }>
                                <button
                                    on:click={
                                        let clear_list = clear_list.clone();
                                        move |_| clear_list.clear_filters()
                                    }
                                    class="text-blue-600 hover:text-blue-800 font-medium"
                                >
                                    "Clear filters"
                                </button>
                            </Show>
                        </div>
                    </div>

                    {move || match list.display_state() {
                        DisplayState::Loading => view! { <ListSkeleton count=4 /> }.into_view(),
                        DisplayState::NoResults => view! {
                            <div class="text-center py-12 bg-white rounded-xl shadow-sm">
                                <p class="text-gray-500">"No alerts match your filters"</p>
                            </div>
                        }
                        .into_view(),
                        DisplayState::Items => list
                            .visible()
                            .into_iter()
                            .map(|alert| view! { <AlertCard alert=alert /> })
                            .collect_view(),
                    }}
                </div>

                <EmergencyContacts />
            </div>
        </div>
    }
}

#[component]
fn AlertCard(alert: Alert) -> impl IntoView {
    let style = alert.severity.style();
    let now = chrono::Utc::now();

    view! {
        <article class="bg-white rounded-xl shadow-sm p-6 mb-4">
            <div class="flex items-start space-x-4">
                <div class=format!("w-10 h-10 rounded-lg flex items-center justify-center {}", style.icon_bg)>
                    <span>{style.icon}</span>
                </div>

                <div class="flex-1 space-y-2">
                    <div class="flex items-center justify-between">
                        <h3 class="text-lg font-semibold text-gray-900">{alert.title.clone()}</h3>
                        <SeverityBadge severity=alert.severity />
                    </div>

                    <p class="text-gray-600 text-sm">{alert.description.clone()}</p>

                    <div class="flex flex-wrap gap-4 text-xs text-gray-500">
                        <span>{alert.alert_type.clone()}</span>
                        {alert.location.clone().map(|l| view! { <span>"📍 "{l}</span> })}
                        {alert.distance.map(|d| view! { <span>{miles(d)}</span> })}
                        {alert.affected_count.map(|n| view! { <span>{format!("{} affected", n)}</span> })}
                        {alert.source.clone().map(|s| view! { <span>"Source: "{s}</span> })}
                        <span>{time_ago_str(alert.created_at.as_deref(), now)}</span>
                    </div>
                </div>
            </div>
        </article>
    }
}

#[component]
fn EmergencyContacts() -> impl IntoView {
    view! {
        <aside class="bg-red-50 border border-red-200 rounded-xl p-6 h-fit space-y-4">
            <h2 class="text-lg font-semibold text-red-800">"Emergency Contacts"</h2>
            {EMERGENCY_CONTACTS.iter().map(|(label, number)| view! {
                <a href=tel_link(number) class="block">
                    <p class="text-sm text-red-700">{*label}</p>
                    <p class="text-xl font-bold text-red-900">{*number}</p>
                </a>
            }).collect_view()}
        </aside>
    }
}
