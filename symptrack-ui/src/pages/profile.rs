//! Profile Page
//!
//! Account details with an edit mode, activity stats and sign out.

use leptos::*;
use leptos_router::use_navigate;

use symptrack::forms::{ProfileForm, GENDERS};
use symptrack::models::{self, HealthStats};
use symptrack::session::Route as Screen;

use crate::api;
use crate::components::{Loading, SelectField, TextArea, TextField};
use crate::pages::login::ErrorBanner;
use crate::state::{use_session, GlobalState};

#[component]
pub fn Profile() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_session();

    let profile = create_rw_signal(None::<models::Profile>);
    let stats = create_rw_signal(None::<HealthStats>);
    let form = create_rw_signal(ProfileForm::default());
    let (editing, set_editing) = create_signal(false);
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let reload = move || {
        spawn_local(async move {
            match api::fetch_profile().await {
                Ok(p) => {
                    form.set(ProfileForm::from(&p));
                    profile.set(Some(p));
                }
                Err(e) => state.show_error(&e.form_message("Failed to load profile")),
            }
        });
    };
    reload();

    spawn_local(async move {
        match api::fetch_health_stats().await {
            Ok(s) => stats.set(Some(s)),
            Err(e) => web_sys::console::error_1(&format!("Failed to fetch health stats: {}", e).into()),
        }
    });

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let updated = match form.with(ProfileForm::validate) {
            Ok(updated) => updated,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::update_profile(&updated).await {
                Ok(()) => {
                    profile.set(Some(updated));
                    set_editing.set(false);
                    state.show_success("Profile updated");

                    if let Ok(user) = api::current_user().await {
                        session.refresh_user(user);
                    }
                }
                Err(e) => set_error.set(Some(e.form_message("Failed to update profile"))),
            }
            set_saving.set(false);
        });
    };

    let on_cancel = move |_| {
        set_editing.set(false);
        set_error.set(None);
        reload();
    };

    let navigate = use_navigate();
    let on_logout = move |_| {
        session.sign_out();
        navigate(Screen::PUBLIC_ENTRY.path(), Default::default());
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">"Your Profile"</h1>
                <Show when=move || !editing.get() && profile.with(Option::is_some)>
                    <button
                        on:click=move |_| set_editing.set(true)
                        class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
                    >
                        "Edit Profile"
                    </button>
                </Show>
            </div>

            <div class="grid lg:grid-cols-3 gap-8">
                <div class="lg:col-span-2 bg-white rounded-xl shadow-sm p-6">
                    {move || match (profile.get(), editing.get()) {
                        (None, _) => view! { <Loading /> }.into_view(),
                        (Some(p), false) => view! { <ProfileDetails profile=p /> }.into_view(),
                        (Some(_), true) => view! {
                            <form on:submit=on_save class="space-y-4">
                                <ErrorBanner error=error />

                                <div class="grid md:grid-cols-2 gap-4">
                                    <TextField
                                        label="Name"
                                        required=true
                                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                                        on_input=move |v| form.update(|f| f.name = v)
                                    />
                                    <TextField
                                        label="Email"
                                        kind="email"
                                        required=true
                                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                                        on_input=move |v| form.update(|f| f.email = v)
                                    />
                                    <TextField
                                        label="Phone"
                                        kind="tel"
                                        value=Signal::derive(move || form.with(|f| f.phone.clone()))
                                        on_input=move |v| form.update(|f| f.phone = v)
                                    />
                                    <TextField
                                        label="Age"
                                        kind="number"
                                        value=Signal::derive(move || form.with(|f| f.age.clone()))
                                        on_input=move |v| form.update(|f| f.age = v)
                                    />
                                    <SelectField
                                        label="Gender"
                                        options=GENDERS.iter().map(|g| g.to_string()).collect()
                                        value=Signal::derive(move || form.with(|f| f.gender.clone()))
                                        on_change=move |v| form.update(|f| f.gender = v)
                                        any_label="Prefer not to say"
                                    />
                                    <TextField
                                        label="Emergency contact"
                                        value=Signal::derive(move || form.with(|f| f.emergency_contact.clone()))
                                        on_input=move |v| form.update(|f| f.emergency_contact = v)
                                    />
                                </div>
                                <TextArea
                                    label="Medical history"
                                    value=Signal::derive(move || form.with(|f| f.medical_history.clone()))
                                    on_input=move |v| form.update(|f| f.medical_history = v)
                                />
                                <TextArea
                                    label="Lifestyle"
                                    value=Signal::derive(move || form.with(|f| f.lifestyle.clone()))
                                    on_input=move |v| form.update(|f| f.lifestyle = v)
                                />

                                <div class="flex justify-end space-x-3">
                                    <button
                                        type="button"
                                        on:click=on_cancel
                                        class="px-4 py-2 text-gray-700 hover:bg-gray-100 rounded-lg"
                                    >
                                        "Cancel"
                                    </button>
                                    <button
                                        type="submit"
                                        disabled=move || saving.get()
                                        class="px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded-lg font-medium"
                                    >
                                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                    </button>
                                </div>
                            </form>
                        }
                        .into_view(),
                    }}
                </div>

                <div class="space-y-6">
                    <HealthStatsPanel stats=stats />

                    <button
                        on:click=on_logout
                        class="w-full px-4 py-2 border border-red-300 text-red-700 hover:bg-red-50 rounded-lg font-medium"
                    >
                        "Sign Out"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProfileDetails(profile: models::Profile) -> impl IntoView {
    let rows = [
        ("Name", Some(profile.name)),
        ("Email", Some(profile.email)),
        ("Phone", profile.phone),
        ("Age", profile.age.map(|a| a.to_string())),
        ("Gender", profile.gender),
        ("Emergency contact", profile.emergency_contact),
        ("Medical history", profile.medical_history),
        ("Lifestyle", profile.lifestyle),
    ];

    view! {
        <dl class="grid md:grid-cols-2 gap-x-6 gap-y-4">
            {rows.into_iter().map(|(label, value)| view! {
                <div>
                    <dt class="text-sm text-gray-500">{label}</dt>
                    <dd class="text-gray-900">{value.unwrap_or_else(|| "Not provided".to_string())}</dd>
                </div>
            }).collect_view()}
        </dl>
    }
}

#[component]
fn HealthStatsPanel(stats: RwSignal<Option<HealthStats>>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-sm p-6">
            <h2 class="text-lg font-semibold text-gray-900 mb-4">"Health Stats"</h2>
            {move || match stats.get() {
                None => view! { <Loading /> }.into_view(),
                Some(s) => view! {
                    <dl class="grid grid-cols-2 gap-4">
                        <Stat label="Predictions" value=s.predictions_made.to_string() />
                        <Stat label="Avg. risk" value=format!("{}%", s.avg_risk_score) />
                        <Stat label="Stories shared" value=s.vlogs_shared.to_string() />
                        <Stat label="Community score" value=s.community_score.to_string() />
                    </dl>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-xs text-gray-500">{label}</dt>
            <dd class="text-2xl font-bold text-gray-900">{value}</dd>
        </div>
    }
}
