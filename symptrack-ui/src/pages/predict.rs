//! Symptom Predictor Page
//!
//! Symptom form, analysis result and the latest prediction history.

use leptos::*;

use symptrack::format::{short_date, MEDICAL_DISCLAIMER};
use symptrack::forms::{PredictionForm, GENDERS};
use symptrack::models::{Prediction, PredictionHistoryEntry};
use symptrack::view::{DisplayState, ListView};
use symptrack::RiskLevel;

use crate::api;
use crate::components::{ListSkeleton, RiskBadge, SelectField, TextArea, TextField};
use crate::pages::login::ErrorBanner;
use crate::state::ListScreen;

const HISTORY_SHOWN: usize = 5;

#[component]
pub fn Predict() -> impl IntoView {
    let form = create_rw_signal(PredictionForm::default());
    let result = create_rw_signal(None::<Prediction>);
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let history = ListScreen::new(ListView::<PredictionHistoryEntry>::new());
    history.load(api::fetch_prediction_history());

    let history_for_submit = history.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = match form.with(PredictionForm::validate) {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_submitting.set(true);
        set_error.set(None);

        let history = history_for_submit.clone();
        spawn_local(async move {
            match api::predict(&request).await {
                Ok(prediction) => {
                    result.set(Some(prediction));
                    history.load(api::fetch_prediction_history());
                }
                Err(e) => set_error.set(Some(e.form_message("Failed to analyze symptoms"))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Symptom Checker"</h1>
                <p class="text-gray-600 mt-1">"Describe how you feel and get an AI-assisted risk assessment"</p>
            </div>

            <div class="grid lg:grid-cols-3 gap-8">
                <div class="lg:col-span-2 space-y-8">
                    <form on:submit=on_submit class="bg-white rounded-xl shadow-sm p-6 space-y-4">
                        <ErrorBanner error=error />

                        <TextArea
                            label="Symptoms *"
                            placeholder="e.g. headache, fever and a sore throat for two days"
                            rows=4
                            value=Signal::derive(move || form.with(|f| f.symptoms.clone()))
                            on_input=move |v| form.update(|f| f.symptoms = v)
                        />
                        <div class="grid grid-cols-2 gap-4">
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
                                any_label="Select"
                            />
                        </div>
                        <TextField
                            label="Lifestyle"
                            placeholder="e.g. sedentary, smoker, active"
                            value=Signal::derive(move || form.with(|f| f.lifestyle.clone()))
                            on_input=move |v| form.update(|f| f.lifestyle = v)
                        />
                        <TextArea
                            label="Medical history"
                            value=Signal::derive(move || form.with(|f| f.medical_history.clone()))
                            on_input=move |v| form.update(|f| f.medical_history = v)
                        />

                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded-lg font-medium transition-colors"
                        >
                            {move || if submitting.get() { "Analyzing..." } else { "Analyze Symptoms" }}
                        </button>
                    </form>

                    {move || result.get().map(|prediction| view! { <PredictionResult prediction=prediction /> })}
                </div>

                <aside class="bg-white rounded-xl shadow-sm p-6 h-fit">
                    <h2 class="text-lg font-semibold mb-4">"Recent Predictions"</h2>
                    <HistoryList history=history />
                </aside>
            </div>
        </div>
    }
}

#[component]
fn PredictionResult(prediction: Prediction) -> impl IntoView {
    let score = prediction.display_risk_score();
    let bar = RiskLevel::for_score_bar(f64::from(score)).style().fill;
    let level = prediction.overall_level();

    view! {
        <section class="bg-white rounded-xl shadow-sm p-6 space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">"Analysis Result"</h2>
                <RiskBadge level=level />
            </div>

            <div>
                <div class="flex justify-between text-sm mb-1">
                    <span class="text-gray-700">"Risk Score"</span>
                    <span class="font-medium">{format!("{}/100", score)}</span>
                </div>
                <div class="w-full bg-gray-200 rounded-full h-3">
                    <div class=format!("h-3 rounded-full {}", bar) style=format!("width: {}%", score.min(100)) />
                </div>
            </div>

            <div>
                <h3 class="font-medium text-gray-900 mb-3">"Possible Conditions"</h3>
                {if prediction.conditions.is_empty() {
                    view! { <p class="text-gray-500 text-sm">"No specific conditions identified"</p> }.into_view()
                } else {
                    prediction.conditions.iter().map(|condition| view! {
                        <div class="flex items-center justify-between py-2 border-b border-gray-100 last:border-0">
                            <span class="text-gray-900">{condition.name.clone()}</span>
                            <div class="flex items-center space-x-3">
                                <span class="text-sm text-gray-600">{format!("{:.0}%", condition.probability)}</span>
                                <RiskBadge level=condition.risk_level />
                            </div>
                        </div>
                    }).collect_view()
                }}
            </div>

            {(!prediction.recommendations.is_empty()).then(|| view! {
                <div>
                    <h3 class="font-medium text-gray-900 mb-3">"Recommendations"</h3>
                    <ul class="list-disc list-inside space-y-1 text-gray-700">
                        {prediction.recommendations.iter().map(|r| view! { <li>{r.clone()}</li> }).collect_view()}
                    </ul>
                </div>
            })}

            <p class="text-xs text-gray-500 bg-yellow-50 border border-yellow-200 rounded-lg p-3">
                {MEDICAL_DISCLAIMER}
            </p>
        </section>
    }
}

#[component]
fn HistoryList(history: ListScreen<PredictionHistoryEntry>) -> impl IntoView {
    move || match history.display_state() {
        DisplayState::Loading => view! { <ListSkeleton count=3 /> }.into_view(),
        DisplayState::NoResults => view! {
            <p class="text-gray-500 text-sm">"No predictions yet"</p>
        }
        .into_view(),
        DisplayState::Items => history
            .visible()
            .into_iter()
            .take(HISTORY_SHOWN)
            .map(|entry| view! {
                <div class="py-3 border-b border-gray-100 last:border-0">
                    <p class="text-sm text-gray-900 line-clamp-2">{entry.symptoms}</p>
                    <div class="flex items-center justify-between mt-1">
                        <span class="text-xs text-gray-500">{short_date(entry.created_at.as_deref())}</span>
                        {entry.risk_level.map(|level| view! { <RiskBadge level=level /> })}
                    </div>
                </div>
            })
            .collect_view(),
    }
}
