//! Dashboard Page
//!
//! Greeting, risk score, activity counts, health trend chart, recent
//! predictions and community alerts, plus the detailed risk analysis.

use leptos::*;
use leptos_router::A;

use symptrack::format::{short_date, time_ago_str};
use symptrack::models::{DashboardSummary, RiskAnalysis};
use symptrack::session::Route as Screen;
use symptrack::RiskLevel;

use crate::api;
use crate::components::{BarChart, Loading, RiskBadge, ScoreBar, SeverityBadge};
use crate::state::{use_session, GlobalState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_session();

    let summary = create_rw_signal(None::<DashboardSummary>);
    let analysis = create_rw_signal(None::<RiskAnalysis>);

    // Fetch initial data on mount
    create_effect(move |_| {
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_dashboard().await {
                Ok(data) => summary.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch dashboard: {}", e).into());
                    summary.set(Some(DashboardSummary::default()));
                }
            }

            match api::fetch_risk_analysis().await {
                Ok(data) => analysis.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch risk analysis: {}", e).into());
                }
            }

            state.loading.set(false);
        });
    });

    let greeting = move || {
        session
            .user()
            .map(|u| format!("Welcome back, {}!", u.first_name()))
            .unwrap_or_else(|| "Welcome back!".to_string())
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold text-gray-900">{greeting}</h1>
                <p class="text-gray-600 mt-1">"Here's an overview of your health"</p>
            </div>

            {move || match summary.get() {
                None => view! { <Loading /> }.into_view(),
                Some(data) => view! { <SummaryPanels summary=data /> }.into_view(),
            }}

            {move || analysis.get().map(|data| view! { <RiskAnalysisPanel analysis=data /> })}

            <QuickLinks />
        </div>
    }
}

#[component]
fn SummaryPanels(summary: DashboardSummary) -> impl IntoView {
    let level = summary.risk_level();
    let trends: Vec<(String, f64)> = summary
        .health_trends
        .iter()
        .map(|p| (p.label.clone(), p.score))
        .collect();

    view! {
        // Stat cards
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <StatCard label="Risk Score" icon="❤️">
                <div class="flex items-center space-x-2">
                    <span class="text-3xl font-bold">
                        {summary.risk_score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())}
                    </span>
                    {level.map(|level| view! { <RiskBadge level=level /> })}
                </div>
            </StatCard>
            <StatCard label="Predictions" icon="🧠">
                <span class="text-3xl font-bold">{summary.prediction_count}</span>
            </StatCard>
            <StatCard label="Active Alerts" icon="⚠️">
                <span class="text-3xl font-bold">{summary.alerts_count}</span>
            </StatCard>
        </div>

        // Trend chart
        <section class="bg-white rounded-xl shadow-sm p-6">
            <h2 class="text-xl font-semibold mb-4">"Health Trends"</h2>
            <BarChart points=trends />
        </section>

        <div class="grid md:grid-cols-2 gap-8">
            // Recent predictions
            <section class="bg-white rounded-xl shadow-sm p-6">
                <h2 class="text-xl font-semibold mb-4">"Recent Predictions"</h2>
                {if summary.recent_predictions.is_empty() {
                    view! { <p class="text-gray-500 text-sm">"No predictions yet"</p> }.into_view()
                } else {
                    summary.recent_predictions.iter().take(5).map(|entry| view! {
                        <div class="flex items-center justify-between py-2 border-b border-gray-100 last:border-0">
                            <div>
                                <p class="text-sm text-gray-900 truncate">{entry.symptoms.clone()}</p>
                                <p class="text-xs text-gray-500">{short_date(entry.created_at.as_deref())}</p>
                            </div>
                            {entry.risk_level.map(|level| view! { <RiskBadge level=level /> })}
                        </div>
                    }).collect_view()
                }}
            </section>

            // Community alerts
            <section class="bg-white rounded-xl shadow-sm p-6">
                <h2 class="text-xl font-semibold mb-4">"Community Alerts"</h2>
                {if summary.community_alerts.is_empty() {
                    view! { <p class="text-gray-500 text-sm">"No alerts in your area"</p> }.into_view()
                } else {
                    let now = chrono::Utc::now();
                    summary.community_alerts.iter().take(3).map(|alert| view! {
                        <div class="py-2 border-b border-gray-100 last:border-0">
                            <div class="flex items-center justify-between">
                                <p class="text-sm font-medium text-gray-900">{alert.title.clone()}</p>
                                <SeverityBadge severity=alert.severity />
                            </div>
                            <p class="text-xs text-gray-500">{time_ago_str(alert.created_at.as_deref(), now)}</p>
                        </div>
                    }).collect_view()
                }}
            </section>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, icon: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-sm p-6">
            <div class="flex items-center justify-between mb-2">
                <span class="text-sm text-gray-600">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            {children()}
        </div>
    }
}

/// Risk meter, factor breakdown, category risks and long-range outlook
#[component]
fn RiskAnalysisPanel(analysis: RiskAnalysis) -> impl IntoView {
    let level = analysis.level();
    let score = analysis.current_risk_score;
    let style = level.style();

    view! {
        <section class="bg-white rounded-xl shadow-sm p-6 space-y-6">
            <h2 class="text-xl font-semibold">"Risk Analysis"</h2>

            // Meter
            <div class="flex items-center space-x-6">
                <div class=format!("w-24 h-24 rounded-full flex items-center justify-center {}", style.icon_bg)>
                    <span class=format!("text-3xl font-bold {}", style.icon)>{format!("{:.0}", score)}</span>
                </div>
                <div>
                    <p class=format!("text-lg font-semibold {}", style.icon)>{level.meter_caption()}</p>
                    {analysis.top_category().map(|c| view! {
                        <p class="text-sm text-gray-600">"Highest category: "{c.name.clone()}</p>
                    })}
                </div>
            </div>

            <div class="grid md:grid-cols-2 gap-8">
                <div class="space-y-3">
                    <h3 class="font-medium text-gray-900">"Risk Factors"</h3>
                    {analysis.risk_factors.iter().map(|(name, value)| view! {
                        <ScoreBar label=name.replace('_', " ") value=*value />
                    }).collect_view()}
                </div>

                <div class="space-y-3">
                    <h3 class="font-medium text-gray-900">"Health Categories"</h3>
                    {analysis.health_categories.iter().map(|category| view! {
                        <ScoreBar label=category.name.clone() value=category.risk />
                    }).collect_view()}
                </div>
            </div>

            {(!analysis.predictions.is_empty()).then(|| view! {
                <div>
                    <h3 class="font-medium text-gray-900 mb-3">"Long-range Outlook"</h3>
                    <div class="grid md:grid-cols-3 gap-4">
                        {analysis.predictions.iter().map(|p| {
                            let band: RiskLevel = p.band();
                            view! {
                                <div class="border border-gray-200 rounded-lg p-4">
                                    <div class="flex items-center justify-between mb-2">
                                        <span class="font-medium">{p.condition.clone()}</span>
                                        <RiskBadge level=band />
                                    </div>
                                    <p class="text-2xl font-bold">{format!("{:.1}%", p.probability)}</p>
                                    <p class="text-xs text-gray-500">{p.timeline.clone()}</p>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </div>
            })}
        </section>
    }
}

#[component]
fn QuickLinks() -> impl IntoView {
    let links = [
        (Screen::Predict, "🧠", "Check symptoms"),
        (Screen::Alerts, "⚠️", "View alerts"),
        (Screen::Hospitals, "🏥", "Find hospitals"),
        (Screen::Vlogs, "🎥", "Patient stories"),
    ];

    view! {
        <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {links.into_iter().map(|(screen, icon, label)| view! {
                <A
                    href=screen.path()
                    class="bg-white rounded-xl shadow-sm p-4 text-center hover:shadow-md transition-shadow"
                >
                    <div class="text-2xl mb-2">{icon}</div>
                    <div class="text-sm font-medium text-gray-700">{label}</div>
                </A>
            }).collect_view()}
        </section>
    }
}
