//! Chart Components
//!
//! Horizontal and vertical bars drawn with utility classes; no canvas.

use leptos::*;

use symptrack::RiskLevel;

/// Vertical bar chart over labelled values in `0..=max`
#[component]
pub fn BarChart(
    points: Vec<(String, f64)>,
    #[prop(default = 100.0)]
    max: f64,
) -> impl IntoView {
    if points.is_empty() {
        return view! {
            <p class="text-gray-500 text-sm py-8 text-center">"No trend data yet"</p>
        }
        .into_view();
    }

    view! {
        <div class="flex items-end justify-between h-48 gap-2">
            {points.into_iter().map(|(label, value)| {
                let height = (value / max).clamp(0.0, 1.0) * 100.0;
                let fill = RiskLevel::for_score_bar(value).style().fill;
                view! {
                    <div class="flex-1 flex flex-col items-center justify-end h-full">
                        <span class="text-xs text-gray-600 mb-1">{format!("{:.0}", value)}</span>
                        <div
                            class=format!("w-full rounded-t {}", fill)
                            style=format!("height: {:.1}%", height)
                        />
                        <span class="text-xs text-gray-500 mt-2 truncate">{label}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
    .into_view()
}

/// Horizontal bar for a 0-100 score, coloured by band
#[component]
pub fn ScoreBar(
    #[prop(into)]
    label: String,
    value: f64,
) -> impl IntoView {
    let fill = RiskLevel::for_score_bar(value).style().fill;
    let width = value.clamp(0.0, 100.0);

    view! {
        <div>
            <div class="flex justify-between text-sm mb-1">
                <span class="text-gray-700 capitalize">{label}</span>
                <span class="text-gray-500">{format!("{:.0}%", value)}</span>
            </div>
            <div class="w-full bg-gray-200 rounded-full h-2">
                <div
                    class=format!("h-2 rounded-full {}", fill)
                    style=format!("width: {:.1}%", width)
                />
            </div>
        </div>
    }
}
