//! Severity and risk badges, styled from the core lookup tables

use leptos::*;

use symptrack::{RiskLevel, Severity};

#[component]
pub fn SeverityBadge(severity: Severity) -> impl IntoView {
    let style = severity.style();

    view! {
        <span class=format!("px-2 py-1 text-xs font-medium rounded-full border {}", style.badge)>
            {style.label}
        </span>
    }
}

#[component]
pub fn RiskBadge(level: RiskLevel) -> impl IntoView {
    let style = level.style();

    view! {
        <span class=format!("px-2 py-1 text-xs font-medium rounded-full {}", style.badge)>
            {style.label}
        </span>
    }
}
