//! Route Guard
//!
//! Wraps a screen in the session gate: placeholder while the session is
//! resolving, redirect when the route and session disagree. The screen is
//! rebuilt only when the decision changes, not on every session update.

use leptos::*;
use leptos_router::Redirect;

use symptrack::session::{gate, GateDecision, Route, SessionStatus};

use crate::components::Loading;
use crate::state::use_session;

/// Gate decision for `route`, notifying only when it changes
fn decision(status: impl Fn() -> SessionStatus + 'static, route: Route) -> Memo<GateDecision> {
    create_memo(move |_| gate(&status(), route))
}

#[component]
pub fn Guard(route: Route, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let decision = decision(move || session.status(), route);

    move || match decision.get() {
        GateDecision::Render => children().into_view(),
        GateDecision::Placeholder => view! { <Loading /> }.into_view(),
        GateDecision::Redirect(target) => view! { <Redirect path=target.path() /> }.into_view(),
    }
}
