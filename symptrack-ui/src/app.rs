//! App Root Component
//!
//! Main application component with routing and global providers. Every
//! screen sits behind the session gate.

use leptos::*;
use leptos_router::*;

use symptrack::session::Route as Screen;

use crate::components::{Guard, Loading, Nav, Toast};
use crate::pages::{Alerts, Dashboard, Hospitals, Login, Predict, Profile, Register, Vlogs};
use crate::state::{provide_global_state, provide_session, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    // Resolve any persisted session before the first gated render
    provide_session();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                // Navigation header, only once signed in
                <Nav />

                // Page-level fetch in flight
                {move || state.loading.get().then(|| view! {
                    <div class="h-1 bg-blue-600 animate-pulse" />
                })}

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=|| view! { <Guard route=Screen::Root><Loading /></Guard> } />
                        <Route path="/login" view=|| view! { <Guard route=Screen::Login><Login /></Guard> } />
                        <Route path="/register" view=|| view! { <Guard route=Screen::Register><Register /></Guard> } />
                        <Route path="/dashboard" view=|| view! { <Guard route=Screen::Dashboard><Dashboard /></Guard> } />
                        <Route path="/predict" view=|| view! { <Guard route=Screen::Predict><Predict /></Guard> } />
                        <Route path="/vlogs" view=|| view! { <Guard route=Screen::Vlogs><Vlogs /></Guard> } />
                        <Route path="/alerts" view=|| view! { <Guard route=Screen::Alerts><Alerts /></Guard> } />
                        <Route path="/hospitals" view=|| view! { <Guard route=Screen::Hospitals><Hospitals /></Guard> } />
                        <Route path="/profile" view=|| view! { <Guard route=Screen::Profile><Profile /></Guard> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=Screen::Root.path()
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
