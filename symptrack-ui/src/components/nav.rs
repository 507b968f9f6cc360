//! Navigation Component
//!
//! Header navigation bar with logo, screen links and sign-out.

use leptos::*;
use leptos_router::*;

use symptrack::session::Route as Screen;

use crate::state::use_session;

/// Navigation header component; hidden until a user is signed in
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let sign_out = move |_| {
        session.sign_out();
        navigate(Screen::PUBLIC_ENTRY.path(), Default::default());
    };

    view! {
        <Show when=move || session.status().is_present()>
            <nav class="bg-white shadow-sm border-b border-gray-200">
                <div class="container mx-auto px-4">
                    <div class="flex items-center justify-between h-16">
                        // Logo and brand
                        <A href=Screen::AUTHENTICATED_ENTRY.path() class="flex items-center space-x-2">
                            <span class="text-2xl">"🩺"</span>
                            <span class="text-xl font-bold text-blue-600">"SympTrack"</span>
                        </A>

                        // Navigation links
                        <div class="hidden md:flex items-center space-x-1">
                            {Screen::NAV.into_iter().map(|screen| view! {
                                <NavLink href=screen.path() label=screen.title() />
                            }).collect_view()}
                        </div>

                        <div class="flex items-center space-x-3">
                            <span class="text-sm text-gray-600">
                                {move || session.user().map(|u| u.name).unwrap_or_default()}
                            </span>
                            <button
                                on:click=sign_out.clone()
                                class="px-3 py-2 text-sm text-gray-600 hover:text-red-600 transition-colors"
                            >
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
        </Show>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-600 hover:text-blue-600 hover:bg-blue-50 transition-colors"
            active_class="bg-blue-50 text-blue-600"
        >
            {label}
        </A>
    }
}
