//! Login Page

use leptos::*;
use leptos_router::A;

use symptrack::forms::LoginForm;
use symptrack::session::Route as Screen;

use crate::api;
use crate::components::TextField;
use crate::state::use_session;

/// Email and password sign-in. Once the session is present the route
/// guard moves on to the dashboard.
#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm {
            email: email.get(),
            password: password.get(),
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_submitting.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::login(&request).await {
                Ok(response) => {
                    if let Err(e) = session.signed_in(response) {
                        set_error.set(Some(e));
                    }
                }
                Err(e) => set_error.set(Some(e.form_message("Login failed"))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Welcome back" subtitle="Sign in to your SympTrack account">
            <form on:submit=on_submit class="space-y-4">
                <ErrorBanner error=error />

                <TextField label="Email" kind="email" value=email on_input=move |v| set_email.set(v) required=true />
                <TextField label="Password" kind="password" value=password on_input=move |v| set_password.set(v) required=true />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>

            <p class="text-center text-sm text-gray-600 mt-6">
                "Don't have an account? "
                <A href=Screen::Register.path() class="text-blue-600 hover:underline">"Sign up"</A>
            </p>

            <ServerSettings />
        </AuthCard>
    }
}

/// Backend URL override, kept in local storage
#[component]
fn ServerSettings() -> impl IntoView {
    let (url, set_url) = create_signal(api::get_api_base());
    let (saved, set_saved) = create_signal(false);

    let on_save = move |_| {
        let value = url.get();
        let value = value.trim();
        if value.is_empty() {
            api::set_api_base(api::DEFAULT_API_BASE);
            set_url.set(api::DEFAULT_API_BASE.to_string());
        } else {
            api::set_api_base(value);
        }
        set_saved.set(true);
    };

    view! {
        <details class="mt-6 text-sm">
            <summary class="cursor-pointer text-gray-500">"Server settings"</summary>
            <div class="mt-3 flex space-x-2">
                <input
                    type="url"
                    prop:value=move || url.get()
                    on:input=move |ev| {
                        set_saved.set(false);
                        set_url.set(event_target_value(&ev));
                    }
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-lg"
                />
                <button
                    type="button"
                    on:click=on_save
                    class="px-3 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg"
                >
                    {move || if saved.get() { "Saved" } else { "Save" }}
                </button>
            </div>
        </details>
    }
}

/// Centered card shared by the sign-in and sign-up screens
#[component]
pub fn AuthCard(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-[80vh] flex items-center justify-center">
            <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-8">
                <div class="text-center mb-8">
                    <div class="text-4xl mb-2">"🩺"</div>
                    <h1 class="text-2xl font-bold text-gray-900">{title}</h1>
                    <p class="text-gray-600 mt-1">{subtitle}</p>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Inline form error
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| view! {
            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-lg text-sm">
                {message}
            </div>
        })
    }
}
