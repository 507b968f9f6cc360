//! Register Page

use leptos::*;
use leptos_router::A;

use symptrack::forms::{RegisterForm, GENDERS};
use symptrack::session::Route as Screen;

use crate::api;
use crate::components::{SelectField, TextField};
use crate::pages::login::{AuthCard, ErrorBanner};
use crate::state::use_session;

#[component]
pub fn Register() -> impl IntoView {
    let session = use_session();

    let form = create_rw_signal(RegisterForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        // Confirmation is checked here and never leaves the browser
        let request = match form.with(RegisterForm::validate) {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_submitting.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::register(&request).await {
                Ok(response) => {
                    if let Err(e) = session.signed_in(response) {
                        set_error.set(Some(e));
                    }
                }
                Err(e) => set_error.set(Some(e.form_message("Registration failed"))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Create your account" subtitle="Start tracking your health with SympTrack">
            <form on:submit=on_submit class="space-y-4">
                <ErrorBanner error=error />

                <TextField
                    label="Full name"
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v| form.update(|f| f.name = v)
                    required=true
                />
                <TextField
                    label="Email"
                    kind="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v| form.update(|f| f.email = v)
                    required=true
                />
                <div class="grid grid-cols-2 gap-4">
                    <TextField
                        label="Password"
                        kind="password"
                        value=Signal::derive(move || form.with(|f| f.password.clone()))
                        on_input=move |v| form.update(|f| f.password = v)
                        required=true
                    />
                    <TextField
                        label="Confirm password"
                        kind="password"
                        value=Signal::derive(move || form.with(|f| f.confirm_password.clone()))
                        on_input=move |v| form.update(|f| f.confirm_password = v)
                        required=true
                    />
                </div>
                <TextField
                    label="Phone"
                    kind="tel"
                    value=Signal::derive(move || form.with(|f| f.phone.clone()))
                    on_input=move |v| form.update(|f| f.phone = v)
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
                        any_label="Prefer not to say"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Creating account..." } else { "Create Account" }}
                </button>
            </form>

            <p class="text-center text-sm text-gray-600 mt-6">
                "Already have an account? "
                <A href=Screen::Login.path() class="text-blue-600 hover:underline">"Sign in"</A>
            </p>
        </AuthCard>
    }
}
