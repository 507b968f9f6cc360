//! Patient Stories Page
//!
//! Story feed with search and disease filter, likes, lazily loaded comments
//! and a modal for sharing a new story.

use leptos::*;

use symptrack::filter::SEARCH_SLOT;
use symptrack::format::{compact_count, time_ago_str};
use symptrack::forms::{validate_comment, NewVlogForm};
use symptrack::models::{Comment, Vlog, DISEASES};
use symptrack::view::{DisplayState, ListView};

use crate::api;
use crate::components::{ListSkeleton, SelectField, TextArea, TextField};
use crate::pages::login::ErrorBanner;
use crate::state::{GlobalState, ListScreen};

#[component]
pub fn Vlogs() -> impl IntoView {
    let vlogs = ListScreen::new(ListView::<Vlog>::new());
    vlogs.load(api::fetch_vlogs());

    let (show_create, set_show_create) = create_signal(false);

    let reload = {
        let vlogs = vlogs.clone();
        Callback::new(move |_: ()| vlogs.load(api::fetch_vlogs()))
    };

    let search_list = vlogs.clone();
    let disease_list = vlogs.clone();
    let list = vlogs.clone();

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-gray-900">"Patient Stories"</h1>
                    <p class="text-gray-600 mt-1">"Real recovery journeys shared by the community"</p>
                </div>

                <button
                    on:click=move |_| set_show_create.set(true)
                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
                >
                    "+ Share Your Story"
                </button>
            </div>

            // Filters
            <div class="bg-white rounded-xl shadow-sm p-4 grid md:grid-cols-2 gap-4">
                <TextField
                    label="Search"
                    placeholder="Search stories..."
                    value=Signal::derive({
                        let vlogs = vlogs.clone();
                        move || vlogs.filter_value(SEARCH_SLOT)
                    })
                    on_input=move |v| search_list.set_search(v)
                />
                <SelectField
                    label="Condition"
                    options=DISEASES.iter().map(|d| d.to_string()).collect()
                    value=Signal::derive({
                        let vlogs = vlogs.clone();
                        move || vlogs.filter_value("disease")
                    })
                    on_change=move |v| disease_list.set_filter("disease", v)
                    any_label="All Conditions"
                />
            </div>

            {move || match list.display_state() {
                DisplayState::Loading => view! { <ListSkeleton count=3 /> }.into_view(),
                DisplayState::NoResults => view! {
                    <div class="text-center py-12 bg-white rounded-xl shadow-sm">
                        <p class="text-gray-500">"No stories found"</p>
                    </div>
                }
                .into_view(),
                DisplayState::Items => view! {
                    <div class="grid md:grid-cols-2 gap-6">
                        {list.visible().into_iter().map(|vlog| view! {
                            <VlogCard vlog=vlog on_liked=reload />
                        }).collect_view()}
                    </div>
                }
                .into_view(),
            }}

            {move || show_create.get().then(|| view! {
                <CreateVlogModal
                    on_close=move || set_show_create.set(false)
                    on_created=reload
                />
            })}
        </div>
    }
}

#[component]
fn VlogCard(vlog: Vlog, on_liked: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let comments = create_rw_signal(None::<Vec<Comment>>);
    let (show_comments, set_show_comments) = create_signal(false);
    let (draft, set_draft) = create_signal(String::new());

    let id = vlog.id.clone();

    let id_for_like = id.clone();
    let like = move |_| {
        let id = id_for_like.clone();
        spawn_local(async move {
            match api::like_vlog(&id).await {
                Ok(()) => on_liked.call(()),
                Err(e) => state.show_error(&e.form_message("Failed to like story")),
            }
        });
    };

    // Comments are fetched on first open only
    let id_for_toggle = id.clone();
    let toggle_comments = move |_| {
        let opening = !show_comments.get();
        set_show_comments.set(opening);

        if opening && comments.with(Option::is_none) {
            let id = id_for_toggle.clone();
            spawn_local(async move {
                match api::fetch_comments(&id).await {
                    Ok(list) => comments.set(Some(list)),
                    Err(e) => {
                        web_sys::console::error_1(&format!("Failed to fetch comments: {}", e).into());
                        comments.set(Some(Vec::new()));
                    }
                }
            });
        }
    };

    let id_for_submit = id;
    let submit_comment = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let comment = match validate_comment(&id_for_submit, &draft.get()) {
            Ok(comment) => comment,
            Err(_) => return,
        };

        spawn_local(async move {
            match api::add_comment(&comment).await {
                Ok(()) => {
                    set_draft.set(String::new());
                    match api::fetch_comments(&comment.vlog_id).await {
                        Ok(list) => comments.set(Some(list)),
                        Err(e) => web_sys::console::error_1(&format!("Failed to fetch comments: {}", e).into()),
                    }
                }
                Err(e) => state.show_error(&e.form_message("Failed to add comment")),
            }
        });
    };

    let now = chrono::Utc::now();

    view! {
        <article class="bg-white rounded-xl shadow-sm overflow-hidden">
            {vlog.video_url.clone().map(|url| view! {
                <video src=url controls=true class="w-full h-48 bg-black object-cover" />
            })}

            <div class="p-6 space-y-3">
                <div class="flex items-center justify-between">
                    <span class="px-2 py-1 text-xs font-medium rounded-full bg-blue-100 text-blue-800">
                        {vlog.disease.clone()}
                    </span>
                    <span class="text-xs text-gray-500">{time_ago_str(vlog.created_at.as_deref(), now)}</span>
                </div>

                <h3 class="text-lg font-semibold text-gray-900">{vlog.title.clone()}</h3>
                <p class="text-gray-600 text-sm">{vlog.description.clone()}</p>

                <div class="text-sm text-gray-600 space-y-1">
                    {vlog.medicines.clone().map(|m| view! { <p>"💊 "{m}</p> })}
                    {vlog.hospitals.clone().map(|h| view! { <p>"🏥 "{h}</p> })}
                    {vlog.recovery_timeline.clone().map(|t| view! { <p>"⏱ "{t}</p> })}
                </div>

                <div class="flex items-center justify-between pt-3 border-t border-gray-100">
                    <span class="text-sm text-gray-500">"by "{vlog.author_name.clone()}</span>
                    <div class="flex items-center space-x-4">
                        <button on:click=like class="text-sm text-gray-600 hover:text-red-600">
                            {format!("❤️ {}", compact_count(vlog.likes))}
                        </button>
                        <button on:click=toggle_comments class="text-sm text-gray-600 hover:text-blue-600">
                            {format!("💬 {}", compact_count(vlog.comments))}
                        </button>
                    </div>
                </div>

                <Show when=move || show_comments.get()>
                    <div class="pt-3 space-y-3">
                        {move || match comments.get() {
                            None => view! { <p class="text-sm text-gray-500">"Loading comments..."</p> }.into_view(),
                            Some(list) if list.is_empty() => view! {
                                <p class="text-sm text-gray-500">"No comments yet"</p>
                            }
                            .into_view(),
                            Some(list) => list.into_iter().map(|c| view! {
                                <div class="bg-gray-50 rounded-lg p-3">
                                    <p class="text-xs font-medium text-gray-900">{c.username}</p>
                                    <p class="text-sm text-gray-700">{c.comment_text}</p>
                                </div>
                            }).collect_view(),
                        }}

                        <form on:submit=submit_comment.clone() class="flex space-x-2">
                            <input
                                type="text"
                                placeholder="Add a comment..."
                                prop:value=move || draft.get()
                                on:input=move |ev| set_draft.set(event_target_value(&ev))
                                class="flex-1 px-3 py-2 border border-gray-300 rounded-lg text-sm"
                            />
                            <button
                                type="submit"
                                disabled=move || draft.get().trim().is_empty()
                                class="px-4 py-2 bg-blue-600 disabled:bg-blue-300 text-white rounded-lg text-sm"
                            >
                                "Post"
                            </button>
                        </form>
                    </div>
                </Show>
            </div>
        </article>
    }
}

#[component]
fn CreateVlogModal(
    on_close: impl Fn() + 'static + Clone,
    on_created: Callback<()>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let form = create_rw_signal(NewVlogForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_close_for_submit = on_close.clone();
    let on_close_for_cancel = on_close;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let vlog = match form.with(NewVlogForm::validate) {
            Ok(vlog) => vlog,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_submitting.set(true);
        set_error.set(None);

        let on_close = on_close_for_submit.clone();
        spawn_local(async move {
            match api::create_vlog(&vlog).await {
                Ok(()) => {
                    state.show_success("Story shared");
                    on_created.call(());
                    on_close();
                }
                Err(e) => set_error.set(Some(e.form_message("Failed to share story"))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-40 p-4">
            <div class="bg-white rounded-xl shadow-xl w-full max-w-lg max-h-[90vh] overflow-y-auto p-6">
                <h2 class="text-xl font-semibold mb-4">"Share Your Story"</h2>

                <form on:submit=on_submit class="space-y-4">
                    <ErrorBanner error=error />

                    <TextField
                        label="Title"
                        required=true
                        value=Signal::derive(move || form.with(|f| f.title.clone()))
                        on_input=move |v| form.update(|f| f.title = v)
                    />
                    <TextArea
                        label="Your story *"
                        rows=4
                        value=Signal::derive(move || form.with(|f| f.description.clone()))
                        on_input=move |v| form.update(|f| f.description = v)
                    />
                    <SelectField
                        label="Condition *"
                        options=DISEASES.iter().map(|d| d.to_string()).collect()
                        value=Signal::derive(move || form.with(|f| f.disease.clone()))
                        on_change=move |v| form.update(|f| f.disease = v)
                        any_label="Select a condition"
                    />
                    <TextField
                        label="Medicines used"
                        value=Signal::derive(move || form.with(|f| f.medicines.clone()))
                        on_input=move |v| form.update(|f| f.medicines = v)
                    />
                    <TextField
                        label="Hospital visited"
                        value=Signal::derive(move || form.with(|f| f.hospitals.clone()))
                        on_input=move |v| form.update(|f| f.hospitals = v)
                    />
                    <TextField
                        label="Recovery timeline"
                        placeholder="e.g. 2 weeks"
                        value=Signal::derive(move || form.with(|f| f.recovery_timeline.clone()))
                        on_input=move |v| form.update(|f| f.recovery_timeline = v)
                    />
                    <TextField
                        label="Video URL"
                        kind="url"
                        value=Signal::derive(move || form.with(|f| f.video_url.clone()))
                        on_input=move |v| form.update(|f| f.video_url = v)
                    />

                    <div class="flex justify-end space-x-3 pt-2">
                        <button
                            type="button"
                            on:click=move |_| on_close_for_cancel()
                            class="px-4 py-2 text-gray-700 hover:bg-gray-100 rounded-lg"
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white rounded-lg font-medium"
                        >
                            {move || if submitting.get() { "Sharing..." } else { "Share Story" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
