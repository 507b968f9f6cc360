//! Hospital Finder Page
//!
//! Hospitals near the device location, best rated first. Radius and
//! specialty refetch from the backend; the filter box narrows the loaded
//! results locally.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use symptrack::dto::{HospitalQuery, HospitalSearch};
use symptrack::filter::SEARCH_SLOT;
use symptrack::format::{directions_url, miles, tel_link};
use symptrack::models::{by_rating_then_distance, GeoPoint, Hospital, SPECIALTIES};
use symptrack::view::{DisplayState, ListView};

use crate::api;
use crate::components::{ListSkeleton, SelectField, TextField};
use crate::state::ListScreen;

const RADII: [u32; 4] = [5, 10, 25, 50];
const TAGS_SHOWN: usize = 3;

/// Ask the browser for the device position; `on_located` receives the
/// fallback origin when it is unavailable or denied
fn locate(on_located: impl Fn(GeoPoint, bool) + Clone + 'static) {
    let geolocation = window().navigator().geolocation();
    let geolocation = match geolocation {
        Ok(geolocation) => geolocation,
        Err(_) => {
            on_located(GeoPoint::FALLBACK, false);
            return;
        }
    };

    let on_error = on_located.clone();
    let success = wasm_bindgen::closure::Closure::once_into_js(move |position: JsValue| {
        match read_coords(&position) {
            Some(point) => on_located(point, true),
            None => on_located(GeoPoint::FALLBACK, false),
        }
    });
    let failure = wasm_bindgen::closure::Closure::once_into_js(move |_: JsValue| {
        on_error(GeoPoint::FALLBACK, false);
    });

    if geolocation
        .get_current_position_with_error_callback(
            success.unchecked_ref(),
            Some(failure.unchecked_ref()),
        )
        .is_err()
    {
        web_sys::console::error_1(&"Geolocation request failed".into());
    }
}

fn read_coords(position: &JsValue) -> Option<GeoPoint> {
    let coords = js_sys::Reflect::get(position, &"coords".into()).ok()?;
    let latitude = js_sys::Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let longitude = js_sys::Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Some(GeoPoint::new(latitude, longitude))
}

#[component]
pub fn Hospitals() -> impl IntoView {
    let hospitals = ListScreen::new(ListView::<Hospital>::with_order(by_rating_then_distance));

    let origin = create_rw_signal(None::<GeoPoint>);
    let (located, set_located) = create_signal(false);
    let (radius, set_radius) = create_signal(symptrack::dto::DEFAULT_RADIUS_MILES);
    let (specialty, set_specialty) = create_signal(String::new());
    let (query, set_query) = create_signal(String::new());

    locate(move |point, from_device| {
        set_located.set(from_device);
        origin.set(Some(point));
    });

    // Nearby fetch, rerun whenever the origin, radius or specialty changes
    let nearby = hospitals.clone();
    create_effect(move |_| {
        let Some(point) = origin.get() else {
            return;
        };
        let request = HospitalQuery {
            origin: point,
            radius_miles: radius.get(),
            specialty: specialty.get(),
        };
        nearby.load(async move { api::fetch_hospitals(&request).await });
    });

    let searching = hospitals.clone();
    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let point = origin.get_untracked().unwrap_or(GeoPoint::FALLBACK);
        let text = query.get_untracked();

        if text.trim().is_empty() {
            let request = HospitalQuery {
                origin: point,
                radius_miles: radius.get_untracked(),
                specialty: specialty.get_untracked(),
            };
            searching.load(async move { api::fetch_hospitals(&request).await });
        } else {
            let search = HospitalSearch { text, origin: point };
            searching.load(async move { api::search_hospitals(&search).await });
        }
    };

    let filter_list = hospitals.clone();
    let list = hospitals.clone();

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Find Hospitals"</h1>
                <p class="text-gray-600 mt-1">
                    {move || if located.get() {
                        "Showing hospitals near your location"
                    } else {
                        "Location unavailable; showing hospitals near New York City"
                    }}
                </p>
            </div>

            <div class="bg-white rounded-xl shadow-sm p-4 space-y-4">
                <form on:submit=on_search class="flex space-x-2">
                    <input
                        type="text"
                        placeholder="Search by name, service or condition..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        class="flex-1 px-3 py-2 border border-gray-300 rounded-lg"
                    />
                    <button
                        type="submit"
                        class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
                    >
                        "Search"
                    </button>
                </form>

                <div class="grid md:grid-cols-3 gap-4">
                    <label class="block">
                        <span class="block text-sm font-medium text-gray-700 mb-1">"Radius"</span>
                        <select
                            on:change=move |ev| {
                                if let Ok(miles) = event_target_value(&ev).parse() {
                                    set_radius.set(miles);
                                }
                            }
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg"
                        >
                            {RADII.iter().map(|r| {
                                let r = *r;
                                view! {
                                    <option value=r.to_string() selected=move || radius.get() == r>
                                        {format!("{} miles", r)}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </label>
                    <SelectField
                        label="Specialty"
                        options=SPECIALTIES.iter().map(|s| s.to_string()).collect()
                        value=specialty
                        on_change=move |v| set_specialty.set(v)
                        any_label="All Specialties"
                    />
                    <TextField
                        label="Filter results"
                        placeholder="Name, address or type"
                        value=Signal::derive({
                            let hospitals = hospitals.clone();
                            move || hospitals.filter_value(SEARCH_SLOT)
                        })
                        on_input=move |v| filter_list.set_search(v)
                    />
                </div>
            </div>

            {move || match list.display_state() {
                DisplayState::Loading => view! { <ListSkeleton count=4 /> }.into_view(),
                DisplayState::NoResults => view! {
                    <div class="text-center py-12 bg-white rounded-xl shadow-sm">
                        <p class="text-gray-500">"No hospitals found"</p>
                    </div>
                }
                .into_view(),
                DisplayState::Items => view! {
                    <div class="grid md:grid-cols-2 gap-6">
                        {list.visible().into_iter().map(|hospital| view! {
                            <HospitalCard hospital=hospital />
                        }).collect_view()}
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn HospitalCard(hospital: Hospital) -> impl IntoView {
    let tags: Vec<String> = hospital
        .type_tags(TAGS_SHOWN)
        .into_iter()
        .map(str::to_string)
        .collect();

    view! {
        <article class="bg-white rounded-xl shadow-sm p-6 space-y-3">
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="text-lg font-semibold text-gray-900">{hospital.name.clone()}</h3>
                    <p class="text-sm text-gray-600">{hospital.address.clone()}</p>
                </div>
                {hospital.is_open_24h().then(|| view! {
                    <span class="px-2 py-1 text-xs font-medium rounded-full bg-green-100 text-green-800">
                        "Open 24h"
                    </span>
                })}
            </div>

            <div class="flex items-center space-x-4 text-sm text-gray-600">
                {hospital.rating.map(|rating| view! {
                    <span>
                        {format!("⭐ {:.1}", rating)}
                        {hospital.reviews_count.map(|n| format!(" ({} reviews)", n))}
                    </span>
                })}
                {hospital.distance.map(|d| view! { <span>{miles(d)}</span> })}
            </div>

            <div class="flex flex-wrap gap-2">
                {tags.into_iter().map(|tag| view! {
                    <span class="px-2 py-1 text-xs rounded bg-gray-100 text-gray-700">{tag}</span>
                }).collect_view()}
            </div>

            <div class="flex space-x-3 pt-3 border-t border-gray-100 text-sm font-medium">
                {hospital.phone.clone().map(|phone| view! {
                    <a href=tel_link(&phone) class="text-blue-600 hover:text-blue-800">"📞 Call"</a>
                })}
                <a
                    href=directions_url(hospital.location())
                    target="_blank"
                    rel="noopener noreferrer"
                    class="text-blue-600 hover:text-blue-800"
                >
                    "🧭 Directions"
                </a>
                {hospital.website.clone().map(|url| view! {
                    <a href=url target="_blank" rel="noopener noreferrer" class="text-blue-600 hover:text-blue-800">
                        "🌐 Website"
                    </a>
                })}
            </div>
        </article>
    }
}
