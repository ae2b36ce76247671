//! Editing the logged-in user's profile

use super::{error_banner, input_value};
use vyshivka_frontend_common::error_messages::session_error;
use vyshivka_frontend_common::use_session;
use vyshivka_http::types::{ProfileUpdate, UserUpdate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Default, PartialEq)]
struct ProfileForm {
    bio: String,
    location: String,
    social_telegram: String,
    social_vk: String,
}

impl ProfileForm {
    fn into_update(self) -> UserUpdate {
        UserUpdate {
            profile: Some(ProfileUpdate {
                bio: Some(self.bio),
                location: Some(self.location),
                social_telegram: Some(self.social_telegram),
                social_vk: Some(self.social_vk),
            }),
            ..Default::default()
        }
    }
}

#[function_component(ProfileEditPage)]
pub fn profile_edit_page() -> Html {
    let session = use_session();
    let form = {
        let user = session.user().cloned();
        use_state(move || {
            user.map(|user| ProfileForm {
                bio: user.profile.bio,
                location: user.profile.location,
                social_telegram: user.profile.social_telegram,
                social_vk: user.profile.social_vk,
            })
            .unwrap_or_default()
        })
    };
    let status = use_state(|| None::<Result<(), String>>);
    let saving = use_state(|| false);

    let field = |update: fn(&mut ProfileForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            update(&mut next, input_value(&e));
            form.set(next);
        })
    };

    let on_bio_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            form.set(ProfileForm {
                bio: area.value(),
                ..(*form).clone()
            });
        })
    };

    let on_submit = {
        let controller = session.controller.clone();
        let form = form.clone();
        let status = status.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            saving.set(true);
            status.set(None);

            let controller = controller.clone();
            let update = (*form).clone().into_update();
            let status = status.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match controller.update_profile(&update).await {
                    Ok(user) => {
                        info!(user_id = user.id, "profile updated");
                        status.set(Some(Ok(())));
                    }
                    Err(e) => status.set(Some(Err(session_error(&e)))),
                }
                saving.set(false);
            });
        })
    };

    let username = session.user().map(|user| user.username.clone()).unwrap_or_default();

    html! {
        <div class="max-w-lg mx-auto">
            <h1 class="text-2xl font-bold mb-6">{format!("Профиль {username}")}</h1>
            {
                match &*status {
                    Some(Ok(())) => html! {
                        <div class="mb-4 rounded border border-green-200 bg-green-50 px-4 py-2 text-green-800">
                            {"Изменения сохранены."}
                        </div>
                    },
                    Some(Err(message)) => error_banner(message),
                    None => Html::default(),
                }
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <label class="block">
                    <span class="text-sm">{"О себе"}</span>
                    <textarea class="w-full border rounded px-3 py-2" rows="4"
                        value={form.bio.clone()} oninput={on_bio_input} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Город"}</span>
                    <input class="w-full border rounded px-3 py-2"
                        value={form.location.clone()} oninput={field(|f, v| f.location = v)} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Telegram"}</span>
                    <input class="w-full border rounded px-3 py-2" type="url"
                        value={form.social_telegram.clone()} oninput={field(|f, v| f.social_telegram = v)} />
                </label>
                <label class="block">
                    <span class="text-sm">{"VK"}</span>
                    <input class="w-full border rounded px-3 py-2" type="url"
                        value={form.social_vk.clone()} oninput={field(|f, v| f.social_vk = v)} />
                </label>
                <button class="w-full py-2 rounded bg-red-700 text-white disabled:opacity-50"
                    type="submit" disabled={*saving}>
                    {"Сохранить"}
                </button>
            </form>
        </div>
    }
}
