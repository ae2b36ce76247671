//! Public user profile

use super::error_banner;
use crate::components::SchemeGrid;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::LoadingSpinner;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub username: AttrValue,
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let profile = use_api(props.username.clone(), |client, username| async move {
        client.user_profile(&username).await
    });

    match &*profile {
        Loadable::Loading => html! { <LoadingSpinner /> },
        Loadable::Failed(message) => error_banner(message),
        Loadable::Ready(profile) => {
            let links = [
                ("Telegram", &profile.profile.social_telegram),
                ("VK", &profile.profile.social_vk),
            ];
            html! {
                <>
                    <section class="mb-8 flex gap-6 items-start">
                        if let Some(avatar) = &profile.profile.avatar {
                            <img class="w-24 h-24 rounded-full object-cover" src={avatar.clone()} alt={profile.username.clone()} />
                        }
                        <div>
                            <h1 class="text-2xl font-bold">{profile.username.clone()}</h1>
                            <p class="text-sm text-stone-500">
                                {format!("С нами с {}", profile.date_joined.format("%d.%m.%Y"))}
                            </p>
                            if !profile.profile.location.is_empty() {
                                <p>{profile.profile.location.clone()}</p>
                            }
                            if !profile.profile.bio.is_empty() {
                                <p class="mt-2">{profile.profile.bio.clone()}</p>
                            }
                            <p class="mt-2 flex gap-3 text-sm">
                                { for links.iter().filter(|(_, url)| !url.is_empty()).map(|(name, url)| html! {
                                    <a href={(*url).clone()} class="text-red-700 hover:underline">{*name}</a>
                                }) }
                            </p>
                        </div>
                    </section>
                    <h2 class="text-xl font-semibold mb-4">{"Схемы"}</h2>
                    <SchemeGrid schemes={profile.schemes.clone()} />
                </>
            }
        }
    }
}
