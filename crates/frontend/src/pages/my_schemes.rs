use super::error_banner;
use crate::components::SchemeGrid;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::LoadingSpinner;
use yew::prelude::*;

#[function_component(MySchemesPage)]
pub fn my_schemes_page() -> Html {
    let schemes = use_api((), |client, ()| async move { client.my_schemes().await });

    html! {
        <>
            <h1 class="text-2xl font-bold mb-6">{"Мои схемы"}</h1>
            {
                match &*schemes {
                    Loadable::Loading => html! { <LoadingSpinner /> },
                    Loadable::Failed(message) => error_banner(message),
                    Loadable::Ready(schemes) => html! {
                        <SchemeGrid schemes={schemes.clone()} empty_text="Вы ещё не опубликовали ни одной схемы." />
                    },
                }
            }
        </>
    }
}
