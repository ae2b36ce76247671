use super::error_banner;
use crate::components::SchemeGrid;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::LoadingSpinner;
use yew::prelude::*;

#[function_component(FavoritesPage)]
pub fn favorites_page() -> Html {
    let page = use_state(|| 1_u32);
    let schemes = use_api(*page, |client, page| async move {
        client.favorited_schemes(Some(page)).await
    });

    let step = |delta: i32| {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.saturating_add_signed(delta).max(1)))
    };

    html! {
        <>
            <h1 class="text-2xl font-bold mb-6">{"Избранное"}</h1>
            {
                match &*schemes {
                    Loadable::Loading => html! { <LoadingSpinner /> },
                    Loadable::Failed(message) => error_banner(message),
                    Loadable::Ready(result) => html! {
                        <>
                            <SchemeGrid schemes={result.results.clone()} empty_text="У вас пока нет избранных схем." />
                            <div class="flex gap-2 mt-6">
                                if result.previous.is_some() {
                                    <button class="px-3 py-1 rounded border" onclick={step(-1)}>{"← Назад"}</button>
                                }
                                if result.next.is_some() {
                                    <button class="px-3 py-1 rounded border" onclick={step(1)}>{"Далее →"}</button>
                                }
                            </div>
                        </>
                    },
                }
            }
        </>
    }
}
