use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="text-center py-20">
            <h1 class="text-3xl font-bold mb-4">{"404"}</h1>
            <p class="mb-6 text-stone-600">{"Такой страницы нет."}</p>
            <Link<Route> to={Route::Home} classes="text-red-700 hover:underline">{"На главную"}</Link<Route>>
        </div>
    }
}
