//! Top navigation bar

use crate::app::Route;
use vyshivka_frontend_common::use_session;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_session();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.controller.logout())
    };

    let account = match session.user() {
        Some(user) => html! {
            <>
                <Link<Route> to={Route::SchemeCreate} classes="hover:underline">{"Добавить схему"}</Link<Route>>
                <Link<Route> to={Route::MySchemes} classes="hover:underline">{"Мои схемы"}</Link<Route>>
                <Link<Route> to={Route::Favorites} classes="hover:underline">{"Избранное"}</Link<Route>>
                <Link<Route> to={Route::ProfileEdit} classes="font-semibold hover:underline">{user.username.clone()}</Link<Route>>
                <button class="px-3 py-1 rounded bg-stone-200 hover:bg-stone-300" onclick={on_logout}>
                    {"Выйти"}
                </button>
            </>
        },
        None if session.state.is_initializing() => Html::default(),
        None => html! {
            <>
                <Link<Route> to={Route::Login} classes="hover:underline">{"Войти"}</Link<Route>>
                <Link<Route> to={Route::Register} classes="px-3 py-1 rounded bg-red-700 text-white">{"Регистрация"}</Link<Route>>
            </>
        },
    };

    html! {
        <header class="border-b border-stone-200 bg-white">
            <nav class="container mx-auto px-4 py-3 flex items-center gap-4">
                <Link<Route> to={Route::Home} classes="text-xl font-bold text-red-800 mr-auto">{"Мир Вышивки"}</Link<Route>>
                {account}
            </nav>
        </header>
    }
}
