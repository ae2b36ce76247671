//! Login form

use super::{error_banner, input_value};
use crate::app::Route;
use vyshivka_frontend_common::error_messages::session_error;
use vyshivka_frontend_common::use_session;
use vyshivka_http::Credentials;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| email.set(input_value(&e)))
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| password.set(input_value(&e)))
    };

    // Navigation to the home page is issued by the session controller
    let on_submit = {
        let session = session.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            error.set(None);

            let controller = session.controller.clone();
            let credentials = Credentials::new((*email).trim(), (*password).clone());
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                if let Err(e) = controller.login(&credentials).await {
                    warn!(error = %e, "login failed");
                    error.set(Some(session_error(&e)));
                }
                submitting.set(false);
            });
        })
    };

    if session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Home} /> };
    }

    html! {
        <div class="max-w-md mx-auto">
            <h1 class="text-2xl font-bold mb-6">{"Вход"}</h1>
            if let Some(message) = &*error {
                {error_banner(message)}
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <label class="block">
                    <span class="text-sm">{"Электронная почта"}</span>
                    <input class="w-full border rounded px-3 py-2" type="email" required=true
                        value={(*email).clone()} oninput={on_email_input} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Пароль"}</span>
                    <input class="w-full border rounded px-3 py-2" type="password" required=true
                        value={(*password).clone()} oninput={on_password_input} />
                </label>
                <button class="w-full py-2 rounded bg-red-700 text-white disabled:opacity-50"
                    type="submit" disabled={*submitting}>
                    { if *submitting { "Входим..." } else { "Войти" } }
                </button>
            </form>
            <p class="mt-4 text-sm">
                {"Ещё нет аккаунта? "}
                <Link<Route> to={Route::Register} classes="text-red-700 hover:underline">{"Зарегистрируйтесь"}</Link<Route>>
            </p>
        </div>
    }
}
