//! Account registration

use super::{error_banner, input_value};
use crate::app::Route;
use vyshivka_frontend_common::error_messages::request_error;
use vyshivka_frontend_common::use_api_client;
use vyshivka_http::types::RegisterRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let client = use_api_client();
    let navigator = use_navigator();
    let form = use_state(|| RegisterRequest {
        username: String::new(),
        email: String::new(),
        password: String::new(),
        re_password: String::new(),
    });
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let field = |update: fn(&mut RegisterRequest, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            update(&mut next, input_value(&e));
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !form.passwords_match() {
                error.set(Some("Пароли не совпадают.".to_string()));
                return;
            }
            submitting.set(true);
            error.set(None);

            let client = client.clone();
            let navigator = navigator.clone();
            let request = (*form).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match client.register(&request).await {
                    Ok(user) => {
                        info!(user_id = user.id, "account registered");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(e) => error.set(Some(request_error(&e))),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="max-w-md mx-auto">
            <h1 class="text-2xl font-bold mb-6">{"Регистрация"}</h1>
            if let Some(message) = &*error {
                {error_banner(message)}
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <input class="w-full border rounded px-3 py-2" placeholder="Имя пользователя" required=true
                    value={form.username.clone()} oninput={field(|f, v| f.username = v)} />
                <input class="w-full border rounded px-3 py-2" type="email" placeholder="Электронная почта" required=true
                    value={form.email.clone()} oninput={field(|f, v| f.email = v)} />
                <input class="w-full border rounded px-3 py-2" type="password" placeholder="Пароль" required=true
                    value={form.password.clone()} oninput={field(|f, v| f.password = v)} />
                <input class="w-full border rounded px-3 py-2" type="password" placeholder="Повторите пароль" required=true
                    value={form.re_password.clone()} oninput={field(|f, v| f.re_password = v)} />
                <button class="w-full py-2 rounded bg-red-700 text-white disabled:opacity-50"
                    type="submit" disabled={*submitting}>
                    {"Создать аккаунт"}
                </button>
            </form>
        </div>
    }
}
