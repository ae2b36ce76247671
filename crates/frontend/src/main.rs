#[macro_use]
extern crate tracing;

mod app;
mod components;
mod hooks;
mod pages;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    vyshivka_frontend_common::logging::init();
    info!(api = vyshivka_frontend_common::AppConfig::API_BASE_URL, "starting Vyshivka");
    yew::Renderer::<App>::new().render();
}
