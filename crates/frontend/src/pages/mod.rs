mod favorites;
mod home;
mod login;
mod my_schemes;
mod not_found;
mod profile;
mod profile_edit;
mod register;
mod scheme;
mod scheme_form;

pub use favorites::FavoritesPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use my_schemes::MySchemesPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use profile_edit::ProfileEditPage;
pub use register::RegisterPage;
pub use scheme::SchemePage;
pub use scheme_form::{SchemeCreatePage, SchemeEditPage};

use yew::prelude::*;

/// Read the current value of a text input
pub(crate) fn input_value(event: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = event.target_unchecked_into();
    input.value()
}

pub(crate) fn error_banner(message: &str) -> Html {
    html! {
        <div class="mb-4 rounded border border-red-200 bg-red-50 px-4 py-2 text-red-800">
            {message.to_string()}
        </div>
    }
}
