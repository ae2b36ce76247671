//! Authentication guard component for protected routes

use crate::components::LoadingSpinner;
use crate::session::use_session;
use vyshivka_http::GuardDecision;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

/// Renders its children only for an authenticated session
///
/// While the stored session is still being resolved a spinner is shown, so a
/// reload never bounces a logged-in user to the login page.
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let session = use_session();
    let decision = GuardDecision::decide(&session.state);

    {
        let session = session.clone();
        use_effect_with(decision, move |decision| {
            if let GuardDecision::Redirect(target) = *decision {
                session.navigate(target);
            }
        });
    }

    match decision {
        GuardDecision::Pending => html! {
            <LoadingSpinner full_page=true text={Some("Проверяем сессию...".to_string())} />
        },
        GuardDecision::Render => html! { <>{ props.children.clone() }</> },
        GuardDecision::Redirect(_) => Html::default(),
    }
}
