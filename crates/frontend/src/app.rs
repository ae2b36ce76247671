use crate::components::Header;
use crate::pages::{
    FavoritesPage, HomePage, LoginPage, MySchemesPage, NotFoundPage, ProfileEditPage, ProfilePage,
    RegisterPage, SchemeCreatePage, SchemeEditPage, SchemePage,
};
use vyshivka_frontend_common::{RequireAuth, SessionProvider};
use vyshivka_http::NavTarget;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/schemes/my")]
    MySchemes,
    #[at("/schemes/favorites")]
    Favorites,
    #[at("/create-scheme")]
    SchemeCreate,
    #[at("/schemes/:id")]
    Scheme { id: u64 },
    #[at("/schemes/:id/edit")]
    SchemeEdit { id: u64 },
    #[at("/profile/edit")]
    ProfileEdit,
    #[at("/users/:username")]
    Profile { username: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Home => Self::Home,
            NavTarget::Login => Self::Login,
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionRoot />
        </BrowserRouter>
    }
}

/// Session provider wired to the router
#[function_component(SessionRoot)]
fn session_root() -> Html {
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let on_navigate = use_callback(route, move |target: NavTarget, route| {
        let destination = Route::from(target);
        if route.as_ref() == Some(&destination) {
            return;
        }
        match &navigator {
            Some(navigator) => navigator.push(&destination),
            None => warn!(?destination, "navigation requested outside of a router"),
        }
    });

    html! {
        <SessionProvider {on_navigate}>
            <Header />
            <main class="container mx-auto px-4 py-6">
                <Switch<Route> render={switch} />
            </main>
        </SessionProvider>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::MySchemes => html! { <RequireAuth><MySchemesPage /></RequireAuth> },
        Route::Favorites => html! { <RequireAuth><FavoritesPage /></RequireAuth> },
        Route::ProfileEdit => html! { <RequireAuth><ProfileEditPage /></RequireAuth> },
        Route::SchemeCreate => html! { <RequireAuth><SchemeCreatePage /></RequireAuth> },
        Route::Scheme { id } => html! { <SchemePage {id} /> },
        Route::SchemeEdit { id } => html! { <RequireAuth><SchemeEditPage {id} /></RequireAuth> },
        Route::Profile { username } => html! { <ProfilePage username={AttrValue::from(username)} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_targets_map_to_routes() {
        assert_eq!(Route::from(NavTarget::Home), Route::Home);
        assert_eq!(Route::from(NavTarget::Login), Route::Login);
    }

    #[test]
    fn test_routes_round_trip_paths() {
        assert_eq!(Route::Scheme { id: 12 }.to_path(), "/schemes/12");
        assert_eq!(Route::recognize("/schemes/my"), Some(Route::MySchemes));
        assert_eq!(Route::SchemeEdit { id: 12 }.to_path(), "/schemes/12/edit");
        assert_eq!(
            Route::recognize("/schemes/12/edit"),
            Some(Route::SchemeEdit { id: 12 })
        );
        assert_eq!(Route::recognize("/create-scheme"), Some(Route::SchemeCreate));
        assert_eq!(
            Route::recognize("/users/masha"),
            Some(Route::Profile {
                username: "masha".into()
            })
        );
    }
}
