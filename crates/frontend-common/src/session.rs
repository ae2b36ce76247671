//! Global session context and provider
//!
//! [`SessionProvider`] owns the [`SessionController`] for the page. It mirrors
//! the controller's state into Yew, resolves the stored session on mount, and
//! re-derives it whenever another tab writes the token key.

use crate::config::AppConfig;
use crate::storage::BrowserStorage;
use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver};
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use vyshivka_http::{
    ApiClient, ClientConfig, ClientError, NavTarget, Navigator, SessionController, SessionState,
    SessionUser,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::StorageEvent;
use yew::prelude::*;

/// Session handle available to every component below the provider
#[derive(Clone)]
pub struct SessionContext {
    pub controller: SessionController,
    pub state: SessionState,
    navigate: Callback<NavTarget>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.navigate == other.navigate
    }
}

impl SessionContext {
    pub fn client(&self) -> &ApiClient {
        self.controller.client()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.state.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Issue a navigation command through the application's router
    pub fn navigate(&self, target: NavTarget) {
        self.navigate.emit(target);
    }
}

struct Wiring {
    controller: SessionController,
    navigations: RefCell<Option<UnboundedReceiver<NavTarget>>>,
}

/// Build the controller; its navigation commands arrive on a channel because
/// the controller's navigator must be `Send + Sync` and Yew callbacks are not
fn wire(base_url: &str) -> Result<Wiring, ClientError> {
    let (sender, receiver) = mpsc::unbounded();
    let navigator: Navigator = Arc::new(move |target| {
        if sender.unbounded_send(target).is_err() {
            debug!(?target, "navigation dropped, session provider is gone");
        }
    });

    let controller = SessionController::new(
        ClientConfig::new(base_url),
        BrowserStorage::token_store(),
        navigator,
    )?;

    Ok(Wiring {
        controller,
        navigations: RefCell::new(Some(receiver)),
    })
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or(AttrValue::Static(AppConfig::API_BASE_URL))]
    pub base_url: AttrValue,
    /// Performs navigation commands, normally by pushing a router route
    pub on_navigate: Callback<NavTarget>,
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let wiring = use_memo(props.base_url.clone(), |base_url| wire(base_url));
    let state = use_state_eq(|| SessionState::Initializing);

    let on_navigate = use_mut_ref(|| props.on_navigate.clone());
    *on_navigate.borrow_mut() = props.on_navigate.clone();

    let navigate = {
        let on_navigate = on_navigate.clone();
        use_callback((), move |target: NavTarget, _| {
            let callback = on_navigate.borrow().clone();
            callback.emit(target);
        })
    };

    // Forward controller navigation commands to the router
    {
        let wiring = wiring.clone();
        let navigate = navigate.clone();
        use_effect_with(props.base_url.clone(), move |_| {
            if let Ok(wiring) = &*wiring
                && let Some(mut receiver) = wiring.navigations.borrow_mut().take()
            {
                spawn_local(async move {
                    while let Some(target) = receiver.next().await {
                        navigate.emit(target);
                    }
                });
            }
        });
    }

    // Mirror controller state and resolve the stored session
    {
        let wiring = wiring.clone();
        let state = state.clone();
        use_effect_with(props.base_url.clone(), move |_| {
            let alive = Rc::new(Cell::new(true));

            match &*wiring {
                Ok(wiring) => {
                    let mut receiver = wiring.controller.subscribe();
                    let mounted = alive.clone();
                    spawn_local(async move {
                        state.set(receiver.borrow_and_update().clone());
                        while receiver.changed().await.is_ok() && mounted.get() {
                            state.set(receiver.borrow_and_update().clone());
                        }
                    });

                    let controller = wiring.controller.clone();
                    spawn_local(async move {
                        let resolved = controller.initialize().await;
                        info!(authenticated = resolved.is_authenticated(), "session resolved");
                    });
                }
                Err(error) => {
                    error!(%error, "session layer could not be created");
                    state.set(SessionState::Anonymous);
                }
            }

            move || alive.set(false)
        });
    }

    // Another tab logged in or out
    {
        let wiring = wiring.clone();
        use_effect_with(props.base_url.clone(), move |_| {
            let listener = match (&*wiring, web_sys::window()) {
                (Ok(wiring), Some(window)) => {
                    let controller = wiring.controller.clone();
                    Some(EventListener::new(&window, "storage", move |event| {
                        let Some(event) = event.dyn_ref::<StorageEvent>() else {
                            return;
                        };
                        // A null key means the whole storage area was cleared
                        let relevant = event
                            .key()
                            .is_none_or(|key| key == controller.client().store().key());
                        if relevant {
                            debug!("token storage changed in another tab");
                            let controller = controller.clone();
                            spawn_local(async move {
                                if let Err(error) = controller.resync().await {
                                    warn!(%error, "cross-tab session resync failed");
                                }
                            });
                        }
                    }))
                }
                _ => None,
            };

            move || drop(listener)
        });
    }

    match &*wiring {
        Ok(wiring) => {
            let context = SessionContext {
                controller: wiring.controller.clone(),
                state: (*state).clone(),
                navigate,
            };
            html! {
                <ContextProvider<SessionContext> {context}>
                    {props.children.clone()}
                </ContextProvider<SessionContext>>
            }
        }
        Err(error) => html! {
            <div class="min-h-screen flex items-center justify-center">
                <p class="text-red-700">{format!("Не удалось подключиться к API: {error}")}</p>
            </div>
        },
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

#[hook]
pub fn use_session_state() -> SessionState {
    use_session().state
}

/// Hook to get the logged-in user, if any
#[hook]
pub fn use_current_user() -> Option<SessionUser> {
    use_session().state.user().cloned()
}

/// Hook to get the API client bound to the session
#[hook]
pub fn use_api_client() -> ApiClient {
    use_session().client().clone()
}
