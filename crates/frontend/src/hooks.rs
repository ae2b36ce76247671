//! Data loading hooks

use std::future::Future;
use vyshivka_frontend_common::error_messages::request_error;
use vyshivka_frontend_common::use_api_client;
use vyshivka_http::{ApiClient, ClientError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Run an API call whenever `deps` change and expose its progress
///
/// Responses that arrive after the deps changed again, or after the component
/// unmounted, are dropped.
#[hook]
pub fn use_api<T, D, F, Fut>(deps: D, fetch: F) -> UseStateHandle<Loadable<T>>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(ApiClient, D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let client = use_api_client();
    let state = use_state(|| Loadable::Loading);
    let generation = use_mut_ref(|| 0_u64);

    {
        let state = state.clone();
        use_effect_with(deps, move |deps| {
            *generation.borrow_mut() += 1;
            let current = *generation.borrow();
            state.set(Loadable::Loading);

            let deps = deps.clone();
            let latest = generation.clone();
            spawn_local(async move {
                let result = fetch(client, deps).await;
                if *latest.borrow() != current {
                    debug!("dropping stale API response");
                    return;
                }
                match result {
                    Ok(value) => state.set(Loadable::Ready(value)),
                    Err(error) => {
                        warn!(%error, "API request failed");
                        state.set(Loadable::Failed(request_error(&error)));
                    }
                }
            });

            move || *generation.borrow_mut() += 1
        });
    }

    state
}
