//! Scheme detail with favorites and comments

use super::error_banner;
use crate::app::Route;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::error_messages::request_error;
use vyshivka_frontend_common::{LoadingSpinner, use_session};
use vyshivka_http::types::{Comment, Scheme};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SchemePageProps {
    pub id: u64,
}

#[function_component(SchemePage)]
pub fn scheme_page(props: &SchemePageProps) -> Html {
    let session = use_session();
    // Bumped after a mutation to reload the affected data
    let scheme_revision = use_state(|| 0_u32);
    let comments_revision = use_state(|| 0_u32);
    let action_error = use_state(|| None::<String>);
    let draft = use_state(String::new);

    let scheme = use_api((props.id, *scheme_revision), |client, (id, _)| async move {
        client.get_scheme(id).await
    });
    let comments = use_api((props.id, *comments_revision), |client, (id, _)| async move {
        client.list_comments(id).await
    });

    let user = session.user().cloned();

    let on_toggle_favorite = {
        let client = session.client().clone();
        let scheme_revision = scheme_revision.clone();
        let action_error = action_error.clone();
        let id = props.id;
        move |currently: bool| {
            let client = client.clone();
            let scheme_revision = scheme_revision.clone();
            let action_error = action_error.clone();
            Callback::from(move |_: MouseEvent| {
                let client = client.clone();
                let scheme_revision = scheme_revision.clone();
                let action_error = action_error.clone();
                spawn_local(async move {
                    let result = if currently {
                        client.remove_favorite(id).await
                    } else {
                        client.add_favorite(id).await
                    };
                    match result {
                        Ok(()) => scheme_revision.set(*scheme_revision + 1),
                        Err(e) => action_error.set(Some(request_error(&e))),
                    }
                });
            })
        }
    };

    let on_draft_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(area.value());
        })
    };

    let on_comment = {
        let client = session.client().clone();
        let draft = draft.clone();
        let comments_revision = comments_revision.clone();
        let action_error = action_error.clone();
        let id = props.id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = draft.trim().to_string();
            if text.is_empty() {
                return;
            }
            let client = client.clone();
            let draft = draft.clone();
            let comments_revision = comments_revision.clone();
            let action_error = action_error.clone();
            spawn_local(async move {
                match client.add_comment(id, text).await {
                    Ok(_) => {
                        draft.set(String::new());
                        comments_revision.set(*comments_revision + 1);
                    }
                    Err(e) => action_error.set(Some(request_error(&e))),
                }
            });
        })
    };

    let on_delete_comment = {
        let client = session.client().clone();
        let comments_revision = comments_revision.clone();
        let action_error = action_error.clone();
        move |comment_id: u64| {
            let client = client.clone();
            let comments_revision = comments_revision.clone();
            let action_error = action_error.clone();
            Callback::from(move |_: MouseEvent| {
                let client = client.clone();
                let comments_revision = comments_revision.clone();
                let action_error = action_error.clone();
                spawn_local(async move {
                    match client.delete_comment(comment_id).await {
                        Ok(()) => comments_revision.set(*comments_revision + 1),
                        Err(e) => action_error.set(Some(request_error(&e))),
                    }
                });
            })
        }
    };

    let scheme = match &*scheme {
        Loadable::Loading => return html! { <LoadingSpinner /> },
        Loadable::Failed(message) => return error_banner(message),
        Loadable::Ready(scheme) => scheme.clone(),
    };

    let favorite_button = user.as_ref().map(|user| {
        let favorited = scheme.is_favorited_by(user.id);
        html! {
            <button class="px-3 py-1 rounded border" onclick={on_toggle_favorite(favorited)}>
                { if favorited { "★ В избранном" } else { "☆ В избранное" } }
            </button>
        }
    });

    let comment_item = |comment: &Comment| {
        let own = user.as_ref().is_some_and(|u| u.username == comment.author);
        html! {
            <li key={comment.id} class="border-b border-stone-100 py-2">
                <p class="text-sm text-stone-500">
                    {format!("{} · {}", comment.author, comment.created_at.format("%d.%m.%Y %H:%M"))}
                </p>
                <p>{comment.text.clone()}</p>
                if own {
                    <button class="text-xs text-red-700" onclick={on_delete_comment(comment.id)}>{"Удалить"}</button>
                }
            </li>
        }
    };

    html! {
        <article class="space-y-6">
            if let Some(message) = &*action_error {
                {error_banner(message)}
            }
            {details(&scheme)}
            <div class="flex gap-3">
                {favorite_button.unwrap_or_default()}
                if user.as_ref().is_some_and(|u| u.id == scheme.author.id) {
                    <Link<Route> to={Route::SchemeEdit { id: scheme.id }} classes="px-3 py-1 rounded border">
                        {"Редактировать"}
                    </Link<Route>>
                }
            </div>
            <section>
                <h2 class="text-xl font-semibold mb-2">{"Комментарии"}</h2>
                {
                    match &*comments {
                        Loadable::Loading => html! { <LoadingSpinner /> },
                        Loadable::Failed(message) => error_banner(message),
                        Loadable::Ready(comments) if comments.is_empty() => html! {
                            <p class="text-stone-500">{"Комментариев пока нет."}</p>
                        },
                        Loadable::Ready(comments) => html! {
                            <ul>{ for comments.iter().map(comment_item) }</ul>
                        },
                    }
                }
                if user.is_some() {
                    <form class="mt-4 space-y-2" onsubmit={on_comment}>
                        <textarea class="w-full border rounded px-3 py-2" rows="3"
                            value={(*draft).clone()} oninput={on_draft_input} />
                        <button class="px-4 py-2 rounded bg-red-700 text-white" type="submit">{"Отправить"}</button>
                    </form>
                } else {
                    <p class="mt-4 text-sm">
                        <Link<Route> to={Route::Login} classes="text-red-700 hover:underline">{"Войдите"}</Link<Route>>
                        {", чтобы оставить комментарий."}
                    </p>
                }
            </section>
        </article>
    }
}

fn details(scheme: &Scheme) -> Html {
    let size = match (scheme.size_stitches_width, scheme.size_stitches_height) {
        (Some(width), Some(height)) => Some(format!("{width} × {height} крестиков")),
        _ => None,
    };

    html! {
        <header class="space-y-2">
            <h1 class="text-3xl font-bold">{scheme.title.clone()}</h1>
            <p class="text-stone-600">
                <Link<Route> to={Route::Profile { username: scheme.author.username.clone() }} classes="hover:underline">
                    {scheme.author.username.clone()}
                </Link<Route>>
                {format!(" · просмотров: {}", scheme.views_count)}
            </p>
            if let Some(image) = &scheme.main_image {
                <img class="max-h-96 rounded" src={image.clone()} alt={scheme.title.clone()} />
            }
            <p>{scheme.description.clone()}</p>
            <dl class="grid grid-cols-2 gap-x-4 text-sm">
                if let Some(category) = &scheme.category {
                    <><dt>{"Категория"}</dt><dd>{category.name.clone()}</dd></>
                }
                if let Some(size) = size {
                    <><dt>{"Размер"}</dt><dd>{size}</dd></>
                }
                if let Some(colors) = scheme.number_of_colors {
                    <><dt>{"Цветов"}</dt><dd>{colors.to_string()}</dd></>
                }
                <dt>{"Лицензия"}</dt>
                <dd><a href={scheme.license.url.clone()} class="hover:underline">{scheme.license.short_name.clone()}</a></dd>
            </dl>
            if !scheme.files.is_empty() {
                <ul class="text-sm">
                    { for scheme.files.iter().map(|file| html! {
                        <li key={file.id}><a href={file.file.clone()} class="text-red-700 hover:underline">
                            { if file.description.is_empty() { file.file.clone() } else { file.description.clone() } }
                        </a></li>
                    }) }
                </ul>
            }
        </header>
    }
}
