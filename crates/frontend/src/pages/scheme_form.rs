//! Creating and editing schemes

use super::{error_banner, input_value};
use crate::app::Route;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::LoadingSpinner;
use vyshivka_frontend_common::error_messages::request_error;
use vyshivka_frontend_common::use_api_client;
use vyshivka_http::types::{
    Category, Difficulty, License, Scheme, SchemeWrite, Tag, Visibility,
};
use vyshivka_http::{ApiClient, ClientError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const DIFFICULTIES: [(Difficulty, &str, &str); 4] = [
    (Difficulty::Easy, "EA", "Лёгкая"),
    (Difficulty::Medium, "ME", "Средняя"),
    (Difficulty::Hard, "HA", "Сложная"),
    (Difficulty::Expert, "EX", "Экспертная"),
];

const VISIBILITIES: [(Visibility, &str, &str); 3] = [
    (Visibility::Public, "PUB", "Всем"),
    (Visibility::Unlisted, "UNL", "По ссылке"),
    (Visibility::Private, "PRI", "Только мне"),
];

/// Form contents as typed; numbers stay text until submission
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SchemeDraft {
    title: String,
    description: String,
    category: Option<u64>,
    tags: Vec<u64>,
    license: Option<u64>,
    difficulty: Difficulty,
    width: String,
    height: String,
    colors: String,
    recommended_canvas: String,
    recommended_threads: String,
    visibility: Visibility,
}

impl SchemeDraft {
    fn from_scheme(scheme: &Scheme) -> Self {
        let number = |value: Option<u32>| value.map(|n| n.to_string()).unwrap_or_default();
        Self {
            title: scheme.title.clone(),
            description: scheme.description.clone(),
            category: scheme.category.as_ref().map(|category| category.id),
            tags: scheme.tags.iter().map(|tag| tag.id).collect(),
            license: Some(scheme.license.id),
            difficulty: scheme.difficulty,
            width: number(scheme.size_stitches_width),
            height: number(scheme.size_stitches_height),
            colors: number(scheme.number_of_colors),
            recommended_canvas: scheme.recommended_canvas.clone(),
            recommended_threads: scheme.recommended_threads.clone(),
            visibility: scheme.visibility,
        }
    }

    fn toggle_tag(&mut self, id: u64) {
        match self.tags.iter().position(|tag| *tag == id) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => self.tags.push(id),
        }
    }

    fn to_write(&self) -> Result<SchemeWrite, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Укажите название схемы.");
        }
        let license = self.license.ok_or("Выберите лицензию.")?;

        Ok(SchemeWrite {
            title: title.to_string(),
            description: self.description.clone(),
            category: self.category,
            tags: self.tags.clone(),
            license,
            difficulty: self.difficulty,
            size_stitches_width: parse_count(&self.width)?,
            size_stitches_height: parse_count(&self.height)?,
            number_of_colors: parse_count(&self.colors)?,
            recommended_canvas: self.recommended_canvas.clone(),
            recommended_threads: self.recommended_threads.clone(),
            visibility: self.visibility,
        })
    }
}

fn parse_count(text: &str) -> Result<Option<u32>, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<u32>() {
        Ok(0) | Err(_) => Err("Размеры и число цветов должны быть положительными числами."),
        Ok(count) => Ok(Some(count)),
    }
}

fn select_value(event: &Event) -> String {
    let select: web_sys::HtmlSelectElement = event.target_unchecked_into();
    select.value()
}

#[derive(Clone, Debug, PartialEq)]
struct Catalogs {
    categories: Vec<Category>,
    tags: Vec<Tag>,
    licenses: Vec<License>,
}

async fn load_catalogs(client: ApiClient) -> Result<Catalogs, ClientError> {
    Ok(Catalogs {
        categories: client.list_categories().await?,
        tags: client.list_tags().await?,
        licenses: client.list_licenses().await?,
    })
}

#[derive(Properties, PartialEq)]
struct SchemeFormProps {
    /// Scheme being edited; `None` creates a new one
    scheme_id: Option<u64>,
    initial: SchemeDraft,
}

#[function_component(SchemeForm)]
fn scheme_form(props: &SchemeFormProps) -> Html {
    let client = use_api_client();
    let navigator = use_navigator();
    let catalogs = use_api((), |client, ()| load_catalogs(client));
    let draft = {
        let initial = props.initial.clone();
        use_state(move || initial)
    };
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let text = |update: fn(&mut SchemeDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            update(&mut next, input_value(&e));
            draft.set(next);
        })
    };

    let choice = |update: fn(&mut SchemeDraft, &str)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            update(&mut next, &select_value(&e));
            draft.set(next);
        })
    };

    let on_description_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(SchemeDraft {
                description: area.value(),
                ..(*draft).clone()
            });
        })
    };

    let on_tag_toggle = |id: u64| {
        let draft = draft.clone();
        Callback::from(move |_: Event| {
            let mut next = (*draft).clone();
            next.toggle_tag(id);
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let saving = saving.clone();
        let scheme_id = props.scheme_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let scheme = match draft.to_write() {
                Ok(scheme) => scheme,
                Err(message) => {
                    error.set(Some(message.to_string()));
                    return;
                }
            };
            error.set(None);
            saving.set(true);

            let client = client.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match scheme_id {
                    Some(id) => client.update_scheme(id, &scheme).await,
                    None => client.create_scheme(&scheme).await,
                };
                saving.set(false);
                match result {
                    Ok(saved) => {
                        info!(scheme_id = saved.id, "scheme saved");
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Scheme { id: saved.id });
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "scheme was not saved");
                        error.set(Some(request_error(&e)));
                    }
                }
            });
        })
    };

    let catalogs = match &*catalogs {
        Loadable::Loading => return html! { <LoadingSpinner /> },
        Loadable::Failed(message) => return error_banner(message),
        Loadable::Ready(catalogs) => catalogs.clone(),
    };

    let heading = if props.scheme_id.is_some() {
        "Редактирование схемы"
    } else {
        "Добавить новую схему"
    };
    let submit_label = if props.scheme_id.is_some() {
        "Сохранить изменения"
    } else {
        "Создать схему"
    };

    html! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">{heading}</h1>
            if let Some(message) = &*error {
                {error_banner(message)}
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <label class="block">
                    <span class="text-sm">{"Название"}</span>
                    <input class="w-full border rounded px-3 py-2" required=true
                        value={draft.title.clone()} oninput={text(|d, v| d.title = v)} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Описание"}</span>
                    <textarea class="w-full border rounded px-3 py-2" rows="5"
                        value={draft.description.clone()} oninput={on_description_input} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Категория"}</span>
                    <select class="w-full border rounded px-3 py-2"
                        onchange={choice(|d, v| d.category = v.parse().ok())}>
                        <option value="" selected={draft.category.is_none()}>{"-- не выбрана --"}</option>
                        { for catalogs.categories.iter().map(|category| html! {
                            <option key={category.id} value={category.id.to_string()}
                                selected={draft.category == Some(category.id)}>
                                {category.name.clone()}
                            </option>
                        }) }
                    </select>
                </label>
                <fieldset>
                    <legend class="text-sm">{"Теги"}</legend>
                    <div class="flex flex-wrap gap-3">
                        { for catalogs.tags.iter().map(|tag| html! {
                            <label key={tag.id} class="inline-flex items-center gap-1">
                                <input type="checkbox" checked={draft.tags.contains(&tag.id)}
                                    onchange={on_tag_toggle(tag.id)} />
                                {tag.name.clone()}
                            </label>
                        }) }
                    </div>
                </fieldset>
                <label class="block">
                    <span class="text-sm">{"Лицензия"}</span>
                    <select class="w-full border rounded px-3 py-2" required=true
                        onchange={choice(|d, v| d.license = v.parse().ok())}>
                        <option value="" selected={draft.license.is_none()}>{"-- выберите --"}</option>
                        { for catalogs.licenses.iter().map(|license| html! {
                            <option key={license.id} value={license.id.to_string()}
                                selected={draft.license == Some(license.id)}>
                                {format!("{} ({})", license.name, license.short_name)}
                            </option>
                        }) }
                    </select>
                </label>
                <div class="grid grid-cols-2 gap-4">
                    <label class="block">
                        <span class="text-sm">{"Сложность"}</span>
                        <select class="w-full border rounded px-3 py-2"
                            onchange={choice(|d, v| {
                                if let Some((difficulty, _, _)) = DIFFICULTIES.iter().find(|(_, code, _)| *code == v) {
                                    d.difficulty = *difficulty;
                                }
                            })}>
                            { for DIFFICULTIES.iter().map(|(difficulty, code, label)| html! {
                                <option value={*code} selected={draft.difficulty == *difficulty}>{*label}</option>
                            }) }
                        </select>
                    </label>
                    <label class="block">
                        <span class="text-sm">{"Кто видит схему"}</span>
                        <select class="w-full border rounded px-3 py-2"
                            onchange={choice(|d, v| {
                                if let Some((visibility, _, _)) = VISIBILITIES.iter().find(|(_, code, _)| *code == v) {
                                    d.visibility = *visibility;
                                }
                            })}>
                            { for VISIBILITIES.iter().map(|(visibility, code, label)| html! {
                                <option value={*code} selected={draft.visibility == *visibility}>{*label}</option>
                            }) }
                        </select>
                    </label>
                </div>
                <div class="grid grid-cols-3 gap-4">
                    <label class="block">
                        <span class="text-sm">{"Ширина, крестиков"}</span>
                        <input class="w-full border rounded px-3 py-2" inputmode="numeric"
                            value={draft.width.clone()} oninput={text(|d, v| d.width = v)} />
                    </label>
                    <label class="block">
                        <span class="text-sm">{"Высота, крестиков"}</span>
                        <input class="w-full border rounded px-3 py-2" inputmode="numeric"
                            value={draft.height.clone()} oninput={text(|d, v| d.height = v)} />
                    </label>
                    <label class="block">
                        <span class="text-sm">{"Цветов"}</span>
                        <input class="w-full border rounded px-3 py-2" inputmode="numeric"
                            value={draft.colors.clone()} oninput={text(|d, v| d.colors = v)} />
                    </label>
                </div>
                <label class="block">
                    <span class="text-sm">{"Рекомендуемая канва"}</span>
                    <input class="w-full border rounded px-3 py-2"
                        value={draft.recommended_canvas.clone()} oninput={text(|d, v| d.recommended_canvas = v)} />
                </label>
                <label class="block">
                    <span class="text-sm">{"Рекомендуемые нитки"}</span>
                    <input class="w-full border rounded px-3 py-2"
                        value={draft.recommended_threads.clone()} oninput={text(|d, v| d.recommended_threads = v)} />
                </label>
                <button class="w-full py-2 rounded bg-red-700 text-white disabled:opacity-50"
                    type="submit" disabled={*saving}>
                    {submit_label}
                </button>
            </form>
        </div>
    }
}

#[function_component(SchemeCreatePage)]
pub fn scheme_create_page() -> Html {
    html! { <SchemeForm scheme_id={None::<u64>} initial={SchemeDraft::default()} /> }
}

#[derive(Properties, PartialEq)]
pub struct SchemeEditPageProps {
    pub id: u64,
}

#[function_component(SchemeEditPage)]
pub fn scheme_edit_page(props: &SchemeEditPageProps) -> Html {
    let scheme = use_api(props.id, |client, id| async move { client.get_scheme(id).await });

    match &*scheme {
        Loadable::Loading => html! { <LoadingSpinner /> },
        Loadable::Failed(message) => error_banner(message),
        Loadable::Ready(scheme) => html! {
            <SchemeForm key={scheme.id} scheme_id={Some(scheme.id)} initial={SchemeDraft::from_scheme(scheme)} />
        },
    }
}
