//! Public scheme catalogue

use super::error_banner;
use crate::components::SchemeGrid;
use crate::hooks::{Loadable, use_api};
use vyshivka_frontend_common::LoadingSpinner;
use vyshivka_http::types::{Difficulty, SchemeFilter};
use yew::prelude::*;

const DIFFICULTIES: [(Difficulty, &str); 4] = [
    (Difficulty::Easy, "Лёгкая"),
    (Difficulty::Medium, "Средняя"),
    (Difficulty::Hard, "Сложная"),
    (Difficulty::Expert, "Экспертная"),
];

fn difficulty_from_value(value: &str) -> Option<Difficulty> {
    DIFFICULTIES
        .iter()
        .map(|(difficulty, _)| *difficulty)
        .find(|difficulty| difficulty.filter_value() == value)
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let filter = use_state(SchemeFilter::default);
    let search = use_state(String::new);

    let schemes = use_api((*filter).clone(), |client, filter| async move {
        client.list_schemes(&filter).await
    });

    let on_search_input = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| search.set(super::input_value(&e)))
    };

    let on_search = {
        let filter = filter.clone();
        let search = search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = search.trim();
            filter.set(SchemeFilter {
                search: (!text.is_empty()).then(|| text.to_string()),
                page: None,
                ..(*filter).clone()
            });
        })
    };

    let on_difficulty = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            filter.set(SchemeFilter {
                difficulty: difficulty_from_value(&select.value()),
                page: None,
                ..(*filter).clone()
            });
        })
    };

    let go_to_page = |page: u32| {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| {
            filter.set(SchemeFilter {
                page: (page > 1).then_some(page),
                ..(*filter).clone()
            });
        })
    };

    let current_page = filter.page.unwrap_or(1);

    let body = match &*schemes {
        Loadable::Loading => html! { <LoadingSpinner /> },
        Loadable::Failed(message) => error_banner(message),
        Loadable::Ready(page) => html! {
            <>
                <p class="text-sm text-stone-500 mb-4">{format!("Найдено схем: {}", page.count)}</p>
                <SchemeGrid schemes={page.results.clone()} empty_text="Ничего не найдено." />
                <div class="flex justify-between mt-6">
                    if page.previous.is_some() {
                        <button class="px-3 py-1 rounded border" onclick={go_to_page(current_page.saturating_sub(1))}>{"← Назад"}</button>
                    } else {
                        <span />
                    }
                    if page.next.is_some() {
                        <button class="px-3 py-1 rounded border" onclick={go_to_page(current_page + 1)}>{"Далее →"}</button>
                    }
                </div>
            </>
        },
    };

    html! {
        <>
            <form class="flex flex-wrap gap-2 mb-6" onsubmit={on_search}>
                <input class="flex-1 border rounded px-3 py-2" type="search" placeholder="Поиск схем"
                    value={(*search).clone()} oninput={on_search_input} />
                <select class="border rounded px-3 py-2" onchange={on_difficulty}>
                    <option value="" selected={filter.difficulty.is_none()}>{"Любая сложность"}</option>
                    { for DIFFICULTIES.iter().map(|(difficulty, label)| html! {
                        <option value={difficulty.filter_value()} selected={filter.difficulty == Some(*difficulty)}>
                            {*label}
                        </option>
                    }) }
                </select>
                <button class="px-4 py-2 rounded bg-red-700 text-white" type="submit">{"Найти"}</button>
            </form>
            {body}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_select_values() {
        assert_eq!(difficulty_from_value("hard"), Some(Difficulty::Hard));
        assert_eq!(difficulty_from_value(""), None);
        assert_eq!(difficulty_from_value("HA"), None);
    }
}
