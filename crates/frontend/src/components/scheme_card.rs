//! Scheme list entries

use crate::app::Route;
use vyshivka_http::types::SchemeSummary;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SchemeCardProps {
    pub scheme: SchemeSummary,
}

#[function_component(SchemeCard)]
pub fn scheme_card(props: &SchemeCardProps) -> Html {
    let scheme = &props.scheme;

    html! {
        <article class="rounded-lg border border-stone-200 bg-white overflow-hidden">
            if let Some(image) = &scheme.main_image {
                <img class="w-full h-48 object-cover" src={image.clone()} alt={scheme.title.clone()} />
            }
            <div class="p-4">
                <Link<Route> to={Route::Scheme { id: scheme.id }} classes="text-lg font-semibold hover:underline">
                    {scheme.title.clone()}
                </Link<Route>>
                <p class="text-sm text-stone-600">
                    <Link<Route> to={Route::Profile { username: scheme.author.clone() }}>{scheme.author.clone()}</Link<Route>>
                    {format!(" · {}", scheme.created_at.format("%d.%m.%Y"))}
                </p>
                if let Some(category) = &scheme.category {
                    <p class="text-sm">{category.clone()}</p>
                }
                <p class="text-xs text-stone-500">
                    {scheme.tags.iter().map(|tag| format!("#{tag}")).collect::<Vec<_>>().join(" ")}
                </p>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct SchemeGridProps {
    pub schemes: Vec<SchemeSummary>,
    #[prop_or(AttrValue::Static("Схем пока нет."))]
    pub empty_text: AttrValue,
}

#[function_component(SchemeGrid)]
pub fn scheme_grid(props: &SchemeGridProps) -> Html {
    if props.schemes.is_empty() {
        return html! { <p class="text-stone-500">{props.empty_text.clone()}</p> };
    }

    html! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
            { for props.schemes.iter().map(|scheme| html! {
                <SchemeCard key={scheme.id} scheme={scheme.clone()} />
            }) }
        </div>
    }
}
