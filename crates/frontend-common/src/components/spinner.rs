//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
    /// Fill the viewport instead of the parent block
    #[prop_or_default]
    pub full_page: bool,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    let class = if props.full_page {
        "flex flex-col items-center justify-center min-h-screen"
    } else {
        "text-center p-10"
    };

    html! {
        <div {class}>
            <div class="w-10 h-10 border-4 border-stone-200 border-t-red-700 rounded-full animate-spin mx-auto mb-5"></div>
            if let Some(text) = &props.text {
                <p class="text-stone-600 text-sm m-0">{text}</p>
            }
        </div>
    }
}
