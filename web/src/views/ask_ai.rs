use leptos::prelude::*;

use crate::{
    components::status::{ErrorView, LoadingView},
    server::get_ask_ai_url,
};

/// The assistant lives on its own server; this page only hosts it.
#[component]
pub fn AskAiPage() -> impl IntoView {
    let url = Resource::new(|| (), |_| async move { get_ask_ai_url().await });

    view! {
        <div class="askai-frame">
            {move || match url.get() {
                Some(Ok(src)) => view! {
                    <iframe
                        src=src
                        title="AI Doctor"
                        allow="microphone"
                        class="askai-frame__iframe"
                    ></iframe>
                }.into_any(),
                Some(Err(err)) => {
                    leptos::logging::error!("Failed to load assistant url: {}", err);
                    view! {
                        <ErrorView message="The AI assistant is unavailable right now." />
                    }.into_any()
                }
                None => view! {
                    <LoadingView message="Starting the assistant..." />
                }.into_any(),
            }}
        </div>
    }
}
