use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found">
            <div class="not-found__code">"404"</div>
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist or may have been moved."</p>

            <div class="not-found__actions">
                <button
                    class="btn-primary"
                    on:click={
                        let navigate = navigate.clone();
                        move |_| {
                            navigate("/", Default::default());
                        }
                    }
                >
                    "🏠 Go Home"
                </button>
                <button
                    class="btn-outlined"
                    on:click=move |_| {
                        navigate("/maps", Default::default());
                    }
                >
                    "📍 Find Care Nearby"
                </button>
            </div>
        </div>
    }
}
