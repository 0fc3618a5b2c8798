use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <A href="/" attr:class="navbar__logo">
                        "HealthEase"
                    </A>
                </div>

                <div class="navbar__links">
                    <A href="/" attr:class="navbar__link">
                        "Home"
                    </A>
                    <A href="/askai" attr:class="navbar__link">
                        "Ask AI"
                    </A>
                    <A href="/maps" attr:class="navbar__link navbar__link--cta">
                        "Maps"
                    </A>
                </div>
            </div>
        </nav>
    }
}
