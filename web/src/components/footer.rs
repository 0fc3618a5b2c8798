use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"© 2025 HealthEase. All rights reserved."</p>
            <p>"Contact: +1 (234) 567-8901 | support@healthease.com"</p>
        </footer>
    }
}
