use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="homepage-container">
            <div class="hero">
                <h1>"Welcome to " <span class="highlight">"HealthEase"</span></h1>
                <p class="tagline">
                    "Simplifying healthcare with smart tools and intuitive access."
                </p>
            </div>

            <div class="hero__actions">
                <A href="/maps">
                    <button class="btn-primary">"Find Care Nearby"</button>
                </A>
                <A href="/askai">
                    <button class="btn-outlined">"Ask AI"</button>
                </A>
            </div>

            <div class="features">
                <div class="feature">
                    <h3>"🧠 AI-Powered Assistance"</h3>
                    <p>"Get instant answers to your health questions with our intelligent AskAI assistant."</p>
                </div>
                <div class="feature">
                    <h3>"📍 Health Maps"</h3>
                    <p>"Quickly locate hospitals, clinics, and pharmacies near you in real-time."</p>
                </div>
                <div class="feature">
                    <h3>"📅 Appointment Management"</h3>
                    <p>"Book and manage appointments effortlessly with a seamless scheduling system."</p>
                </div>
            </div>
        </div>
    }
}
