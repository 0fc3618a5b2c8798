// Loading and error feedback shared by the pages.

use care_finder::{Notice, Severity};
use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent, Spinner, SpinnerSize};

#[component]
pub fn LoadingView(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading-container">
            <Spinner size=SpinnerSize::Large />
            <p class="loading-message">{message}</p>
        </div>
    }
}

#[component]
pub fn ErrorView(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {message}
        </MessageBar>
    }
}

/// Shows a finder notice with an intent matching its severity.
#[component]
pub fn NoticeBar(notice: Notice) -> impl IntoView {
    let intent = match notice.severity {
        Severity::Error => MessageBarIntent::Error,
        Severity::Warning => MessageBarIntent::Warning,
        Severity::Silent => MessageBarIntent::Info,
    };

    view! {
        <MessageBar intent=intent>
            {notice.message}
        </MessageBar>
    }
}
