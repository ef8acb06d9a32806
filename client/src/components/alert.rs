//! Inline message banners shared by the auth forms and the dashboard.

use leptos::prelude::*;

/// Visual weight of an [`Alert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "alert alert--error",
            Self::Success => "alert alert--success",
        }
    }
}

/// Banner shown while `message` holds text.
#[component]
pub fn Alert(message: Signal<Option<String>>, kind: AlertKind) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class=kind.class() role="alert">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
