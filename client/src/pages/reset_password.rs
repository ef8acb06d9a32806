//! Password reset request page.

use leptos::prelude::*;
use panels::form::RESET_SENT;
use panels::route::LOGIN_PATH;

use crate::components::alert::{Alert, AlertKind};
use crate::components::auth_layout::AuthLayout;
use crate::util::input::normalize_email_input;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = normalize_email_input(&email.get());
        if email_value.is_empty() {
            error.set(Some("Enter an email address".to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        notice.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::reset_password(&email_value).await {
                Ok(()) => notice.set(Some(RESET_SENT.to_owned())),
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email_value;
        }
    };

    view! {
        <AuthLayout title="Reset Password">
            <form class="auth-form" on:submit=on_submit>
                <Alert message=error.into() kind=AlertKind::Error/>
                <Alert message=notice.into() kind=AlertKind::Success/>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email address"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Sending..." } else { "Reset Password" }}
                </button>
            </form>
            <div class="auth-links">
                <a href=LOGIN_PATH>"Back to Sign In"</a>
            </div>
        </AuthLayout>
    }
}
