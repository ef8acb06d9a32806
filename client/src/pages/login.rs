//! Email + password sign-in page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use panels::route::{RESET_PASSWORD_PATH, SIGNUP_PATH};

use crate::components::alert::{Alert, AlertKind};
use crate::components::auth_layout::AuthLayout;
use crate::util::input::normalize_email_input;

/// Trimmed credentials, or the prompt to show when one is missing.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = normalize_email_input(email);
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email, password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<crate::state::auth::AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&email_value, &password_value).await {
                    Ok(account) => {
                        auth.set(crate::state::auth::AuthState::resolved(Some(account)));
                        navigate(panels::route::DASHBOARD_PATH, leptos_router::NavigateOptions::default());
                    }
                    Err(e) => error.set(Some(e)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value);
        }
    };

    view! {
        <AuthLayout title="Sign in to your account">
            <form class="auth-form" on:submit=on_submit>
                <Alert message=error.into() kind=AlertKind::Error/>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email address"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <div class="auth-links">
                <a href=RESET_PASSWORD_PATH>"Forgot your password?"</a>
                <a href=SIGNUP_PATH>"Create an account"</a>
            </div>
        </AuthLayout>
    }
}
