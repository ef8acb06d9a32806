//! Account creation page.
//!
//! Input is checked locally with [`validate_signup`] before any request is
//! made, so mismatched or short passwords never reach the account provider.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use panels::form::validate_signup;
use panels::route::LOGIN_PATH;

use crate::components::alert::{Alert, AlertKind};
use crate::components::auth_layout::AuthLayout;
use crate::util::input::normalize_email_input;

/// Normalized email when the form may be submitted, else the banner text.
pub(crate) fn precheck_signup(email: &str, password: &str, confirm_password: &str) -> Result<String, String> {
    let email = normalize_email_input(email);
    validate_signup(&email, password, confirm_password).map_err(|e| e.to_string())?;
    Ok(email)
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
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
        let password_value = password.get();
        let confirm_value = confirm.get();
        let email_value = match precheck_signup(&email.get(), &password_value, &confirm_value) {
            Ok(email_value) => email_value,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::signup(&email_value, &password_value, &confirm_value).await {
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
            let _ = (email_value, password_value, confirm_value);
        }
    };

    view! {
        <AuthLayout title="Create your account">
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
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm password"
                    required
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <div class="auth-links">
                <a href=LOGIN_PATH>"Sign in instead"</a>
            </div>
        </AuthLayout>
    }
}
