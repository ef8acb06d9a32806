//! Session guard for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server guards the first page load; this guard covers in-app
//! navigation and sign-out. It re-evaluates whenever the auth context
//! changes and never redirects while the session lookup is still running.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use panels::route::{Resolution, Route, guard};

use crate::state::auth::AuthState;

/// Where a protected route should send this session, if anywhere.
#[must_use]
pub fn unauth_redirect(route: Route, state: &AuthState) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    match guard(route, state.account.as_ref()) {
        Resolution::Render(_) => None,
        Resolution::Redirect(to) => Some(to),
    }
}

/// Redirect to `/login` whenever auth has loaded and no account is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, route: Route, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(to) = unauth_redirect(route, &auth.get()) {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Renders `children` only for a signed-in session.
#[component]
pub fn SessionGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, Route::Dashboard, use_navigate());

    view! {
        <Show
            when=move || auth.get().account.is_some()
            fallback=move || {
                let text = if auth.get().loading { "Loading..." } else { "Redirecting to sign in..." };
                view! { <div class="guard-placeholder">{text}</div> }
            }
        >
            {children()}
        </Show>
    }
}

