//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use panels::route::DASHBOARD_PATH;

use crate::pages::{
    dashboard::DashboardPage, login::LoginPage, reset_password::ResetPasswordPage, signup::SignupPage,
};
use crate::state::{auth::AuthState, panels::PanelsState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and panel contexts and sets up client-side routing.
/// The session lookup starts once on mount; until it answers, guarded pages
/// render their loading placeholder.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let panels = RwSignal::new(PanelsState::default());
    provide_context(auth);
    provide_context(panels);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let account = crate::net::api::fetch_current_account().await;
        auth.set(AuthState::resolved(account));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/fixlit.css"/>
        <Title text="Fixlit"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=DASHBOARD_PATH/> }>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
            </Routes>
        </Router>
    }
}
