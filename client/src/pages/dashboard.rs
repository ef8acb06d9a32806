//! Dashboard page: four lighting panels with presets and sync-all.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the guarded landing route. Content mounts only for a signed-in
//! session; mounting opens the panel stream and unmounting closes it. All
//! panel edits go through `PanelsState` and are written back by
//! `net::api::spawn_write`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use panels::PanelKey;
#[cfg(feature = "hydrate")]
use panels::form::LOG_OUT_FAILED;
#[cfg(feature = "hydrate")]
use panels::route::LOGIN_PATH;

use crate::components::alert::{Alert, AlertKind};
use crate::components::panel_card::PanelCard;
use crate::components::preset_bar::PresetBar;
use crate::components::sync_bar::SyncBar;
use crate::state::auth::AuthState;
use crate::state::panels::{PanelsState, StreamStatus};
use crate::util::auth::SessionGuard;

#[must_use]
pub fn status_label(status: StreamStatus) -> &'static str {
    match status {
        StreamStatus::Connecting => "Connecting...",
        StreamStatus::Live => "Live",
        StreamStatus::Reconnecting => "Reconnecting...",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <SessionGuard>
            <DashboardContent/>
        </SessionGuard>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let panels = expect_context::<RwSignal<PanelsState>>();

    #[cfg(feature = "hydrate")]
    crate::net::panel_stream::open_panel_stream(panels);

    let on_logout = {
        #[cfg(feature = "hydrate")]
        let navigate = leptos_router::hooks::use_navigate();
        move |_| {
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    match crate::net::api::logout().await {
                        Ok(()) => {
                            auth.set(AuthState::resolved(None));
                            panels.set(PanelsState::default());
                            navigate(LOGIN_PATH, leptos_router::NavigateOptions::default());
                        }
                        Err(e) => log::error!("{LOG_OUT_FAILED}: {e}"),
                    }
                });
            }
        }
    };

    let banner = Signal::derive(move || panels.with(|s| s.error.clone()));
    let status = Memo::new(move |_| panels.with(|s| s.status));

    view! {
        <div class="dashboard-page">
            <nav class="dashboard-nav">
                <h1 class="dashboard-nav__title">"Smart Home Panel"</h1>
                <span class=move || format!("stream-status stream-status--{:?}", status.get()).to_lowercase()>
                    {move || status_label(status.get())}
                </span>
                <span class="dashboard-nav__user">{move || auth.with(|a| a.email().unwrap_or_default().to_owned())}</span>
                <button class="dashboard-nav__logout" on:click=on_logout>"Logout"</button>
            </nav>
            <main class="dashboard-main">
                <Alert message=banner kind=AlertKind::Error/>
                <PresetBar/>
                <SyncBar/>
                <div class="panel-grid">
                    {PanelKey::ALL.into_iter().map(|panel_key| view! { <PanelCard panel_key=panel_key/> }).collect_view()}
                </div>
            </main>
        </div>
    }
}
