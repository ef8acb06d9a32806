//! Source picker and "sync all" action.

#[cfg(test)]
#[path = "sync_bar_test.rs"]
mod sync_bar_test;

use leptos::prelude::*;
use panels::PanelKey;

use crate::net::api::spawn_write;
use crate::state::panels::PanelsState;

/// Button caption for copying `source` to every panel.
#[must_use]
pub fn sync_label(source: PanelKey) -> String {
    format!("Sync All Panels to Panel {}", source.number())
}

#[component]
pub fn SyncBar() -> impl IntoView {
    let panels = expect_context::<RwSignal<PanelsState>>();
    let source = Memo::new(move |_| panels.with(|s| s.sync_source));
    let source_ready = Memo::new(move |_| panels.with(|s| s.panel(s.sync_source).is_some()));

    let on_select = move |ev: leptos::ev::Event| {
        if let Ok(key) = event_target_value(&ev).parse::<PanelKey>() {
            panels.update(|s| s.sync_source = key);
        }
    };

    let on_sync = move |_| {
        let mut staged = None;
        panels.update(|s| staged = s.sync_all().ok());
        if let Some(pending) = staged {
            spawn_write(panels, pending);
        }
    };

    view! {
        <section class="dashboard-section">
            <h2 class="dashboard-section__title">"Select Panel to Sync"</h2>
            <div class="sync-bar">
                <select class="sync-bar__select" on:change=on_select prop:value=move || source.get().as_str()>
                    {PanelKey::ALL
                        .into_iter()
                        .map(|key| {
                            view! { <option value=key.as_str()>{format!("Panel {}", key.number())}</option> }
                        })
                        .collect_view()}
                </select>
                <button class="sync-bar__button" on:click=on_sync disabled=move || !source_ready.get()>
                    {move || sync_label(source.get())}
                </button>
            </div>
        </section>
    }
}
