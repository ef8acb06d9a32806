//! Preset buttons that restyle every panel at once.

use leptos::prelude::*;
use panels::Preset;

use crate::net::api::spawn_write;
use crate::state::panels::PanelsState;

#[component]
pub fn PresetBar() -> impl IntoView {
    let panels = expect_context::<RwSignal<PanelsState>>();

    let apply = move |preset: Preset| {
        let mut staged = None;
        panels.update(|s| staged = Some(s.apply_preset(preset)));
        if let Some(pending) = staged {
            spawn_write(panels, pending);
        }
    };

    view! {
        <section class="dashboard-section">
            <h2 class="dashboard-section__title">"Lighting Presets"</h2>
            <div class="preset-bar">
                {Preset::ALL
                    .into_iter()
                    .map(|preset| {
                        view! {
                            <button
                                class=format!("preset-button preset-button--{}", preset.as_str())
                                on:click=move |_| apply(preset)
                            >
                                {preset.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
