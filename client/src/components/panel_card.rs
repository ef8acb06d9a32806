//! One panel's controls: power toggle and RGB/brightness sliders.
//!
//! DESIGN
//! ======
//! Every change is staged optimistically in [`PanelsState`] and then sent
//! through [`spawn_write`]; the card re-renders from local state at once.
//! While the panel has no value yet the card shows a loading placeholder
//! and accepts no input.

#[cfg(test)]
#[path = "panel_card_test.rs"]
mod panel_card_test;

use leptos::prelude::*;
use panels::{Panel, PanelKey, PanelUpdate};

use crate::net::api::spawn_write;
use crate::state::panels::PanelsState;
use crate::util::input::{SLIDER_FIELDS, slider_max, slider_update};

#[must_use]
pub fn power_label(on: bool) -> &'static str {
    if on { "Turn Off" } else { "Turn On" }
}

/// Current value of a slider field.
#[must_use]
pub fn slider_value(panel: &Panel, field: &str) -> u8 {
    match field {
        "red" => panel.red,
        "green" => panel.green,
        "blue" => panel.blue,
        _ => panel.brightness,
    }
}

fn power_class(on: bool) -> &'static str {
    if on { "panel-card__power panel-card__power--on" } else { "panel-card__power" }
}

fn slider_label(field: &str) -> String {
    let mut chars = field.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default()
}

fn stage(panels: RwSignal<PanelsState>, key: PanelKey, update: PanelUpdate) {
    let mut staged = None;
    panels.update(|s| staged = s.update_field(key, update).ok());
    if let Some(pending) = staged {
        spawn_write(panels, pending);
    }
}

#[component]
pub fn PanelCard(panel_key: PanelKey) -> impl IntoView {
    let panels = expect_context::<RwSignal<PanelsState>>();
    let panel = Memo::new(move |_| panels.with(|s| s.panel(panel_key)));

    view! {
        <div class="panel-card">
            <h3 class="panel-card__title">{format!("Panel {}", panel_key.number())}</h3>
            <Show
                when=move || panel.get().is_some()
                fallback=|| view! { <p class="panel-card__loading">"Loading..."</p> }
            >
                <PanelControls panel_key=panel_key panel=panel panels=panels/>
            </Show>
        </div>
    }
}

#[component]
fn PanelControls(panel_key: PanelKey, panel: Memo<Option<Panel>>, panels: RwSignal<PanelsState>) -> impl IntoView {
    let on = move || panel.get().is_some_and(|p| p.power);
    let swatch = move || {
        let color = panel.get().filter(|p| p.power).map_or_else(|| "transparent".to_owned(), |p| p.css_color());
        format!("background-color: {color}")
    };

    view! {
        <div class="panel-card__swatch" style=swatch></div>
        <button class=move || power_class(on()) on:click=move |_| stage(panels, panel_key, PanelUpdate::Power(!on()))>
            {move || power_label(on())}
        </button>
        {SLIDER_FIELDS
            .into_iter()
            .map(|field| {
                let value = move || panel.get().map_or(0, |p| slider_value(&p, field));
                view! {
                    <label class="panel-card__slider">
                        <span>{move || format!("{}: {}", slider_label(field), value())}</span>
                        <input
                            type="range"
                            min="0"
                            max=slider_max(field).to_string()
                            prop:value=move || value().to_string()
                            on:input=move |ev| {
                                if let Some(update) = slider_update(field, &event_target_value(&ev)) {
                                    stage(panels, panel_key, update);
                                }
                            }
                        />
                    </label>
                }
            })
            .collect_view()}
    }
}
