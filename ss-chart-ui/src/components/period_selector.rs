//! Button group for switching the period a chart shows.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PeriodSelectorProps {
    /// Called with the key of the pressed button
    pub on_select: EventHandler<String>,
}

/// One button per entry of `AppState::periods`; the active one is highlighted.
#[component]
pub fn PeriodSelector(props: PeriodSelectorProps) -> Element {
    let state = use_context::<AppState>();
    let active = (state.active_period)();
    let buttons: Vec<(String, String, &'static str)> = state
        .periods
        .read()
        .iter()
        .map(|option| {
            let style = if option.key == active {
                "padding: 4px 12px; border: 1px solid #333; background: #333; color: #fff; cursor: pointer;"
            } else {
                "padding: 4px 12px; border: 1px solid #333; background: #fff; color: #333; cursor: pointer;"
            };
            (option.key.clone(), option.title.clone(), style)
        })
        .collect();
    let on_select = props.on_select;

    rsx! {
        div {
            style: "display: flex; gap: 4px; margin-bottom: 8px;",
            role: "group",
            for (key, title, style) in buttons {
                button {
                    key: "{key}",
                    r#type: "button",
                    style: "{style}",
                    onclick: {
                        let key = key.clone();
                        move |_: Event<MouseData>| on_select.call(key.clone())
                    },
                    "{title}"
                }
            }
        }
    }
}
