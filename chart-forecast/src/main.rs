//! Sales forecast chart of the SmartSales dashboard.
//!
//! The template embeds a single `forecast-data` element mapping each
//! horizon (`day`, `week`, `month`) to its current and forecast totals.
//! The chart compares the two; buttons and
//! `window.updateForecastChart(period)` switch the horizon.

use anyhow::Context;
use dioxus::prelude::*;
use ss_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, PeriodSelector};
use ss_chart_ui::dom::{self, PageData};
use ss_chart_ui::js_bridge::{ChartJsBackend, ChartJsHandle};
use ss_chart_ui::state::{AppState, PeriodOption};
use ss_core::config::{ForecastChartConfig, PageConfig};
use ss_core::forecast::ForecastChartController;
use std::cell::RefCell;
use std::rc::Rc;

const ROOT_ID: &str = "forecast-root";

const GLOBAL_SWITCH: &str = "updateForecastChart";

type SharedController = Rc<RefCell<Option<ForecastChartController<ChartJsHandle>>>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dom::on_page_ready(|| {
        dioxus::LaunchBuilder::new()
            .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
            .launch(App);
    });
}

fn load_config() -> anyhow::Result<ForecastChartConfig> {
    let page = PageData::from_window()?;
    let config = PageConfig::from_embedded(&page).context("reading page config")?;
    Ok(config.forecast)
}

fn mount_chart(config: &ForecastChartConfig) -> anyhow::Result<ForecastChartController<ChartJsHandle>> {
    let page = PageData::from_window()?;
    ForecastChartController::init(&ChartJsBackend::new(), &page, config).context("rendering forecast chart")
}

/// "day" -> "Day"
fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Switch the chart, then show its horizon and growth around it.
/// Buttons and `window.updateForecastChart` both land here.
fn select(controller: &SharedController, mut state: AppState, key: &str) {
    let mut slot = controller.borrow_mut();
    let Some(chart) = slot.as_mut() else {
        log::warn!("forecast: switch to {} before the chart exists", key);
        return;
    };
    if let Err(e) = chart.switch_forecast(key) {
        log::warn!("forecast: {}", e);
        return;
    }
    state.growth.set(chart.active_growth());
    state.active_period.set(key.to_string());
}

fn growth_note(growth: Option<f64>) -> String {
    match growth {
        Some(pct) => format!("Forecast vs current: {:+.2}%", pct),
        None => String::new(),
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let controller: SharedController = use_hook(|| Rc::new(RefCell::new(None)));
    let config = use_hook(|| load_config().map_err(|e| format!("{:#}", e)));
    let canvas_id = config
        .as_ref()
        .map(|c| c.canvas_id.clone())
        .unwrap_or_else(|_| ForecastChartConfig::default().canvas_id);

    // ─── Build the chart once the canvas is in the DOM ───
    {
        let controller = controller.clone();
        let config = config.clone();
        use_effect(move || {
            let mounted = config
                .clone()
                .map_err(anyhow::Error::msg)
                .and_then(|c| Ok((mount_chart(&c)?, c)));
            match mounted {
                Ok((chart, c)) => {
                    let options = chart
                        .series()
                        .ordered_keys(&c.periods)
                        .iter()
                        .map(|key| PeriodOption::new(key, &title_case(key)))
                        .collect();
                    state.periods.set(options);
                    state.growth.set(chart.active_growth());
                    if let Some(active) = chart.active_period() {
                        state.active_period.set(active.to_string());
                    }
                    *controller.borrow_mut() = Some(chart);

                    let global = controller.clone();
                    dom::install_global(GLOBAL_SWITCH, move |key| select(&global, state, &key));
                }
                Err(e) => {
                    log::error!("forecast: {:#}", e);
                    state.error_msg.set(Some(format!("{:#}", e)));
                }
            }
            state.loading.set(false);
        });
    }

    let on_select = {
        let controller = controller.clone();
        move |key: String| select(&controller, state, &key)
    };

    let note = growth_note((state.growth)());

    // ─── Render ───
    rsx! {
        div {
            style: "padding: 16px; border: 1px solid #ddd; border-radius: 4px;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            ChartHeader {
                title: "Sales Forecast".to_string(),
                note: note,
            }

            PeriodSelector { on_select: on_select }

            if *state.loading.read() {
                LoadingSpinner {}
            }

            ChartContainer {
                canvas_id: canvas_id,
                loading: *state.loading.read(),
            }
        }
    }
}
