//! Revenue trend chart of the SmartSales dashboard.
//!
//! Data flow:
//! 1. The dashboard template embeds `daily_labels`, `daily_data`,
//!    `weekly_*` and `monthly_*` as JSON script elements.
//! 2. Once the page is ready the app mounts, renders the canvas and the
//!    period buttons, and builds a `TrendChartController` over Chart.js.
//! 3. Buttons and `window.updateChart(period)` switch the period.

use anyhow::Context;
use dioxus::prelude::*;
use ss_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, PeriodSelector};
use ss_chart_ui::dom::{self, PageData};
use ss_chart_ui::js_bridge::{ChartJsBackend, ChartJsHandle};
use ss_chart_ui::state::{AppState, PeriodOption};
use ss_core::config::{PageConfig, TrendChartConfig};
use ss_core::period::Period;
use ss_core::trend::TrendChartController;
use std::cell::RefCell;
use std::rc::Rc;

/// Element the app mounts into.
const ROOT_ID: &str = "sales-trend-root";

/// Name of the global other page scripts call to switch the period.
const GLOBAL_SWITCH: &str = "updateChart";

type SharedController = Rc<RefCell<Option<TrendChartController<ChartJsHandle>>>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dom::on_page_ready(|| {
        dioxus::LaunchBuilder::new()
            .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
            .launch(App);
    });
}

fn load_config() -> anyhow::Result<TrendChartConfig> {
    let page = PageData::from_window()?;
    let config = PageConfig::from_embedded(&page).context("reading page config")?;
    Ok(config.trend)
}

fn mount_chart(config: &TrendChartConfig) -> anyhow::Result<TrendChartController<ChartJsHandle>> {
    let page = PageData::from_window()?;
    TrendChartController::init(&ChartJsBackend::new(), &page, config).context("rendering revenue chart")
}

/// Switch the chart and highlight the new period.
/// Buttons and `window.updateChart` both land here.
fn select(controller: &SharedController, mut state: AppState, key: &str) {
    let mut slot = controller.borrow_mut();
    let Some(chart) = slot.as_mut() else {
        log::warn!("trend: switch to {} before the chart exists", key);
        return;
    };
    match chart.switch_period_key(key) {
        Ok(()) => state.active_period.set(chart.active_period().key().to_string()),
        Err(e) => log::warn!("trend: {}", e),
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
        .unwrap_or_else(|_| TrendChartConfig::default().canvas_id);

    // ─── Build the chart once the canvas is in the DOM ───
    {
        let controller = controller.clone();
        let config = config.clone();
        use_effect(move || {
            let mounted = config
                .clone()
                .map_err(anyhow::Error::msg)
                .and_then(|c| mount_chart(&c));
            match mounted {
                Ok(chart) => {
                    state.periods.set(
                        Period::ALL
                            .iter()
                            .map(|p| PeriodOption::new(p.key(), p.title()))
                            .collect(),
                    );
                    state.active_period.set(chart.active_period().key().to_string());
                    *controller.borrow_mut() = Some(chart);

                    let global = controller.clone();
                    dom::install_global(GLOBAL_SWITCH, move |key| select(&global, state, &key));
                }
                Err(e) => {
                    log::error!("trend: {:#}", e);
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

    // ─── Render ───
    rsx! {
        div {
            style: "padding: 16px; border: 1px solid #ddd; border-radius: 4px;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            ChartHeader { title: "Revenue Trend".to_string() }

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
