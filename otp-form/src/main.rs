//! OTP confirmation page.
//!
//! The form itself is rendered by the server; this app only attaches to it:
//! spinner on submit, redirect to login after the success banner, and the
//! resend cooldown.

use anyhow::Context;
use ss_chart_ui::dom::{self, LocationNavigator, PageData, PageElements};
use ss_chart_ui::timers::BrowserScheduler;
use ss_core::config::PageConfig;
use ss_core::otp::{self, OtpElements, OtpFormController};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dom::on_page_ready(|| {
        if let Err(e) = run() {
            log::error!("otp-form: {:#}", e);
        }
    });
}

fn run() -> anyhow::Result<()> {
    let document = dom::document()?;
    let config = PageConfig::from_embedded(&PageData::new(document.clone()))
        .context("reading page config")?
        .otp;
    let page = PageElements::new(document, &config.hidden_class);
    let form = otp::find_form(&page, &config);
    let controller = OtpFormController::new(OtpElements::lookup(&page, &config), LocationNavigator, config);

    if let Some(form) = form {
        let submit = controller.clone();
        dom::on_submit(&form, move || submit.on_submit());
    }

    controller.start(&BrowserScheduler);
    log::info!("otp-form: ready");
    Ok(())
}
