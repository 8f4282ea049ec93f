//! Page controllers for the SmartSales dashboard and account pages.
//!
//! Nothing in this crate touches the browser. Charts, DOM elements, timers
//! and navigation are reached through the small traits in [`chart`],
//! [`otp`] and [`schedule`]; `ss-chart-ui` implements them on top of
//! Chart.js, `web-sys` and `gloo-timers`.
//!
//! - `trend`: revenue trend chart with daily/weekly/monthly switching
//! - `forecast`: current-vs-forecast comparison chart
//! - `otp`: submit spinner, success redirect and resend countdown
//! - `embedded`: reading JSON the server embeds in the page

pub mod chart;
pub mod config;
pub mod countdown;
pub mod embedded;
pub mod error;
pub mod forecast;
pub mod otp;
pub mod period;
pub mod schedule;
pub mod series;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CoreError, Result};
