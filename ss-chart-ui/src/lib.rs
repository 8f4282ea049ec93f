//! Browser side of the SmartSales pages.
//!
//! This crate provides:
//! - `js_bridge`: Chart.js backend for the `ss-core` chart contract
//! - `dom`: embedded data, elements and navigation over `web-sys`
//! - `timers`: `gloo-timers` scheduler
//! - `state`: reactive AppState with Dioxus Signals
//! - `components`: reusable RSX components (period buttons, chart canvas, ...)

pub mod components;
pub mod dom;
pub mod js_bridge;
pub mod state;
pub mod timers;
