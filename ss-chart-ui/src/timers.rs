//! Browser timers behind the `Scheduler` trait, via `gloo-timers`.

use gloo_timers::callback::{Interval, Timeout};
use ss_core::schedule::{RepeatingTask, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// `setTimeout` / `setInterval` of the current window.
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        Timeout::new(millis(delay), task).forget();
    }

    fn schedule_repeating(&self, period: Duration, mut task: RepeatingTask) {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::default();
        let own_handle = Rc::clone(&slot);
        let interval = Interval::new(millis(period), move || {
            if task().is_continue() {
                return;
            }
            if let Some(interval) = own_handle.borrow_mut().take() {
                // Dropping an Interval clears it and frees its closure, which is
                // the one running right now; defer that past this callback.
                wasm_bindgen_futures::spawn_local(async move { drop(interval) });
            }
        });
        *slot.borrow_mut() = Some(interval);
    }
}
