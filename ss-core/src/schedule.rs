use std::ops::ControlFlow;
use std::time::Duration;

/// Task run on every firing of a repeating timer.
/// Returning `ControlFlow::Break(())` cancels the timer for good.
pub type RepeatingTask = Box<dyn FnMut() -> ControlFlow<()>>;

/// Timer facility of the page's event loop.
///
/// Tasks run on the single UI thread, so they are not required to be `Send`.
pub trait Scheduler {
    /// Run `task` once after `delay`. One-shot timers are never cancelled.
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Run `task` every `period` until it returns `Break`.
    fn schedule_repeating(&self, period: Duration, task: RepeatingTask);
}
