//! Test doubles for the browser-facing traits.

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::error::{CoreError, Result};
use crate::otp::{ElementLookup, Navigator, UiElement};
use crate::schedule::{RepeatingTask, Scheduler};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Labels and per-dataset values of a chart at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Vec<f64>>,
}

/// What a recorded chart has staged and what it last drew.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub canvas_id: String,
    pub staged: ChartData,
    pub rendered: ChartData,
    pub redraws: usize,
}

impl ChartState {
    pub fn rendered_labels(&self) -> Vec<String> {
        self.rendered.labels.clone()
    }

    pub fn rendered_values(&self) -> Vec<f64> {
        self.rendered.datasets.first().cloned().unwrap_or_default()
    }
}

/// Chart handle writing into shared state the test keeps a reference to.
pub struct RecordingChart {
    state: Rc<RefCell<ChartState>>,
}

impl ChartHandle for RecordingChart {
    fn set_labels(&mut self, labels: &[String]) {
        self.state.borrow_mut().staged.labels = labels.to_vec();
    }

    fn set_series_data(&mut self, dataset: usize, values: &[f64]) {
        let mut state = self.state.borrow_mut();
        if state.staged.datasets.len() <= dataset {
            state.staged.datasets.resize(dataset + 1, Vec::new());
        }
        state.staged.datasets[dataset] = values.to_vec();
    }

    fn redraw(&mut self) {
        let mut state = self.state.borrow_mut();
        state.rendered = state.staged.clone();
        state.redraws += 1;
    }
}

#[derive(Default)]
pub struct RecordingBackend {
    charts: RefCell<Vec<Rc<RefCell<ChartState>>>>,
    failure: Option<String>,
}

impl RecordingBackend {
    /// A backend whose every `construct` fails, like a page without Chart.js.
    pub fn failing(reason: &str) -> Self {
        Self {
            charts: RefCell::default(),
            failure: Some(reason.to_string()),
        }
    }

    pub fn constructed(&self) -> usize {
        self.charts.borrow().len()
    }

    /// Snapshot of the most recently constructed chart.
    pub fn last(&self) -> ChartState {
        self.charts
            .borrow()
            .last()
            .map(|chart| chart.borrow().clone())
            .unwrap_or_default()
    }
}

impl ChartBackend for RecordingBackend {
    type Handle = RecordingChart;

    fn construct(&self, config: &ChartConfig) -> Result<RecordingChart> {
        if let Some(reason) = &self.failure {
            return Err(CoreError::Render(reason.clone()));
        }
        let data = ChartData {
            labels: config.labels.clone(),
            datasets: vec![config.values.clone()],
        };
        let state = Rc::new(RefCell::new(ChartState {
            canvas_id: config.canvas_id.clone(),
            staged: data.clone(),
            rendered: data,
            redraws: 0,
        }));
        self.charts.borrow_mut().push(state.clone());
        Ok(RecordingChart { state })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub visible: bool,
    pub disabled: bool,
    pub text: String,
}

/// In-memory stand-in for a DOM element. Clones share state.
#[derive(Debug, Clone)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(ElementState {
                visible: true,
                disabled: false,
                text: text.to_string(),
            })),
        }
    }

    pub fn hidden() -> Self {
        let element = Self::new("");
        element.state.borrow_mut().visible = false;
        element
    }

    pub fn visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }
}

impl UiElement for FakeElement {
    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }
}

/// A page of fake elements. Ids and selectors share one namespace, so
/// `query(".alert-success")` finds the element added under that key.
#[derive(Default)]
pub struct FakePage {
    elements: BTreeMap<String, FakeElement>,
}

impl FakePage {
    pub fn with(mut self, key: &str, element: FakeElement) -> Self {
        self.elements.insert(key.to_string(), element);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.elements.remove(key);
        self
    }
}

impl ElementLookup for FakePage {
    type Element = FakeElement;

    fn by_id(&self, id: &str) -> Option<FakeElement> {
        self.elements.get(id).cloned()
    }

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.elements.get(selector).cloned()
    }
}

/// Records every navigation together with the virtual time it happened at.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    clock: Option<ManualScheduler>,
    visits: Rc<RefCell<Vec<(String, Duration)>>>,
}

impl RecordingNavigator {
    pub fn with_clock(clock: &ManualScheduler) -> Self {
        Self {
            clock: Some(clock.clone()),
            visits: Rc::default(),
        }
    }

    pub fn visits(&self) -> Vec<(String, Duration)> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        let at = self.clock.as_ref().map(|c| c.now()).unwrap_or_default();
        self.visits.borrow_mut().push((path.to_string(), at));
    }
}

enum TaskKind {
    Once(Box<dyn FnOnce()>),
    Repeating(Duration, RepeatingTask),
}

struct Entry {
    seq: u64,
    due: Duration,
    kind: TaskKind,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry>,
    fired: usize,
}

impl Timeline {
    fn push(&mut self, due: Duration, kind: TaskKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { seq, due, kind });
    }
}

/// Virtual-time scheduler. Nothing runs until [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

impl ManualScheduler {
    pub fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    /// Timers still scheduled to fire.
    pub fn pending(&self) -> usize {
        self.timeline.borrow().entries.len()
    }

    /// Total task invocations so far.
    pub fn fired(&self) -> usize {
        self.timeline.borrow().fired
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Move the clock forward, running every task that comes due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let entry = {
                let mut timeline = self.timeline.borrow_mut();
                let next = timeline
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.seq))
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let entry = timeline.entries.remove(i);
                        timeline.now = entry.due;
                        timeline.fired += 1;
                        entry
                    }
                    None => {
                        timeline.now = target;
                        break;
                    }
                }
            };
            // borrow released: tasks may schedule more work
            match entry.kind {
                TaskKind::Once(task) => task(),
                TaskKind::Repeating(period, mut task) => {
                    if task().is_continue() {
                        let mut timeline = self.timeline.borrow_mut();
                        timeline.entries.push(Entry {
                            seq: entry.seq,
                            due: entry.due + period,
                            kind: TaskKind::Repeating(period, task),
                        });
                    }
                }
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + delay;
        timeline.push(due, TaskKind::Once(task));
    }

    fn schedule_repeating(&self, period: Duration, task: RepeatingTask) {
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + period;
        timeline.push(due, TaskKind::Repeating(period, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn test_manual_scheduler_orders_by_due_time() {
        let scheduler = ManualScheduler::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        scheduler.schedule_once(Duration::from_millis(300), Box::new(move || l.borrow_mut().push("late")));
        let l = log.clone();
        scheduler.schedule_once(Duration::from_millis(100), Box::new(move || l.borrow_mut().push("early")));

        scheduler.advance_ms(99);
        assert!(log.borrow().is_empty());
        scheduler.advance_ms(250);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(349));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_repeating_task_stops_on_break() {
        let scheduler = ManualScheduler::default();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        scheduler.schedule_repeating(
            Duration::from_millis(10),
            Box::new(move || {
                *c.borrow_mut() += 1;
                if *c.borrow() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }),
        );
        scheduler.advance_ms(1_000);
        assert_eq!(*count.borrow(), 3);
        assert_eq!(scheduler.pending(), 0);
    }
}
