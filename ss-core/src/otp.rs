//! Behaviors of the OTP confirmation page.
//!
//! Three independent pieces, all started once the page is ready:
//! - submit feedback: show the spinner and disable the submit button
//! - success redirect: go to the login page a few seconds after the
//!   server rendered its success banner
//! - resend countdown: keep "resend" disabled until the cooldown expires
//!
//! The same script serves the password reset pages, which have a form and
//! may show the banner but carry no countdown. A missing countdown only
//! switches the countdown off.

use crate::config::OtpConfig;
use crate::countdown::{CountdownState, CountdownStep};
use crate::error::{CoreError, Result};
use crate::schedule::Scheduler;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;

/// The slice of a DOM element the controller writes to.
pub trait UiElement {
    fn set_visible(&self, visible: bool);
    fn set_disabled(&self, disabled: bool);
    fn set_text(&self, text: &str);
}

/// Page navigation.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Finds elements of the current page.
pub trait ElementLookup {
    type Element;

    /// Element with this id.
    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;
}

fn optional<L: ElementLookup + ?Sized>(page: &L, id: &str) -> Option<L::Element> {
    let element = page.by_id(id);
    if element.is_none() {
        log::warn!("otp: no #{} on page, skipping it", id);
    }
    element
}

fn required<L: ElementLookup + ?Sized>(page: &L, id: &str) -> Result<L::Element> {
    page.by_id(id).ok_or_else(|| CoreError::MissingElement(id.to_string()))
}

/// The form whose submission shows the spinner, if the page has one.
pub fn find_form<L: ElementLookup + ?Sized>(page: &L, config: &OtpConfig) -> Option<L::Element> {
    let form = page.query(&config.form_selector);
    if form.is_none() {
        log::warn!("otp: no form matches '{}'", config.form_selector);
    }
    form
}

/// Resend button and the seconds display next to it.
pub struct CountdownElements<E> {
    pub resend: E,
    pub countdown: E,
}

impl<E> CountdownElements<E> {
    /// Both elements are required; either one missing is `MissingElement`.
    pub fn lookup<L>(page: &L, config: &OtpConfig) -> Result<Self>
    where
        L: ElementLookup<Element = E> + ?Sized,
    {
        Ok(Self {
            resend: required(page, &config.resend_id)?,
            countdown: required(page, &config.countdown_id)?,
        })
    }
}

/// Elements of the OTP page, looked up once before the controller is built.
pub struct OtpElements<E> {
    pub spinner: Option<E>,
    pub submit: Option<E>,
    /// `None` when the page lacks the resend button or the countdown display
    pub countdown: Option<CountdownElements<E>>,
    /// Whether the server rendered the success banner
    pub success_banner: bool,
}

impl<E> OtpElements<E> {
    /// Look up every element the controller touches. Never fails: missing
    /// pieces are logged and only disable the behavior that needs them.
    pub fn lookup<L>(page: &L, config: &OtpConfig) -> Self
    where
        L: ElementLookup<Element = E> + ?Sized,
    {
        let countdown = match CountdownElements::lookup(page, config) {
            Ok(elements) => Some(elements),
            Err(e) => {
                log::warn!("otp: resend countdown disabled: {}", e);
                None
            }
        };
        Self {
            spinner: optional(page, &config.spinner_id),
            submit: optional(page, &config.submit_id),
            countdown,
            success_banner: page.query(&config.success_selector).is_some(),
        }
    }
}

struct Inner<E, N> {
    elements: OtpElements<E>,
    navigator: N,
    config: OtpConfig,
    countdown: RefCell<CountdownState>,
}

/// Drives the OTP page. Clones share the same state.
pub struct OtpFormController<E, N> {
    inner: Rc<Inner<E, N>>,
}

impl<E, N> Clone for OtpFormController<E, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E, N> OtpFormController<E, N>
where
    E: UiElement + 'static,
    N: Navigator + 'static,
{
    pub fn new(elements: OtpElements<E>, navigator: N, config: OtpConfig) -> Self {
        let countdown = RefCell::new(CountdownState::new(config.countdown_seconds));
        Self {
            inner: Rc::new(Inner {
                elements,
                navigator,
                config,
                countdown,
            }),
        }
    }

    /// Start the timers: redirect (if the banner is shown) and countdown.
    pub fn start<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        self.schedule_redirect(scheduler);
        self.start_countdown(scheduler);
    }

    /// Submit handler. Must not cancel the submission itself.
    pub fn on_submit(&self) {
        let elements = &self.inner.elements;
        if let Some(spinner) = &elements.spinner {
            spinner.set_visible(true);
        }
        if let Some(submit) = &elements.submit {
            submit.set_disabled(true);
        }
        log::info!("otp: form submitted");
    }

    /// Schedule the one-shot redirect. Returns whether a timer was scheduled.
    pub fn schedule_redirect<S: Scheduler + ?Sized>(&self, scheduler: &S) -> bool {
        if !self.inner.elements.success_banner {
            return false;
        }
        let inner = Rc::clone(&self.inner);
        let delay = Duration::from_millis(inner.config.redirect_delay_ms);
        log::info!(
            "otp: success shown, redirecting to {} in {:?}",
            inner.config.login_path,
            delay
        );
        scheduler.schedule_once(
            delay,
            Box::new(move || inner.navigator.navigate(&inner.config.login_path)),
        );
        true
    }

    /// Show the initial count, disable resend and start ticking.
    /// Returns whether the countdown started.
    pub fn start_countdown<S: Scheduler + ?Sized>(&self, scheduler: &S) -> bool {
        let Some(elements) = &self.inner.elements.countdown else {
            return false;
        };
        let remaining = self.inner.countdown.borrow().remaining();
        elements.countdown.set_text(&remaining.to_string());
        elements.resend.set_disabled(true);

        let inner = Rc::clone(&self.inner);
        let period = Duration::from_millis(inner.config.tick_ms);
        scheduler.schedule_repeating(
            period,
            Box::new(move || {
                let Some(elements) = &inner.elements.countdown else {
                    return ControlFlow::Break(());
                };
                let step = inner.countdown.borrow_mut().tick();
                let remaining = inner.countdown.borrow().remaining();
                elements.countdown.set_text(&remaining.to_string());
                match step {
                    CountdownStep::Counting(_) => ControlFlow::Continue(()),
                    CountdownStep::Expired => {
                        elements.resend.set_disabled(false);
                        elements.resend.set_text(&inner.config.resend_label);
                        log::info!("otp: resend enabled");
                        ControlFlow::Break(())
                    }
                }
            }),
        );
        true
    }

    pub fn countdown(&self) -> CountdownState {
        *self.inner.countdown.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakePage, ManualScheduler, RecordingNavigator};

    struct Page {
        spinner: FakeElement,
        submit: FakeElement,
        resend: FakeElement,
        countdown: FakeElement,
    }

    impl Page {
        fn new() -> Self {
            Self {
                spinner: FakeElement::hidden(),
                submit: FakeElement::new("Verify"),
                resend: FakeElement::new("Resend in"),
                countdown: FakeElement::new(""),
            }
        }

        fn elements(&self, success_banner: bool) -> OtpElements<FakeElement> {
            OtpElements {
                spinner: Some(self.spinner.clone()),
                submit: Some(self.submit.clone()),
                countdown: Some(CountdownElements {
                    resend: self.resend.clone(),
                    countdown: self.countdown.clone(),
                }),
                success_banner,
            }
        }

        /// The same elements, as the DOM would expose them.
        fn dom(&self) -> FakePage {
            FakePage::default()
                .with("form", FakeElement::new(""))
                .with("spinner", self.spinner.clone())
                .with("submit-btn", self.submit.clone())
                .with("resendBtn", self.resend.clone())
                .with("countdown", self.countdown.clone())
        }
    }

    fn build(
        page: &Page,
        success_banner: bool,
        scheduler: &ManualScheduler,
    ) -> (OtpFormController<FakeElement, RecordingNavigator>, RecordingNavigator) {
        let navigator = RecordingNavigator::with_clock(scheduler);
        let controller = OtpFormController::new(
            page.elements(success_banner),
            navigator.clone(),
            OtpConfig::default(),
        );
        (controller, navigator)
    }

    #[test]
    fn test_lookup_finds_every_element() {
        let page = Page::new();
        let dom = page.dom().with(".alert-success", FakeElement::new("Verified"));
        let config = OtpConfig::default();

        let elements = OtpElements::lookup(&dom, &config);
        assert!(elements.spinner.is_some());
        assert!(elements.submit.is_some());
        assert!(elements.countdown.is_some());
        assert!(elements.success_banner);
        assert!(find_form(&dom, &config).is_some());
    }

    #[test]
    fn test_lookup_without_banner() {
        let page = Page::new();
        let elements = OtpElements::lookup(&page.dom(), &OtpConfig::default());
        assert!(!elements.success_banner);
    }

    #[test]
    fn test_countdown_elements_are_required() {
        let config = OtpConfig::default();

        let dom = Page::new().dom().without("countdown");
        let err = CountdownElements::lookup(&dom, &config).err().unwrap();
        assert!(matches!(err, CoreError::MissingElement(id) if id == "countdown"));
        assert!(OtpElements::lookup(&dom, &config).countdown.is_none());

        let dom = Page::new().dom().without("resendBtn");
        let err = CountdownElements::lookup(&dom, &config).err().unwrap();
        assert!(matches!(err, CoreError::MissingElement(id) if id == "resendBtn"));
        assert!(OtpElements::lookup(&dom, &config).countdown.is_none());
    }

    #[test]
    fn test_spinner_submit_and_form_are_optional() {
        let config = OtpConfig::default();
        let dom = Page::new()
            .dom()
            .without("spinner")
            .without("submit-btn")
            .without("form");

        let elements = OtpElements::lookup(&dom, &config);
        assert!(elements.spinner.is_none());
        assert!(elements.submit.is_none());
        assert!(elements.countdown.is_some());
        assert!(find_form(&dom, &config).is_none());
    }

    #[test]
    fn test_submit_shows_spinner_and_disables_button() {
        let page = Page::new();
        let scheduler = ManualScheduler::default();
        let (controller, _) = build(&page, false, &scheduler);

        assert!(!page.spinner.visible());
        controller.on_submit();
        assert!(page.spinner.visible());
        assert!(page.submit.disabled());
    }

    #[test]
    fn test_submit_without_spinner_still_disables_button() {
        let page = Page::new();
        let mut elements = page.elements(false);
        elements.spinner = None;
        let controller =
            OtpFormController::new(elements, RecordingNavigator::default(), OtpConfig::default());

        controller.on_submit();
        assert!(page.submit.disabled());
        assert!(!page.spinner.visible());
    }

    #[test]
    fn test_submit_without_button_still_shows_spinner() {
        let page = Page::new();
        let mut elements = page.elements(false);
        elements.submit = None;
        let controller =
            OtpFormController::new(elements, RecordingNavigator::default(), OtpConfig::default());

        controller.on_submit();
        assert!(page.spinner.visible());
        assert!(!page.submit.disabled());
    }

    #[test]
    fn test_redirect_after_success_not_before_delay() {
        let page = Page::new();
        let scheduler = ManualScheduler::default();
        let (controller, navigator) = build(&page, true, &scheduler);
        controller.start(&scheduler);

        scheduler.advance_ms(2_999);
        assert!(navigator.visits().is_empty());

        scheduler.advance_ms(1);
        assert_eq!(
            navigator.visits(),
            vec![("/accounts/login/".to_string(), Duration::from_millis(3_000))]
        );

        scheduler.advance_ms(60_000);
        assert_eq!(navigator.visits().len(), 1);
    }

    #[test]
    fn test_no_redirect_without_success_banner() {
        let page = Page::new();
        let scheduler = ManualScheduler::default();
        let (controller, navigator) = build(&page, false, &scheduler);

        assert!(!controller.schedule_redirect(&scheduler));
        assert_eq!(scheduler.pending(), 0);

        assert!(controller.start_countdown(&scheduler));
        scheduler.advance(Duration::from_secs(3_600));
        assert!(navigator.visits().is_empty());
    }

    #[test]
    fn test_page_without_countdown_keeps_submit_and_redirect() {
        let page = Page::new();
        let dom = page
            .dom()
            .without("resendBtn")
            .without("countdown")
            .with(".alert-success", FakeElement::new("Password changed"));
        let scheduler = ManualScheduler::default();
        let navigator = RecordingNavigator::with_clock(&scheduler);
        let controller = OtpFormController::new(
            OtpElements::lookup(&dom, &OtpConfig::default()),
            navigator.clone(),
            OtpConfig::default(),
        );

        controller.start(&scheduler);
        assert!(!controller.start_countdown(&scheduler));
        assert_eq!(scheduler.pending(), 1);

        controller.on_submit();
        assert!(page.spinner.visible());
        assert!(page.submit.disabled());

        scheduler.advance_ms(3_000);
        assert_eq!(
            navigator.visits(),
            vec![("/accounts/login/".to_string(), Duration::from_millis(3_000))]
        );
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(page.countdown.text(), "");
    }

    #[test]
    fn test_countdown_enables_resend_after_sixty_ticks() {
        let page = Page::new();
        let scheduler = ManualScheduler::default();
        let (controller, _) = build(&page, false, &scheduler);
        controller.start(&scheduler);

        assert_eq!(page.countdown.text(), "60");
        assert!(page.resend.disabled());

        scheduler.advance_ms(59_000);
        assert_eq!(page.countdown.text(), "1");
        assert!(page.resend.disabled());
        assert_eq!(controller.countdown().remaining(), 1);

        scheduler.advance_ms(1_000);
        assert_eq!(page.countdown.text(), "0");
        assert!(!page.resend.disabled());
        assert_eq!(page.resend.text(), "Resend OTP");
        assert!(controller.countdown().is_expired());
        assert_eq!(scheduler.fired(), 60);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(Duration::from_secs(600));
        assert_eq!(scheduler.fired(), 60);
        assert_eq!(page.countdown.text(), "0");
    }

    #[test]
    fn test_countdown_and_redirect_run_independently() {
        let page = Page::new();
        let scheduler = ManualScheduler::default();
        let (controller, navigator) = build(&page, true, &scheduler);
        controller.start(&scheduler);

        scheduler.advance_ms(3_000);
        assert_eq!(navigator.visits().len(), 1);
        assert_eq!(page.countdown.text(), "57");
        assert!(page.resend.disabled());
    }
}
