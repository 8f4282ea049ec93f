//! `web-sys` implementations of the page traits in `ss-core`.

use ss_core::embedded::EmbeddedData;
use ss_core::otp::{ElementLookup, Navigator, UiElement};
use ss_core::{CoreError, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// The current document.
pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CoreError::MissingElement("document".to_string()))
}

/// Run `f` once the DOM is parsed: on `DOMContentLoaded`, or right away if
/// the document has already finished loading.
pub fn on_page_ready<F: FnOnce() + 'static>(f: F) {
    let document = match document() {
        Ok(d) => d,
        Err(e) => {
            log::error!("page ready: {}", e);
            return;
        }
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        log::error!("page ready: could not listen for DOMContentLoaded: {:?}", e);
    }
}

/// Embedded JSON elements of the live document.
pub struct PageData {
    document: Document,
}

impl PageData {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self> {
        document().map(Self::new)
    }
}

impl EmbeddedData for PageData {
    fn text_content(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
    }
}

/// A DOM element, hidden and shown by toggling a CSS class.
pub struct DomElement {
    element: Element,
    hidden_class: String,
}

impl DomElement {
    pub fn new(element: Element, hidden_class: &str) -> Self {
        Self {
            element,
            hidden_class: hidden_class.to_string(),
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl UiElement for DomElement {
    fn set_visible(&self, visible: bool) {
        let classes = self.element.class_list();
        let result = if visible {
            classes.remove_1(&self.hidden_class)
        } else {
            classes.add_1(&self.hidden_class)
        };
        if let Err(e) = result {
            log::warn!("element #{}: class toggle failed: {:?}", self.element.id(), e);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        let result = if disabled {
            self.element.set_attribute("disabled", "true")
        } else {
            self.element.remove_attribute("disabled")
        };
        if let Err(e) = result {
            log::warn!("element #{}: disabled toggle failed: {:?}", self.element.id(), e);
        }
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// Navigates by assigning `window.location.href`.
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) {
        let result = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|w| w.location().set_href(path));
        if let Err(e) = result {
            log::error!("navigate to {} failed: {:?}", path, e);
        }
    }
}

/// Element lookup on the live document. Found elements hide with `hidden_class`.
pub struct PageElements {
    document: Document,
    hidden_class: String,
}

impl PageElements {
    pub fn new(document: Document, hidden_class: &str) -> Self {
        Self {
            document,
            hidden_class: hidden_class.to_string(),
        }
    }
}

impl ElementLookup for PageElements {
    type Element = DomElement;

    fn by_id(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .map(|el| DomElement::new(el, &self.hidden_class))
    }

    fn query(&self, selector: &str) -> Option<DomElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|el| DomElement::new(el, &self.hidden_class)),
            Err(e) => {
                log::warn!("invalid selector '{}': {:?}", selector, e);
                None
            }
        }
    }
}

/// Call `handler` on every `submit` of `form`.
///
/// The event is left alone, so the browser still submits the form.
pub fn on_submit<F: FnMut() + 'static>(form: &DomElement, mut handler: F) {
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| handler());
    if let Err(e) = form
        .element()
        .add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())
    {
        log::error!("could not listen for submit: {:?}", e);
        return;
    }
    // lives as long as the page
    listener.forget();
}

/// Expose `handler` as `window.<name>(key)` for other scripts on the page.
pub fn install_global<F: FnMut(String) + 'static>(name: &str, mut handler: F) {
    let Some(window) = web_sys::window() else {
        log::error!("no window to install {} on", name);
        return;
    };
    let name_owned = name.to_string();
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |key: JsValue| match key.as_string() {
        Some(key) => handler(key),
        None => log::warn!("{}: expected a string key, got {:?}", name_owned, key),
    });
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(name), closure.as_ref()) {
        log::error!("could not install window.{}: {:?}", name, e);
        return;
    }
    closure.forget();
}
