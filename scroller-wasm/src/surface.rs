use scroller_core::error::Result;
use scroller_core::host::translate_y;
use scroller_core::{InterceptedScroll, ScrollHandler, ScrollerError, Surface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use crate::host::js_error;

/// An element (or the document) whose content is auto-scrolled
pub struct DomSurface {
    target: EventTarget,
    scrolling: HtmlElement,
}

/// Scroll listener registration, removed on drop
pub struct DomListener {
    target: EventTarget,
    closure: Closure<dyn FnMut(Event)>,
}

struct NativeScroll<'a>(&'a Event);

impl InterceptedScroll for NativeScroll<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

impl DomSurface {
    /// The document listens for scroll events, its scrolling element moves.
    pub fn document(document: &Document) -> Result<Self> {
        let scrolling = document
            .scrolling_element()
            .ok_or(ScrollerError::MissingScrollGeometry)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ScrollerError::MissingScrollGeometry)?;

        Ok(Self {
            target: document.clone().into(),
            scrolling,
        })
    }

    pub fn element(element: &HtmlElement) -> Self {
        Self {
            target: element.clone().into(),
            scrolling: element.clone(),
        }
    }

    /// Resolve a JS value: an element, a document, or nothing for the page.
    pub fn from_value(value: &JsValue, document: &Document) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Self::document(document);
        }
        if let Some(document) = value.dyn_ref::<Document>() {
            return Self::document(document);
        }
        match value.dyn_ref::<Element>() {
            Some(element) => html_element(element).map(|element| Self::element(&element)),
            None => Err(ScrollerError::MissingScrollGeometry),
        }
    }

    /// Resolve a `target` attribute value. Empty or `document` means the page.
    pub fn select(selector: Option<&str>, document: &Document) -> Result<Self> {
        let selector = selector.map(str::trim).unwrap_or_default();
        if selector.is_empty() || selector == "document" {
            return Self::document(document);
        }

        let element = document
            .query_selector(selector)
            .map_err(js_error)?
            .ok_or_else(|| ScrollerError::TargetNotFound(selector.to_string()))?;
        html_element(&element).map(|element| Self::element(&element))
    }
}

/// Only HTML elements carry a `style` to move.
fn html_element(element: &Element) -> Result<HtmlElement> {
    element
        .dyn_ref::<HtmlElement>()
        .cloned()
        .ok_or_else(|| ScrollerError::UnsupportedTarget(element.tag_name()))
}

impl Surface for DomSurface {
    type Listener = DomListener;

    fn scroll_height(&self) -> Option<f64> {
        Some(f64::from(self.scrolling.scroll_height()))
    }

    fn apply_offset(&self, offset: f64) {
        if let Err(err) = self
            .scrolling
            .style()
            .set_property("transform", &translate_y(offset))
        {
            log::warn!("failed to apply scroll offset: {:?}", err);
        }
    }

    fn listen(&self, mut handler: ScrollHandler) -> Result<Self::Listener> {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let scroll: &dyn InterceptedScroll = &NativeScroll(&event);
            handler(scroll);
        }) as Box<dyn FnMut(Event)>);
        self.target
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;

        Ok(DomListener {
            target: self.target.clone(),
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove scroll listener: {:?}", err);
        }
    }
}
