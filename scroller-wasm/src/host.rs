use core::time::Duration;

use scroller_core::error::Result;
use scroller_core::{Host, ScrollDetail, ScrollerError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Document, Window};

/// Host backed by `window` timers and the page's `document`
pub struct BrowserHost {
    window: Window,
    document: Document,
}

/// A `setInterval` registration. Owns the callback for as long as the timer lives.
pub struct BrowserInterval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| ScrollerError::host("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| ScrollerError::host("no document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Host for BrowserHost {
    type Interval = BrowserInterval;

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> Result<Self::Interval> {
        let millis = i32::try_from(period.as_millis()).map_err(|_| ScrollerError::InvalidInterval)?;
        if millis == 0 {
            return Err(ScrollerError::InvalidInterval);
        }

        let callback = Closure::wrap(callback);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(js_error)?;

        Ok(BrowserInterval {
            handle,
            _callback: callback,
        })
    }

    fn clear_interval(&self, interval: Self::Interval) {
        self.window.clear_interval_with_handle(interval.handle);
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let frame = Closure::once_into_js(move || callback());
        if let Err(err) = self.window.request_animation_frame(frame.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", err);
        }
    }

    fn dispatch(&self, event_name: &str, detail: &ScrollDetail) {
        let dispatched = detail_object(detail).and_then(|detail| {
            let init = CustomEventInit::new();
            init.set_detail(&detail);
            let event = CustomEvent::new_with_event_init_dict(event_name, &init)?;
            self.document.dispatch_event(&event)
        });

        if let Err(err) = dispatched {
            log::error!("failed to dispatch {}: {:?}", event_name, err);
        }
    }
}

/// `{position, direction}` as a plain JS object.
fn detail_object(detail: &ScrollDetail) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    js_sys::Reflect::set(&object, &"position".into(), &detail.position.into())?;
    js_sys::Reflect::set(
        &object,
        &"direction".into(),
        &detail.direction.as_str().into(),
    )?;
    Ok(object.into())
}

pub(crate) fn js_error(err: JsValue) -> ScrollerError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{:?}", err));
    ScrollerError::Host(message)
}
