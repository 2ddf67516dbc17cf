use log::LevelFilter;
use scroller_core::{ScrollerError, ScrollerOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

mod host;
mod logging;
mod surface;

pub use host::{BrowserHost, BrowserInterval};
pub use surface::{DomListener, DomSurface};

/// Tag used by [`define_auto_scroller`] when none is given
pub const DEFAULT_TAG_NAME: &str = "auto-scroller";

type Controller = scroller_core::AutoScroller<BrowserHost, DomSurface>;

#[wasm_bindgen(start)]
pub fn init() {
    logging::init(LevelFilter::Info);
}

#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = level
        .parse::<LevelFilter>()
        .map_err(|_| js_sys::Error::new(&format!("unknown log level `{}`", level)))?;
    logging::init(level);
    Ok(())
}

/// Register the `<auto-scroller>` custom element (or `tag_name`).
///
/// Returns `false` when the tag is already defined.
#[wasm_bindgen(js_name = defineAutoScroller)]
pub fn define_auto_scroller(tag_name: Option<String>) -> Result<bool, JsValue> {
    let tag_name = tag_name.unwrap_or_else(|| DEFAULT_TAG_NAME.to_string());

    let connect = Closure::wrap(Box::new(|element: HtmlElement| -> Result<JsValue, JsValue> {
        AutoScroller::from_element(&element).map(JsValue::from)
    }) as Box<dyn FnMut(HtmlElement) -> Result<JsValue, JsValue>>);

    let defined = define_element(&tag_name, connect.as_ref().unchecked_ref())?;
    if defined {
        // the element class keeps calling it for every connected instance
        connect.forget();
        log::info!("defined <{}>", tag_name);
    }
    Ok(defined)
}

#[wasm_bindgen(module = "/www/auto_scroller.js")]
extern "C" {
    #[wasm_bindgen(js_name = defineElement, catch)]
    fn define_element(tag_name: &str, connect: &js_sys::Function) -> Result<bool, JsValue>;
}

/// Auto-scroll animation attached to a page element
#[wasm_bindgen]
pub struct AutoScroller {
    inner: Controller,
    document: Document,
}

#[wasm_bindgen]
impl AutoScroller {
    /// `options` may carry `target` (element or document, defaults to the
    /// page), `start`, `stopPropagation`, `eventName`, `speedUnits`,
    /// `speedPerUnit`, `tickIntervalMs`, `descentDivisor` and `travelDivisor`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<AutoScroller, JsValue> {
        let host = BrowserHost::new().map_err(to_js)?;
        let target = if options.is_object() {
            js_sys::Reflect::get(&options, &"target".into())?
        } else {
            JsValue::UNDEFINED
        };

        let surface = DomSurface::from_value(&target, host.document()).map_err(to_js)?;
        let options = parse_options(&options)?;
        Self::attach(host, surface, options)
    }

    /// Returns `false` if already running.
    pub fn start(&mut self) -> Result<bool, JsValue> {
        self.inner.start().map_err(to_js)
    }

    pub fn stop(&mut self) -> bool {
        self.inner.stop()
    }

    /// Cancel the timer and stop intercepting scroll events.
    pub fn dispose(&mut self) {
        self.inner.detach();
    }

    /// Retarget to the element matching `selector`; empty or `document` means the page.
    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self, selector: Option<String>) -> Result<(), JsValue> {
        let surface = DomSurface::select(selector.as_deref(), &self.document).map_err(to_js)?;
        self.inner.retarget(surface).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn position(&self) -> f64 {
        self.inner.position()
    }

    #[wasm_bindgen(getter)]
    pub fn direction(&self) -> String {
        self.inner.direction().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.is_running()
    }
}

impl AutoScroller {
    /// Build from a custom element's attributes.
    fn from_element(element: &HtmlElement) -> Result<AutoScroller, JsValue> {
        let host = BrowserHost::new().map_err(to_js)?;
        let selector = element.get_attribute("target");
        let surface = DomSurface::select(selector.as_deref(), host.document()).map_err(to_js)?;
        Self::attach(host, surface, element_options(element))
    }

    fn attach(
        host: BrowserHost,
        surface: DomSurface,
        options: ScrollerOptions,
    ) -> Result<AutoScroller, JsValue> {
        let document = host.document().clone();
        let inner = Controller::attach(host.into(), surface, options).map_err(to_js)?;
        Ok(AutoScroller { inner, document })
    }
}

fn element_options(element: &HtmlElement) -> ScrollerOptions {
    let mut options = ScrollerOptions {
        start: !element.has_attribute("disable-on-start"),
        stop_propagation: !element.has_attribute("no-propagation"),
        ..ScrollerOptions::default()
    };

    if let Some(speed) = element.get_attribute("speed") {
        match speed.trim().parse::<f64>() {
            Ok(units) => options.animator.speed_units = units,
            Err(_) => log::warn!("ignoring invalid speed attribute `{}`", speed),
        }
    }
    options
}

/// Options object minus its `target`, read through serde.
fn parse_options(options: &JsValue) -> Result<ScrollerOptions, JsValue> {
    if !options.is_object() {
        return Ok(ScrollerOptions::default());
    }

    let plain = js_sys::Object::assign(&js_sys::Object::new(), options.unchecked_ref());
    js_sys::Reflect::delete_property(&plain, &"target".into())?;

    let json = String::from(js_sys::JSON::stringify(&plain)?);
    serde_json::from_str(&json)
        .map_err(|err| js_sys::Error::new(&format!("invalid scroller options: {}", err)).into())
}

fn to_js(err: ScrollerError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
