//! Capabilities the scroller needs from its environment.
//!
//! The browser binding implements these over `window` and the DOM; the
//! headless module implements them in memory.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::time::Duration;

use crate::animator::ScrollDetail;
use crate::error::Result;

/// Callback invoked for every native scroll event on a surface
pub type ScrollHandler = Box<dyn FnMut(&dyn InterceptedScroll)>;

/// A native scroll event the scroller may cancel
pub trait InterceptedScroll {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

/// Timer, paint and event facilities of the host event loop
pub trait Host {
    /// Cancellation token for a repeating timer.
    type Interval;

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> Result<Self::Interval>;

    fn clear_interval(&self, interval: Self::Interval);

    /// Run `callback` before the next repaint.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);

    /// Publish a scroll notification to observers.
    fn dispatch(&self, event_name: &str, detail: &ScrollDetail);
}

/// The scrollable element being animated
pub trait Surface {
    /// Registration of a scroll handler. Dropping it removes the handler.
    type Listener;

    /// Height of the scrollable content, if the target exposes one.
    fn scroll_height(&self) -> Option<f64>;

    /// Shift the content up by `offset` pixels.
    fn apply_offset(&self, offset: f64);

    fn listen(&self, handler: ScrollHandler) -> Result<Self::Listener>;
}

/// CSS transform that shifts content up by `offset` pixels.
pub fn translate_y(offset: f64) -> String {
    format!("translateY(-{}px)", offset)
}
