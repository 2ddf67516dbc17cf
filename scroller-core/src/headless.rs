//! In-memory host and surface.
//!
//! Time only moves when [`HeadlessHost::advance`] is called and paint frames
//! only run on [`HeadlessHost::flush_frames`], which makes every tick
//! observable from tests and from the simulator.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::time::Duration;

use crate::animator::ScrollDetail;
use crate::error::{Result, ScrollerError};
use crate::host::{translate_y, Host, InterceptedScroll, ScrollHandler, Surface};

struct Timer {
    id: u64,
    period: Duration,
    next_due: Duration,
    callback: Rc<RefCell<Box<dyn FnMut()>>>,
}

#[derive(Default)]
struct HostState {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    frames: VecDeque<Box<dyn FnOnce()>>,
    dispatched: Vec<(String, ScrollDetail)>,
}

/// Host with a virtual clock
#[derive(Default)]
pub struct HeadlessHost {
    state: RefCell<HostState>,
}

/// Handle of a timer registered on a [`HeadlessHost`]
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessInterval(u64);

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn active_intervals(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Move the clock forward, firing every timer that falls due in order.
    /// Returns the number of timer callbacks run.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let until = self.state.borrow().now + elapsed;
        let mut fired = 0;

        loop {
            let callback = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.next_due <= until)
                    .min_by_key(|(_, timer)| timer.next_due)
                    .map(|(index, _)| index);

                let Some(index) = due else {
                    state.now = until;
                    break;
                };

                let timer = &mut state.timers[index];
                let at = timer.next_due;
                timer.next_due += timer.period;
                let callback = Rc::clone(&timer.callback);
                state.now = at;
                callback
            };

            (&mut *callback.borrow_mut())();
            fired += 1;
        }

        fired
    }

    /// Run the paint callbacks queued so far. Returns how many ran.
    pub fn flush_frames(&self) -> usize {
        let frames: Vec<_> = self.state.borrow_mut().frames.drain(..).collect();
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }

    pub fn dispatched(&self) -> Vec<(String, ScrollDetail)> {
        self.state.borrow().dispatched.clone()
    }

    pub fn take_dispatched(&self) -> Vec<(String, ScrollDetail)> {
        core::mem::take(&mut self.state.borrow_mut().dispatched)
    }
}

impl Host for HeadlessHost {
    type Interval = HeadlessInterval;

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> Result<Self::Interval> {
        if period.is_zero() {
            return Err(ScrollerError::InvalidInterval);
        }

        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let next_due = state.now + period;
        state.timers.push(Timer {
            id,
            period,
            next_due,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(HeadlessInterval(id))
    }

    fn clear_interval(&self, interval: Self::Interval) {
        self.state
            .borrow_mut()
            .timers
            .retain(|timer| timer.id != interval.0);
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        self.state.borrow_mut().frames.push_back(callback);
    }

    fn dispatch(&self, event_name: &str, detail: &ScrollDetail) {
        self.state
            .borrow_mut()
            .dispatched
            .push((event_name.to_string(), *detail));
    }
}

/// Scroll event raised by [`HeadlessSurface::scroll`]
#[derive(Debug, Default)]
pub struct HeadlessScrollEvent {
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl HeadlessScrollEvent {
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl InterceptedScroll for HeadlessScrollEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

type HandlerList = RefCell<Vec<(u64, Rc<RefCell<ScrollHandler>>)>>;

struct SurfaceState {
    scroll_height: Cell<Option<f64>>,
    offset: Cell<f64>,
    transform: RefCell<String>,
    next_id: Cell<u64>,
    rejects_listeners: Cell<bool>,
    handlers: HandlerList,
}

/// Scrollable element kept in memory. Clones share the same element.
#[derive(Clone)]
pub struct HeadlessSurface {
    state: Rc<SurfaceState>,
}

/// Removes its scroll handler when dropped
pub struct HeadlessListener {
    id: u64,
    surface: Weak<SurfaceState>,
}

impl HeadlessSurface {
    pub fn new(scroll_height: f64) -> Self {
        Self::with_geometry(Some(scroll_height))
    }

    /// A target with no scroll height at all.
    pub fn without_geometry() -> Self {
        Self::with_geometry(None)
    }

    fn with_geometry(scroll_height: Option<f64>) -> Self {
        Self {
            state: Rc::new(SurfaceState {
                scroll_height: Cell::new(scroll_height),
                offset: Cell::new(0.0),
                transform: RefCell::new(String::new()),
                next_id: Cell::new(0),
                rejects_listeners: Cell::new(false),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn set_scroll_height(&self, scroll_height: Option<f64>) {
        self.state.scroll_height.set(scroll_height);
    }

    /// Make further `listen` calls fail, like a target that refuses listeners.
    pub fn reject_listeners(&self, reject: bool) {
        self.state.rejects_listeners.set(reject);
    }

    /// Last offset painted onto the element.
    pub fn offset(&self) -> f64 {
        self.state.offset.get()
    }

    pub fn transform(&self) -> String {
        self.state.transform.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.state.handlers.borrow().len()
    }

    /// Fire a native scroll event at every registered handler.
    pub fn scroll(&self) -> HeadlessScrollEvent {
        let event = HeadlessScrollEvent::default();
        let intercepted: &dyn InterceptedScroll = &event;
        let handlers: Vec<_> = self
            .state
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            (&mut *handler.borrow_mut())(intercepted);
        }
        event
    }
}

impl Surface for HeadlessSurface {
    type Listener = HeadlessListener;

    fn scroll_height(&self) -> Option<f64> {
        self.state.scroll_height.get()
    }

    fn apply_offset(&self, offset: f64) {
        self.state.offset.set(offset);
        *self.state.transform.borrow_mut() = translate_y(offset);
    }

    fn listen(&self, handler: ScrollHandler) -> Result<Self::Listener> {
        if self.state.rejects_listeners.get() {
            return Err(ScrollerError::host("scroll listener rejected"));
        }

        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state
            .handlers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(handler))));

        Ok(HeadlessListener {
            id,
            surface: Rc::downgrade(&self.state),
        })
    }
}

impl Drop for HeadlessListener {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.upgrade() {
            surface
                .handlers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
