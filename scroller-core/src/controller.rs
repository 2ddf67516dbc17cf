use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use crate::animator::{AnimatorState, Direction, ScrollAnimator, ScrollDetail};
use crate::config::ScrollerOptions;
use crate::error::{Result, ScrollerError};
use crate::host::{Host, InterceptedScroll, ScrollHandler, Surface};

struct Shared<S> {
    animator: ScrollAnimator,
    surface: Rc<S>,
    options: ScrollerOptions,
    stale_geometry: bool,
}

impl<S: Surface> Shared<S> {
    /// Pick up content resizes before moving.
    fn refresh_geometry(&mut self) {
        let refreshed = match self.surface.scroll_height() {
            Some(height) if height == self.animator.scroll_height() => Ok(()),
            Some(height) => self.animator.set_scroll_height(height),
            None => Err(ScrollerError::MissingScrollGeometry),
        };

        match refreshed {
            Ok(()) => self.stale_geometry = false,
            Err(err) if !self.stale_geometry => {
                log::warn!("keeping previous bound: {}", err);
                self.stale_geometry = true;
            }
            Err(_) => {}
        }
    }
}

/// Scroll animation bound to a surface and driven by a host timer
pub struct AutoScroller<H: Host, S: Surface> {
    host: Rc<H>,
    shared: Rc<RefCell<Shared<S>>>,
    listener: Option<S::Listener>,
    interval: Option<H::Interval>,
}

impl<H, S> AutoScroller<H, S>
where
    H: Host + 'static,
    S: Surface + 'static,
{
    /// Bind to `surface`, listen for its scroll events and start unless
    /// `options.start` is off.
    pub fn attach(host: Rc<H>, surface: S, options: ScrollerOptions) -> Result<Self> {
        let height = surface
            .scroll_height()
            .ok_or(ScrollerError::MissingScrollGeometry)?;
        let animator = ScrollAnimator::new(height, &options.animator)?;
        let start = options.start;

        log::info!(
            "attaching auto scroller: height={} bound={} speed={}",
            height,
            animator.bound(),
            animator.speed()
        );

        let mut scroller = Self {
            host,
            shared: Rc::new(RefCell::new(Shared {
                animator,
                surface: Rc::new(surface),
                options,
                stale_geometry: false,
            })),
            listener: None,
            interval: None,
        };
        scroller.listen()?;

        if start {
            scroller.start()?;
        }
        Ok(scroller)
    }

    /// Start the tick timer. Returns `false` if it was already running.
    pub fn start(&mut self) -> Result<bool> {
        if self.interval.is_some() {
            return Ok(false);
        }

        let period = self.shared.borrow().options.animator.tick_interval();
        let shared = Rc::clone(&self.shared);
        let host = Rc::downgrade(&self.host);
        let interval = self
            .host
            .set_interval(period, Box::new(move || tick(&shared, &host)))?;

        log::debug!("auto scroller started, ticking every {:?}", period);
        self.interval = Some(interval);
        Ok(true)
    }

    /// Cancel the tick timer. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.interval.take() {
            Some(interval) => {
                self.host.clear_interval(interval);
                log::debug!("auto scroller stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Stop ticking and stop listening to the target.
    pub fn detach(&mut self) {
        self.stop();
        self.listener = None;
    }

    pub fn dispose(mut self) {
        self.detach();
    }

    /// Move the animation onto a new surface.
    ///
    /// On error the scroller keeps its current surface and listener.
    pub fn retarget(&mut self, surface: S) -> Result<()> {
        let height = surface
            .scroll_height()
            .ok_or(ScrollerError::MissingScrollGeometry)?;

        let surface = Rc::new(surface);
        let handler = scroll_handler(Rc::clone(&self.shared), Rc::downgrade(&self.host));
        let listener = surface.listen(handler)?;

        {
            let mut shared = self.shared.borrow_mut();
            shared.animator.set_scroll_height(height)?;
            shared.surface = surface;
        }
        self.listener = Some(listener);

        log::info!("auto scroller retargeted, height={}", height);
        Ok(())
    }

    pub fn state(&self) -> AnimatorState {
        *self.shared.borrow().animator.state()
    }

    pub fn position(&self) -> f64 {
        self.shared.borrow().animator.position()
    }

    pub fn direction(&self) -> Direction {
        self.shared.borrow().animator.direction()
    }

    pub fn detail(&self) -> ScrollDetail {
        self.shared.borrow().animator.detail()
    }

    pub fn options(&self) -> ScrollerOptions {
        self.shared.borrow().options.clone()
    }

    fn listen(&mut self) -> Result<()> {
        let handler = scroll_handler(Rc::clone(&self.shared), Rc::downgrade(&self.host));
        let surface = Rc::clone(&self.shared.borrow().surface);
        self.listener = Some(surface.listen(handler)?);
        Ok(())
    }
}

impl<H: Host, S: Surface> Drop for AutoScroller<H, S> {
    fn drop(&mut self) {
        if let Some(interval) = self.interval.take() {
            self.host.clear_interval(interval);
        }
    }
}

fn tick<H: Host, S: Surface + 'static>(shared: &Rc<RefCell<Shared<S>>>, host: &Weak<H>) {
    let Some(host) = host.upgrade() else {
        return;
    };

    let (offset, surface) = {
        let mut shared = shared.borrow_mut();
        shared.refresh_geometry();
        let offset = shared.animator.tick();
        (offset, Rc::clone(&shared.surface))
    };

    host.request_frame(Box::new(move || surface.apply_offset(offset)));
}

fn scroll_handler<H, S>(shared: Rc<RefCell<Shared<S>>>, host: Weak<H>) -> ScrollHandler
where
    H: Host + 'static,
    S: Surface + 'static,
{
    Box::new(move |event: &dyn InterceptedScroll| {
        event.prevent_default();

        let (detail, event_name, stop_propagation) = {
            let shared = shared.borrow();
            (
                shared.animator.detail(),
                shared.options.event_name.clone(),
                shared.options.stop_propagation,
            )
        };
        if stop_propagation {
            event.stop_propagation();
        }

        if let Some(host) = host.upgrade() {
            host.dispatch(&event_name, &detail);
        }
    })
}
