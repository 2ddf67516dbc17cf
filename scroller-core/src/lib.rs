#![cfg_attr(not(feature = "std"), no_std)]

//! Auto-scrolling animation loop.
//!
//! [`ScrollAnimator`] is the pure state machine that moves a target down
//! slowly and snaps it back up quickly. [`AutoScroller`] drives it from a
//! [`Host`] timer and paints the offset onto a [`Surface`]. Browser and
//! headless hosts live behind those traits so the loop itself never touches
//! a global environment.

extern crate alloc;

pub mod animator;
pub mod config;
pub mod controller;
pub mod error;
pub mod headless;
pub mod host;

pub use animator::{AnimatorState, Direction, ScrollAnimator, ScrollDetail};
pub use config::{AnimatorConfig, ScrollerOptions, DEFAULT_EVENT_NAME};
pub use controller::AutoScroller;
pub use error::ScrollerError;
pub use headless::{HeadlessHost, HeadlessScrollEvent, HeadlessSurface};
pub use host::{Host, InterceptedScroll, ScrollHandler, Surface};
