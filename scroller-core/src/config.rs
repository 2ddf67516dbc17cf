use alloc::string::{String, ToString};
use core::time::Duration;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ScrollerError};

/// Name of the event dispatched when the target is scrolled natively
pub const DEFAULT_EVENT_NAME: &str = "auto-scroller-scroll";

/// Tuning for the scroll animation loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    /// Speed in user units. Zero or null means unset.
    #[serde(deserialize_with = "unset_as_zero")]
    pub speed_units: f64,
    /// Pixels per tick contributed by one speed unit.
    pub speed_per_unit: f64,
    pub tick_interval_ms: u32,
    /// The descent moves this many times slower than the return.
    pub descent_divisor: f64,
    /// Travel range is the scroll height divided by this.
    pub travel_divisor: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            speed_units: 0.0,
            speed_per_unit: 16.0,
            tick_interval_ms: 16,
            descent_divisor: 32.0,
            travel_divisor: 3.0,
        }
    }
}

impl AnimatorConfig {
    pub fn with_speed_units(mut self, units: f64) -> Self {
        self.speed_units = units;
        self
    }

    pub fn with_tick_interval_ms(mut self, interval_ms: u32) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Pixels moved per tick on the way back up.
    ///
    /// Unset (or NaN) units fall back to a single unit.
    pub fn effective_speed(&self) -> f64 {
        let speed = self.speed_units * self.speed_per_unit;
        if speed == 0.0 || speed.is_nan() {
            self.speed_per_unit
        } else {
            speed
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    pub fn validate(&self) -> Result<()> {
        let speed = self.effective_speed();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ScrollerError::InvalidSpeed(speed));
        }
        positive("descent divisor", self.descent_divisor)?;
        positive("travel divisor", self.travel_divisor)?;
        if self.tick_interval_ms == 0 {
            return Err(ScrollerError::InvalidInterval);
        }
        Ok(())
    }
}

/// `JSON.stringify` writes NaN as null.
fn unset_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScrollerError::InvalidParameter { name, value })
    }
}

/// Options accepted when attaching a scroller to a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollerOptions {
    /// Start the loop as soon as the scroller is attached.
    pub start: bool,
    /// Stop propagation of intercepted scroll events.
    pub stop_propagation: bool,
    pub event_name: String,
    #[serde(flatten)]
    pub animator: AnimatorConfig,
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self {
            start: true,
            stop_propagation: true,
            event_name: DEFAULT_EVENT_NAME.to_string(),
            animator: AnimatorConfig::default(),
        }
    }
}

impl ScrollerOptions {
    pub fn paused(mut self) -> Self {
        self.start = false;
        self
    }

    pub fn with_animator(mut self, animator: AnimatorConfig) -> Self {
        self.animator = animator;
        self
    }
}
