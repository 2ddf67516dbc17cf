use serde::{Deserialize, Serialize};

use crate::config::AnimatorConfig;
use crate::error::{Result, ScrollerError};

/// Phase of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Moving down through the content, slowly.
    #[default]
    #[serde(rename = "down")]
    Descending,
    /// Returning to the top, quickly.
    #[serde(rename = "up")]
    Ascending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Descending => "down",
            Direction::Ascending => "up",
        }
    }
}

/// Payload of the notification emitted on a native scroll of the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollDetail {
    /// Current offset in hundreds of pixels.
    pub position: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorState {
    pub current_position: f64,
    pub previous_position: f64,
    pub direction: Direction,
    pub speed: f64,
}

/// Vertical bounce between the top of the content and a third of its height
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    state: AnimatorState,
    scroll_height: f64,
    descent_divisor: f64,
    travel_divisor: f64,
}

impl ScrollAnimator {
    pub fn new(scroll_height: f64, config: &AnimatorConfig) -> Result<Self> {
        config.validate()?;
        check_height(scroll_height)?;

        Ok(Self {
            state: AnimatorState {
                current_position: 0.0,
                previous_position: 0.0,
                direction: Direction::Descending,
                speed: config.effective_speed(),
            },
            scroll_height,
            descent_divisor: config.descent_divisor,
            travel_divisor: config.travel_divisor,
        })
    }

    /// Furthest offset the animation travels to.
    pub fn bound(&self) -> f64 {
        self.scroll_height / self.travel_divisor
    }

    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn position(&self) -> f64 {
        self.state.current_position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    /// Advance one tick and return the new offset.
    pub fn tick(&mut self) -> f64 {
        let bound = self.bound();
        let state = &mut self.state;

        if state.previous_position >= bound {
            state.direction = Direction::Ascending;
        } else if state.previous_position <= 0.0 {
            state.direction = Direction::Descending;
        }

        let position = match state.direction {
            Direction::Ascending => state.current_position - state.speed,
            Direction::Descending => state.current_position + state.speed / self.descent_divisor,
        };

        state.current_position = position.clamp(0.0, bound);
        state.previous_position = state.current_position;

        log::trace!(
            "tick: position={} direction={:?} bound={}",
            state.current_position,
            state.direction,
            bound
        );

        state.current_position
    }

    /// Update the content height, pulling the position back inside the new bound.
    pub fn set_scroll_height(&mut self, scroll_height: f64) -> Result<()> {
        check_height(scroll_height)?;
        self.scroll_height = scroll_height;

        let bound = self.bound();
        if self.state.current_position > bound {
            self.state.current_position = bound;
            self.state.previous_position = bound;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state.current_position = 0.0;
        self.state.previous_position = 0.0;
        self.state.direction = Direction::Descending;
    }

    pub fn detail(&self) -> ScrollDetail {
        ScrollDetail {
            position: self.state.current_position / 100.0,
            direction: self.state.direction,
        }
    }
}

fn check_height(scroll_height: f64) -> Result<()> {
    if scroll_height.is_finite() && scroll_height >= 0.0 {
        Ok(())
    } else {
        Err(ScrollerError::InvalidScrollHeight(scroll_height))
    }
}
