//! Long-press recognition on the map surface
//!
//! A sustained single-contact press relocates the search center. The
//! recognizer is an explicit state machine driven by pointer events plus a
//! polled clock, and guarantees at most one fire per press: once fired it
//! stays quiet until the contact is released.

use std::time::{Duration, Instant};

use crate::models::GeoPoint;

/// How long a single contact must stay put before it counts as a long press
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    /// Timer running for the contact that went down at `point`
    Armed { point: GeoPoint, deadline: Instant },
    /// Fired for the current press; waiting for release
    Fired,
}

/// Recognizes sustained presses on the map surface
#[derive(Debug)]
pub struct LongPressRecognizer {
    state: PressState,
}

impl Default for LongPressRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPressRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PressState::Idle,
        }
    }

    /// A contact went down. Only a single-contact press arms the timer;
    /// multi-touch never relocates.
    pub fn pointer_down(&mut self, point: GeoPoint, contact_count: u8, now: Instant) {
        if contact_count == 1 {
            self.state = PressState::Armed {
                point,
                deadline: now + LONG_PRESS_DURATION,
            };
        } else {
            self.state = PressState::Idle;
        }
    }

    /// Movement cancels the pending press
    pub fn pointer_move(&mut self) {
        if matches!(self.state, PressState::Armed { .. }) {
            self.state = PressState::Idle;
        }
    }

    /// Release before the threshold cancels; release after a fire re-arms
    /// nothing until the next press
    pub fn pointer_up(&mut self) {
        self.state = PressState::Idle;
    }

    /// Same as a release; hosts report it when the contact is taken away
    pub fn pointer_cancel(&mut self) {
        self.state = PressState::Idle;
    }

    /// Check the timer. Returns the pressed point exactly once per press,
    /// when the threshold has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<GeoPoint> {
        if let PressState::Armed { point, deadline } = self.state {
            if now >= deadline {
                self.state = PressState::Fired;
                return Some(point);
            }
        }
        None
    }

    /// Drop any pending press, e.g. on presenter teardown
    pub fn cancel(&mut self) {
        self.state = PressState::Idle;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, PressState::Armed { .. })
    }
}
