//! Debounced hover tooltip state machine
//!
//! `Idle -> Pending (timer armed) -> Shown`, driven by the single-threaded
//! UI loop. Time is injected through each call, so the debounce is testable
//! without real timers. The client keeps two independent instances: one for
//! life bars and one for achievement markers.

use std::time::{Duration, Instant};

/// Default debounce before a tooltip appears.
pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<T> {
    Idle,
    Pending { target: T, deadline: Instant },
    Shown { target: T },
}

/// Debounces pointer hover into tooltip visibility.
///
/// At most one tooltip per instance is visible; entering a new target always
/// cancels the previous pending timer or visible tooltip before arming the
/// new one.
#[derive(Debug, Clone)]
pub struct HoverDebouncer<T> {
    state: State<T>,
    delay: Duration,
}

impl<T: Clone + PartialEq> HoverDebouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: State::Idle,
            delay,
        }
    }

    /// Pointer entered `target`: drop whatever was pending or shown and arm
    /// the debounce timer. Re-entering the already shown target re-arms too,
    /// matching pointer-enter semantics in the renderer.
    pub fn pointer_enter(&mut self, target: T, now: Instant) {
        self.state = State::Pending {
            target,
            deadline: now + self.delay,
        };
    }

    /// Pointer left the current target: back to idle, pending timer cleared.
    pub fn pointer_leave(&mut self) {
        self.state = State::Idle;
    }

    /// Advance the timer and return the tooltip target to display, if any.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        if let State::Pending { target, deadline } = &self.state {
            if now >= *deadline {
                self.state = State::Shown {
                    target: target.clone(),
                };
            }
        }
        self.visible()
    }

    /// The currently visible tooltip target.
    pub fn visible(&self) -> Option<&T> {
        match &self.state {
            State::Shown { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }
}

impl<T: Clone + PartialEq> Default for HoverDebouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_DELAY)
    }
}
