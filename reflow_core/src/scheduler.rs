// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiting for bursty triggers.
//!
//! [`Throttle`] is a clock-driven state machine: it never owns a timer. The
//! caller feeds it `now` with every request and acts on the returned
//! [`Decision`], scheduling at most one wakeup at a time. When the wakeup
//! fires, [`Throttle::on_wakeup`] releases the most recent pending value.
//!
//! Both policies guarantee that the last request of a non-empty burst is
//! delivered exactly once, carrying that request's value:
//!
//! ```text
//!  Throttle:  r r r r r r            r
//!             ▼     ▼     ▼          ▼
//!             run   run   run(last)  run        at most once per interval
//!
//!  Debounce:  r r r r r r ── quiet ── run(last)
//! ```

use crate::time::{Duration, HostTime};

/// How requests are coalesced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RatePolicy {
    /// Leading and trailing edge: the first request of a quiet period runs
    /// immediately, later ones collapse into one trailing run per interval.
    Throttle,
    /// Trailing edge only: runs once after the stream has been quiet for a
    /// full interval.
    Debounce,
}

/// What the caller must do after [`Throttle::request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    /// Run now with this value. No timer is needed.
    RunNow(T),
    /// Schedule one wakeup after `delay`.
    Arm {
        /// Time until [`Throttle::on_wakeup`] should be called.
        delay: Duration,
    },
    /// Clear the armed wakeup and schedule a new one after `delay`.
    Rearm {
        /// Time until [`Throttle::on_wakeup`] should be called.
        delay: Duration,
    },
    /// A wakeup is already armed and will deliver this value.
    Coalesced,
    /// The throttle has been cancelled.
    Ignored,
}

/// Rate limiter holding at most one pending value.
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval: Duration,
    policy: RatePolicy,
    last_run: Option<HostTime>,
    last_request: Option<HostTime>,
    pending: Option<T>,
    armed: bool,
    cancelled: bool,
}

impl<T> Throttle<T> {
    /// Creates a throttle that runs at most once per `interval`.
    #[must_use]
    pub fn new(interval: Duration, policy: RatePolicy) -> Self {
        Self {
            interval,
            policy,
            last_run: None,
            last_request: None,
            pending: None,
            armed: false,
            cancelled: false,
        }
    }

    /// The configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> RatePolicy {
        self.policy
    }

    /// Whether a wakeup is currently expected.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether a value is waiting for the trailing run.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Submits a request carrying `value`.
    pub fn request(&mut self, now: HostTime, value: T) -> Decision<T> {
        if self.cancelled {
            return Decision::Ignored;
        }
        self.last_request = Some(now);

        match self.policy {
            RatePolicy::Throttle => {
                if self.armed {
                    self.pending = Some(value);
                    return Decision::Coalesced;
                }
                match self.remaining(now) {
                    None => {
                        self.last_run = Some(now);
                        Decision::RunNow(value)
                    }
                    Some(delay) => {
                        self.pending = Some(value);
                        self.armed = true;
                        Decision::Arm { delay }
                    }
                }
            }
            RatePolicy::Debounce => {
                self.pending = Some(value);
                let delay = self.interval;
                if self.armed {
                    Decision::Rearm { delay }
                } else {
                    self.armed = true;
                    Decision::Arm { delay }
                }
            }
        }
    }

    /// Handles a wakeup scheduled from an earlier [`Decision`].
    ///
    /// Returns the pending value if it is due. A wakeup that arrives early
    /// (timers may fire slightly ahead of the requested delay) returns
    /// `Err(delay)`; the throttle stays armed and the caller must schedule
    /// another wakeup after `delay`.
    pub fn on_wakeup(&mut self, now: HostTime) -> Result<Option<T>, Duration> {
        if self.cancelled || !self.armed {
            return Ok(None);
        }
        let due_in = match self.policy {
            RatePolicy::Throttle => self.remaining(now),
            RatePolicy::Debounce => self
                .last_request
                .map(|at| self.interval.saturating_sub(now.saturating_duration_since(at)))
                .filter(|d| *d > Duration::ZERO),
        };
        if let Some(delay) = due_in {
            return Err(delay);
        }
        self.armed = false;
        let value = self.pending.take();
        if value.is_some() {
            self.last_run = Some(now);
        }
        Ok(value)
    }

    /// Drops any pending value and refuses further requests.
    ///
    /// Returns `true` if a wakeup was armed, in which case the caller must
    /// clear its timer before returning.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.armed;
        self.cancelled = true;
        self.armed = false;
        self.pending = None;
        was_armed
    }

    /// Time left until a run is permitted, or `None` if one is permitted now.
    fn remaining(&self, now: HostTime) -> Option<Duration> {
        let last = self.last_run?;
        let elapsed = now.saturating_duration_since(last);
        let left = self.interval.saturating_sub(elapsed);
        (left > Duration::ZERO).then_some(left)
    }
}
