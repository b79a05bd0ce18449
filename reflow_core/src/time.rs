// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time in microsecond ticks.
//!
//! [`HostTime`] is a point on the host's monotonic clock (on the web,
//! `performance.now()` scaled to microseconds). [`Duration`] is a span in the
//! same units. The coordinator never reads a clock itself; the [`Host`]
//! supplies `now` on every call, which keeps rate limiting deterministic under
//! test.
//!
//! [`Host`]: crate::host::Host

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as microseconds on the host's monotonic clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a [`HostTime`] from milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms.saturating_mul(1000))
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        self.saturating_duration_since(rhs)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}µs)", self.0)
    }
}

/// A span of time in microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms.saturating_mul(1000))
    }

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the duration in whole milliseconds, rounded up.
    ///
    /// Timer APIs take milliseconds; rounding up keeps a wakeup from landing
    /// before the interval has actually elapsed.
    #[inline]
    #[must_use]
    pub const fn as_millis_ceil(self) -> u64 {
        self.0.div_ceil(1000)
    }

    /// Subtraction that clamps at zero.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}µs)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip_through_ticks() {
        assert_eq!(Duration::from_millis(200).ticks(), 200_000);
        assert_eq!(HostTime::from_millis(3).ticks(), 3_000);
    }

    #[test]
    fn as_millis_rounds_up_partial_milliseconds() {
        assert_eq!(Duration(1).as_millis_ceil(), 1);
        assert_eq!(Duration(1_000).as_millis_ceil(), 1);
        assert_eq!(Duration(1_001).as_millis_ceil(), 2);
        assert_eq!(Duration::ZERO.as_millis_ceil(), 0);
    }

    #[test]
    fn subtraction_saturates() {
        let early = HostTime(100);
        let late = HostTime(250);
        assert_eq!(late - early, Duration(150));
        assert_eq!(early - late, Duration::ZERO);
        assert_eq!(Duration(5).saturating_sub(Duration(9)), Duration::ZERO);
    }
}
