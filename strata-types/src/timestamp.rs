//! Monotonic timestamps for entity create/update dates.
//!
//! A wall-clock reading alone cannot order two saves that land in the same
//! millisecond, so each timestamp carries a logical counter that breaks ties.
//! [`Timestamp::advance`] always yields a strictly later value.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time with a tie-breaking logical counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Milliseconds since Unix epoch.
    wall_time: u64,
    /// Counter for values taken within the same millisecond.
    logical: u32,
}

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl Timestamp {
    /// Reads the current wall clock.
    #[must_use]
    pub fn now() -> Self {
        Self {
            wall_time: wall_clock_millis(),
            logical: 0,
        }
    }

    /// Creates a timestamp from components.
    #[must_use]
    pub const fn new(wall_time: u64, logical: u32) -> Self {
        Self { wall_time, logical }
    }

    /// Milliseconds since Unix epoch.
    #[must_use]
    pub const fn wall_time(&self) -> u64 {
        self.wall_time
    }

    #[must_use]
    pub const fn logical(&self) -> u32 {
        self.logical
    }

    /// Returns a timestamp strictly after `self`.
    ///
    /// Uses the wall clock when it has moved past `self`, otherwise bumps the
    /// logical counter (rolling into the next millisecond on overflow).
    #[must_use]
    pub fn advance(&self) -> Self {
        let now = wall_clock_millis();
        if now > self.wall_time {
            return Self {
                wall_time: now,
                logical: 0,
            };
        }
        match self.logical.checked_add(1) {
            Some(logical) => Self {
                wall_time: self.wall_time,
                logical,
            },
            None => Self {
                wall_time: self.wall_time.saturating_add(1),
                logical: 0,
            },
        }
    }

    /// True if `self` orders before `other`.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_time
            .cmp(&other.wall_time)
            .then(self.logical.cmp(&other.logical))
    }
}
