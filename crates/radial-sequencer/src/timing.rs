//! Render-settle delays and leaf polling budget.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wait after the right-click before looking for the category slice.
pub const OPEN_SETTLE_DEFAULT_MS: u64 = 300;
/// Default wait after the category click before the first leaf lookup.
pub const CATEGORY_SETTLE_DEFAULT_MS: u64 = 300;
/// Default interval between leaf lookups.
pub const LEAF_POLL_DEFAULT_MS: u64 = 200;
/// Default number of leaf lookups before giving up.
pub const LEAF_MAX_ATTEMPTS_DEFAULT: u32 = 10;

/// Clamp bounds applied to user-supplied timings.
pub const MAX_SETTLE_MS: u64 = 5000;
/// Lower bound for the leaf poll interval.
pub const MIN_POLL_MS: u64 = 10;
/// Upper bound for the leaf poll interval.
pub const MAX_POLL_MS: u64 = 2000;
/// Lower bound for the leaf attempt budget.
pub const MIN_LEAF_ATTEMPTS: u32 = 1;
/// Upper bound for the leaf attempt budget.
pub const MAX_LEAF_ATTEMPTS: u32 = 100;

/// Optional timing overrides, as written in a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSpec {
    /// Wait after opening the menu (milliseconds).
    pub open_settle_ms: Option<u64>,
    /// Wait after choosing the category (milliseconds).
    pub category_settle_ms: Option<u64>,
    /// Interval between leaf lookups (milliseconds).
    pub leaf_poll_ms: Option<u64>,
    /// Total leaf lookups before failing.
    pub leaf_max_attempts: Option<u32>,
}

impl TimingSpec {
    /// Fill unset fields with defaults and clamp everything into range.
    pub fn resolve(&self) -> Timings {
        let ms = |v: Option<u64>, default: u64, min: u64, max: u64| {
            Duration::from_millis(v.unwrap_or(default).clamp(min, max))
        };
        Timings {
            open_settle: ms(self.open_settle_ms, OPEN_SETTLE_DEFAULT_MS, 0, MAX_SETTLE_MS),
            category_settle: ms(
                self.category_settle_ms,
                CATEGORY_SETTLE_DEFAULT_MS,
                0,
                MAX_SETTLE_MS,
            ),
            leaf_poll: ms(self.leaf_poll_ms, LEAF_POLL_DEFAULT_MS, MIN_POLL_MS, MAX_POLL_MS),
            leaf_max_attempts: self
                .leaf_max_attempts
                .unwrap_or(LEAF_MAX_ATTEMPTS_DEFAULT)
                .clamp(MIN_LEAF_ATTEMPTS, MAX_LEAF_ATTEMPTS),
        }
    }
}

/// Effective timings used by a sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Render-settle delay after the right-click.
    pub open_settle: Duration,
    /// Render-settle delay after the category click.
    pub category_settle: Duration,
    /// Wait between leaf lookups.
    pub leaf_poll: Duration,
    /// Total leaf lookups, including the first.
    pub leaf_max_attempts: u32,
}

impl Timings {
    /// Longest a sequence can take from right-click to its final leaf lookup.
    pub fn worst_case(&self) -> Duration {
        self.open_settle
            + self.category_settle
            + self.leaf_poll * self.leaf_max_attempts.saturating_sub(1)
    }
}

impl Default for Timings {
    fn default() -> Self {
        TimingSpec::default().resolve()
    }
}
