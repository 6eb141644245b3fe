//! Single-flight guard for menu sequences.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::trace;

/// What happens to the busy flag when a sequence reaches a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusyPolicy {
    /// Clear the flag on `Done` or `Failed`, so the next shortcut is accepted.
    #[default]
    ResetOnTerminal,
    /// Never clear the flag. Only the first sequence ever runs; every later request
    /// is rejected as busy.
    Latched,
}

/// Process-wide busy flag. At most one [`BusyToken`] exists at a time.
#[derive(Debug, Default)]
pub struct BusyFlag {
    /// Set while a sequence holds the token (or forever once latched).
    busy: AtomicBool,
    /// Reset behavior applied when a token is dropped.
    policy: BusyPolicy,
}

impl BusyFlag {
    /// Create an idle flag with the given reset policy.
    pub fn new(policy: BusyPolicy) -> Self {
        Self {
            busy: AtomicBool::new(false),
            policy,
        }
    }

    /// Claim the flag. Returns `None` if another sequence already holds it.
    pub fn try_acquire(&self) -> Option<BusyToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyToken { flag: self })
    }

    /// Whether a sequence currently holds (or has latched) the flag.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The configured reset policy.
    pub fn policy(&self) -> BusyPolicy {
        self.policy
    }
}

/// Proof of holding the busy flag. Dropping it applies the [`BusyPolicy`].
#[derive(Debug)]
pub struct BusyToken<'a> {
    /// Flag this token was issued by.
    flag: &'a BusyFlag,
}

impl Drop for BusyToken<'_> {
    fn drop(&mut self) {
        match self.flag.policy {
            BusyPolicy::ResetOnTerminal => {
                self.flag.busy.store(false, Ordering::Release);
                trace!("busy_flag_reset");
            }
            BusyPolicy::Latched => trace!("busy_flag_latched"),
        }
    }
}
