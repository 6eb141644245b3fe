//! The menu sequencer: right-click, category, leaf.
//!
//! A sequence runs as one async task with three suspension points: after the
//! right-click, after the category click, and between leaf lookups. Stages never
//! overlap, and an accepted sequence always runs to `Done` or `Failed`; there is no
//! cancellation.

use std::{fmt, mem, sync::Arc};

use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::{
    dom::{Element, LeafKey, LeafLookup, MenuDom},
    error::{Error, Result},
    guard::{BusyFlag, BusyPolicy},
    pointer::PointerTracker,
    simulate::{Button, EventSimulator, Poster},
    target::TargetId,
    timing::Timings,
};

/// Where a sequencer is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// No sequence has run yet.
    #[default]
    Idle,
    /// Right-clicking under the pointer.
    Opening,
    /// Looking for and clicking the category slice.
    CategorySelect,
    /// Looking for the leaf; `attempt` is 1-based.
    LeafSearch {
        /// Current lookup number.
        attempt: u32,
    },
    /// The leaf was clicked.
    Done,
    /// The sequence aborted.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Opening => f.write_str("opening"),
            Self::CategorySelect => f.write_str("category select"),
            Self::LeafSearch { attempt } => write!(f, "leaf search (attempt {attempt})"),
            Self::Done => f.write_str("done"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Tunables for a [`Sequencer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SequencerOptions {
    /// Settle delays and leaf polling budget.
    pub timings: Timings,
    /// Busy flag reset behavior.
    pub busy: BusyPolicy,
    /// How leaves are matched.
    pub lookup: LeafLookup,
    /// Ask the host to drop menu animations right after the right-click.
    pub accelerate: bool,
}

/// A successfully completed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The leaf that was clicked.
    pub target: TargetId,
    /// Leaf lookups it took to find it.
    pub attempts: u32,
    /// The clicked leaf element.
    pub leaf: Element,
}

/// Drives the host's radial menu to a leaf action.
///
/// Holds the pointer tracker, the busy flag and the current stage; share it behind
/// an `Arc` between the pointer observer and whatever dispatches commands.
pub struct Sequencer {
    /// Host UI queries.
    dom: Arc<dyn MenuDom>,
    /// Click synthesis.
    simulator: EventSimulator,
    /// Last pointer position.
    tracker: PointerTracker,
    /// Single-flight guard.
    busy: BusyFlag,
    /// Current stage, for observers.
    stage: Mutex<Stage>,
    /// Tunables.
    options: SequencerOptions,
}

impl Sequencer {
    /// Create a sequencer over a host UI and a signal poster.
    pub fn new(dom: Arc<dyn MenuDom>, poster: Arc<dyn Poster>, options: SequencerOptions) -> Self {
        Self {
            dom,
            simulator: EventSimulator::new(poster),
            tracker: PointerTracker::new(),
            busy: BusyFlag::new(options.busy),
            stage: Mutex::new(Stage::Idle),
            options,
        }
    }

    /// Handle for feeding pointer-move signals.
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        *self.stage.lock()
    }

    /// Whether a sequence holds the busy flag.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Effective tunables.
    pub fn options(&self) -> &SequencerOptions {
        &self.options
    }

    /// Run one sequence for `target`.
    ///
    /// Rejected with [`Error::Busy`] without touching the stage if another sequence
    /// is in flight. Every other failure leaves the sequencer in [`Stage::Failed`].
    pub async fn run(&self, target: &TargetId) -> Result<Completion> {
        let Some(_token) = self.busy.try_acquire() else {
            warn!(target_id = %target, stage = %self.stage(), "sequence_rejected_busy");
            return Err(Error::Busy);
        };
        debug!(target_id = %target, "sequence_start");
        let result = self.drive(target).await;
        match &result {
            Ok(done) => {
                self.set_stage(Stage::Done);
                info!(target_id = %target, attempts = done.attempts, "sequence_done");
            }
            Err(e) => {
                let at = self.stage();
                self.set_stage(Stage::Failed);
                warn!(target_id = %target, stage = %at, error = %e, "sequence_failed");
            }
        }
        result
    }

    /// Set the stage and trace the transition.
    fn set_stage(&self, next: Stage) {
        let prev = mem::replace(&mut *self.stage.lock(), next);
        trace!(from = %prev, to = %next, "stage");
    }

    /// The three stages, in order.
    async fn drive(&self, target: &TargetId) -> Result<Completion> {
        let timings = self.options.timings;

        self.set_stage(Stage::Opening);
        let at = self
            .tracker
            .last_known_position()
            .ok_or(Error::PreconditionMissing)?;
        self.simulator
            .right_click_at(self.dom.as_ref(), at)
            .ok_or_else(|| Error::ElementNotFound {
                stage: Stage::Opening,
                what: format!("an element at ({}, {})", at.x, at.y),
            })?;
        if self.options.accelerate {
            self.dom.accelerate_menu();
            trace!("menu_accelerated");
        }
        sleep(timings.open_settle).await;

        self.set_stage(Stage::CategorySelect);
        let category =
            self.dom
                .category(target.category())
                .ok_or_else(|| Error::ElementNotFound {
                    stage: Stage::CategorySelect,
                    what: format!("category slice \"{}\"", target.category()),
                })?;
        let center = category.rect.center();
        self.simulator
            .simulate_click(category.id, center, Button::Primary);
        info!(category = target.category(), x = center.x, y = center.y, "clicked_category");
        sleep(timings.category_settle).await;

        let key = self.options.lookup.key_for(target);
        let (leaf, attempts) = self.search_leaf(target, &key).await?;
        if leaf.disabled {
            return Err(Error::ElementDisabled {
                target: target.composite(),
            });
        }
        let center = leaf.rect.center();
        self.simulator.simulate_click(leaf.id, center, Button::Primary);
        info!(leaf = %key, x = center.x, y = center.y, attempts, "clicked_leaf");
        Ok(Completion {
            target: target.clone(),
            attempts,
            leaf,
        })
    }

    /// Poll for the leaf until it appears or the attempt budget runs out.
    ///
    /// No wait follows the final attempt, so nothing is left scheduled once this
    /// returns.
    async fn search_leaf(&self, target: &TargetId, key: &LeafKey) -> Result<(Element, u32)> {
        let max = self.options.timings.leaf_max_attempts;
        for attempt in 1..=max {
            self.set_stage(Stage::LeafSearch { attempt });
            if let Some(leaf) = self.dom.leaf(key) {
                return Ok((leaf, attempt));
            }
            trace!(leaf = %key, attempt, max, "leaf_lookup_miss");
            if attempt < max {
                sleep(self.options.timings.leaf_poll).await;
            }
        }
        Err(Error::LeafNotFound {
            target: target.composite(),
            attempts: max,
        })
    }
}
