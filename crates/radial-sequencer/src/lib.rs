//! Drives a host application's radial context menu through simulated pointer input.
//!
//! A [`Sequencer`] takes a [`TargetId`] and the last pointer position recorded by its
//! [`PointerTracker`], then runs three timed stages against a [`MenuDom`]:
//!
//! - right-click under the pointer to open the menu;
//! - click the category slice (`build`, `attack`, ...);
//! - poll for the leaf item and click it.
//!
//! Pointer signals are synthesized by the [`EventSimulator`] and delivered through a
//! [`Poster`]. The [`Scene`] type is an in-memory host implementing both seams, used by
//! the replay tool and the test suite.
#![warn(missing_docs)]

mod dom;
mod error;
mod geom;
mod guard;
mod pointer;
mod scene;
mod sequencer;
mod simulate;
mod target;
mod timing;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use dom::{Element, ElementId, LeafKey, LeafLookup, MenuDom};
pub use error::{Error, Result};
pub use geom::{Point, Rect};
pub use guard::{BusyFlag, BusyPolicy, BusyToken};
pub use pointer::PointerTracker;
pub use scene::{CategorySpec, LeafSpec, Scene, SceneSpec};
pub use sequencer::{Completion, Sequencer, SequencerOptions, Stage};
pub use simulate::{Button, EventSimulator, PointerSignal, Poster, SignalKind};
pub use target::{CATEGORIES, DEFAULT_CATEGORY, TargetId};
pub use timing::{
    CATEGORY_SETTLE_DEFAULT_MS, LEAF_MAX_ATTEMPTS_DEFAULT, LEAF_POLL_DEFAULT_MS,
    MAX_LEAF_ATTEMPTS, MAX_POLL_MS, MAX_SETTLE_MS, MIN_LEAF_ATTEMPTS, MIN_POLL_MS,
    OPEN_SETTLE_DEFAULT_MS, TimingSpec, Timings,
};
