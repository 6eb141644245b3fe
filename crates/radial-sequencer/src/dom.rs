//! Read-only view of the host UI tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    geom::{Point, Rect},
    target::TargetId,
};

/// Opaque handle to an element in the host UI.
///
/// Handles are only meaningful until the host rebuilds its menu, so they are never
/// kept across stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A menu slice located by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Handle to post signals to.
    pub id: ElementId,
    /// Bounding box at query time.
    pub rect: Rect,
    /// Whether the host marks the element inactive.
    pub disabled: bool,
}

/// How leaf items are matched in the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafLookup {
    /// Match the leaf's `data-id` attribute against the composite identifier,
    /// e.g. `build_City`.
    #[default]
    DataId,
    /// Match the leaf's trimmed visible label against the plain item name,
    /// e.g. `City`.
    VisibleName,
}

impl LeafLookup {
    /// The query a [`MenuDom`] should run to find `target`'s leaf.
    pub fn key_for(self, target: &TargetId) -> LeafKey {
        match self {
            Self::DataId => LeafKey::DataId(target.composite()),
            Self::VisibleName => LeafKey::Name(target.item().to_string()),
        }
    }
}

/// A concrete leaf query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafKey {
    /// Attribute equal to this composite identifier.
    DataId(String),
    /// Visible label equal to this name once trimmed.
    Name(String),
}

impl fmt::Display for LeafKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataId(id) => write!(f, "[data-id=\"{id}\"]"),
            Self::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

/// Queries the sequencer runs against the live host UI.
///
/// Every call reflects the tree at the moment of the call; the host may render the
/// menu at any point between calls.
pub trait MenuDom: Send + Sync {
    /// Topmost element under `at`.
    fn element_at(&self, at: Point) -> Option<ElementId>;

    /// The top-level category slice named `name` (`build`, `attack`).
    fn category(&self, name: &str) -> Option<Element>;

    /// The leaf matching `key`, if it is currently rendered.
    fn leaf(&self, key: &LeafKey) -> Option<Element>;

    /// Best-effort latency trim after the menu is requested: disable transitions on
    /// the menu container and drop its decorative center control.
    fn accelerate_menu(&self) {}
}
