//! In-memory radial menu host.
//!
//! A `Scene` models just enough of the reference host UI to exercise a sequencer
//! without a browser: a clickable surface, a radial menu that renders some time
//! after a `contextmenu` signal, category slices, and leaves that render after
//! their category is clicked. Time is measured on the tokio clock, so scenes
//! behave deterministically under a paused test runtime.
//!
//! Every posted signal and every leaf lookup is recorded for inspection.

use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{
    dom::{Element, ElementId, LeafKey, MenuDom},
    geom::{Point, Rect},
    simulate::{PointerSignal, Poster, SignalKind},
    target::TargetId,
};

/// Element id of the clickable surface.
const SURFACE_ID: u64 = 1;
/// First element id handed to category slices.
const CATEGORY_BASE_ID: u64 = 100;
/// First element id handed to leaves.
const LEAF_BASE_ID: u64 = 1000;

/// Static description of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneSpec {
    /// Area that opens the menu when right-clicked.
    pub surface: Rect,
    /// Time from `contextmenu` until the category slices exist.
    #[serde(default)]
    pub menu_render_ms: u64,
    /// Extra transition time on every render, skipped once the menu is accelerated.
    #[serde(default)]
    pub animation_ms: u64,
    /// Category slices of the radial menu.
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
    /// Leaf items.
    #[serde(default)]
    pub leaves: Vec<LeafSpec>,
}

/// A category slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySpec {
    /// Slice name, e.g. `build`.
    pub name: String,
    /// Bounding box once rendered.
    pub rect: Rect,
}

/// A leaf item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafSpec {
    /// Category the leaf renders under.
    pub category: String,
    /// Visible label. Surrounding whitespace is ignored by name lookups.
    pub name: String,
    /// Bounding box once rendered.
    pub rect: Rect,
    /// Rendered but inactive.
    #[serde(default)]
    pub disabled: bool,
    /// Time from the category click until the leaf exists.
    #[serde(default)]
    pub appears_after_ms: u64,
    /// Never rendered.
    #[serde(default)]
    pub hidden: bool,
}

impl LeafSpec {
    /// Value of the leaf's `data-id` attribute.
    pub fn data_id(&self) -> String {
        TargetId::new(self.category.as_str(), self.name.trim()).composite()
    }

    /// Whether this leaf answers `key`.
    fn matches(&self, key: &LeafKey) -> bool {
        match key {
            LeafKey::DataId(id) => self.data_id() == *id,
            LeafKey::Name(name) => self.name.trim() == name,
        }
    }
}

/// Mutable scene state.
#[derive(Debug, Default)]
struct SceneState {
    /// When the menu was last opened.
    opened_at: Option<Instant>,
    /// Category clicked since the menu opened, and when.
    category_clicked: Option<(String, Instant)>,
    /// Transitions disabled.
    accelerated: bool,
    /// Name of the leaf that received a click, if any.
    selected: Option<String>,
    /// Every signal posted, in order.
    signals: Vec<(ElementId, PointerSignal)>,
    /// Number of leaf queries answered.
    leaf_lookups: u32,
}

/// An in-memory host implementing [`MenuDom`] and [`Poster`].
#[derive(Debug)]
pub struct Scene {
    /// Static layout.
    spec: SceneSpec,
    /// Dynamic state.
    state: Mutex<SceneState>,
}

impl Scene {
    /// Build a scene from its description.
    pub fn new(spec: SceneSpec) -> Self {
        Self {
            spec,
            state: Mutex::new(SceneState::default()),
        }
    }

    /// The static layout.
    pub fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    /// Every signal posted so far.
    pub fn signals(&self) -> Vec<(ElementId, PointerSignal)> {
        self.state.lock().signals.clone()
    }

    /// Posted `click`/`contextmenu` signals, one per simulated click.
    pub fn commits(&self) -> Vec<(ElementId, PointerSignal)> {
        self.state
            .lock()
            .signals
            .iter()
            .filter(|(_, s)| matches!(s.kind, SignalKind::Click | SignalKind::ContextMenu))
            .copied()
            .collect()
    }

    /// Name of the leaf that was clicked, if any.
    pub fn selected(&self) -> Option<String> {
        self.state.lock().selected.clone()
    }

    /// Number of leaf lookups answered so far.
    pub fn leaf_lookups(&self) -> u32 {
        self.state.lock().leaf_lookups
    }

    /// Whether the menu has been accelerated.
    pub fn is_accelerated(&self) -> bool {
        self.state.lock().accelerated
    }

    /// Element id of the surface.
    pub const fn surface_id() -> ElementId {
        ElementId(SURFACE_ID)
    }

    /// Element id of the category at `index` in the layout.
    pub fn category_id(index: usize) -> ElementId {
        ElementId(CATEGORY_BASE_ID + index as u64)
    }

    /// Element id of the leaf at `index` in the layout.
    pub fn leaf_id(index: usize) -> ElementId {
        ElementId(LEAF_BASE_ID + index as u64)
    }

    /// Transition time still applied to renders.
    fn animation(&self, state: &SceneState) -> Duration {
        if state.accelerated {
            Duration::ZERO
        } else {
            Duration::from_millis(self.spec.animation_ms)
        }
    }

    /// Whether the category slices are rendered now.
    fn menu_rendered(&self, state: &SceneState) -> bool {
        state.opened_at.is_some_and(|at| {
            Instant::now() >= at + Duration::from_millis(self.spec.menu_render_ms) + self.animation(state)
        })
    }

    /// Rendered category slices with their ids.
    fn rendered_categories<'a>(
        &'a self,
        state: &SceneState,
    ) -> impl Iterator<Item = (usize, &'a CategorySpec)> {
        let rendered = self.menu_rendered(state);
        self.spec
            .categories
            .iter()
            .enumerate()
            .filter(move |_| rendered)
    }
}

impl MenuDom for Scene {
    fn element_at(&self, at: Point) -> Option<ElementId> {
        let state = self.state.lock();
        self.rendered_categories(&state)
            .find(|(_, c)| c.rect.contains(at))
            .map(|(i, _)| Self::category_id(i))
            .or_else(|| self.spec.surface.contains(at).then_some(Self::surface_id()))
    }

    fn category(&self, name: &str) -> Option<Element> {
        let state = self.state.lock();
        self.rendered_categories(&state)
            .find(|(_, c)| c.name == name)
            .map(|(i, c)| Element {
                id: Self::category_id(i),
                rect: c.rect,
                disabled: false,
            })
    }

    fn leaf(&self, key: &LeafKey) -> Option<Element> {
        let mut state = self.state.lock();
        state.leaf_lookups += 1;
        let (category, clicked_at) = state.category_clicked.clone()?;
        let now = Instant::now();
        let animation = self.animation(&state);
        self.spec
            .leaves
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.hidden && l.category == category)
            .filter(|(_, l)| {
                now >= clicked_at + Duration::from_millis(l.appears_after_ms) + animation
            })
            .find(|(_, l)| l.matches(key))
            .map(|(i, l)| Element {
                id: Self::leaf_id(i),
                rect: l.rect,
                disabled: l.disabled,
            })
    }

    fn accelerate_menu(&self) {
        self.state.lock().accelerated = true;
        debug!("scene_accelerated");
    }
}

impl Poster for Scene {
    fn post(&self, target: ElementId, signal: &PointerSignal) {
        let mut state = self.state.lock();
        state.signals.push((target, *signal));
        let now = Instant::now();
        match signal.kind {
            SignalKind::ContextMenu if target == Self::surface_id() => {
                state.opened_at = Some(now);
                state.category_clicked = None;
                trace!("scene_menu_opened");
            }
            SignalKind::Click => {
                if let Some(c) = target
                    .0
                    .checked_sub(CATEGORY_BASE_ID)
                    .filter(|_| target.0 < LEAF_BASE_ID)
                    .and_then(|i| self.spec.categories.get(i as usize))
                {
                    state.category_clicked = Some((c.name.clone(), now));
                    trace!(category = %c.name, "scene_category_clicked");
                } else if let Some(l) = target
                    .0
                    .checked_sub(LEAF_BASE_ID)
                    .and_then(|i| self.spec.leaves.get(i as usize))
                    && !l.disabled
                {
                    state.selected = Some(l.name.trim().to_string());
                    trace!(leaf = %l.name, "scene_leaf_selected");
                }
            }
            _ => {}
        }
    }
}
