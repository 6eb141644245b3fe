//! Test support utilities for radial-sequencer and downstream crates.
//! These helpers are public so integration tests in other crates can share the
//! reference layout. They are intended for use by test suites only.

use std::sync::Arc;

use crate::{
    geom::{Point, Rect},
    scene::{CategorySpec, LeafSpec, Scene, SceneSpec},
    sequencer::{Sequencer, SequencerOptions},
};

/// Items of the reference host's build menu, grouped by category slice.
pub const REFERENCE_ITEMS: &[(&str, &str)] = &[
    ("attack", "Atom Bomb"),
    ("attack", "MIRV"),
    ("attack", "Hydrogen Bomb"),
    ("attack", "Warship"),
    ("build", "Port"),
    ("build", "Missile Silo"),
    ("build", "SAM Launcher"),
    ("build", "Defense Post"),
    ("build", "City"),
    ("build", "Factory"),
];

/// A pointer position inside the reference surface, clear of the menu slices.
pub const POINTER: Point = Point::new(150.0, 300.0);

/// The reference layout: an 800x600 surface, `build` and `attack` slices, and
/// every reference item rendered immediately after its category is clicked.
pub fn reference_scene_spec() -> SceneSpec {
    let leaves = REFERENCE_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (category, name))| LeafSpec {
            category: (*category).to_string(),
            name: (*name).to_string(),
            rect: Rect::new(400.0, 40.0 * i as f64, 120.0, 32.0),
            disabled: false,
            appears_after_ms: 0,
            hidden: false,
        })
        .collect();
    SceneSpec {
        surface: Rect::new(0.0, 0.0, 800.0, 600.0),
        menu_render_ms: 120,
        animation_ms: 0,
        categories: vec![
            CategorySpec {
                name: "build".into(),
                rect: Rect::new(180.0, 240.0, 60.0, 40.0),
            },
            CategorySpec {
                name: "attack".into(),
                rect: Rect::new(180.0, 320.0, 60.0, 40.0),
            },
        ],
        leaves,
    }
}

/// Mutable access to the reference leaf named `name`.
///
/// Panics if the name is not a reference item.
pub fn leaf_mut<'a>(spec: &'a mut SceneSpec, name: &str) -> &'a mut LeafSpec {
    spec.leaves
        .iter_mut()
        .find(|l| l.name == name)
        .unwrap_or_else(|| panic!("no reference leaf named {name}"))
}

/// Build a scene and a sequencer wired to it as both DOM and poster.
pub fn scene_sequencer(
    spec: SceneSpec,
    options: SequencerOptions,
) -> (Arc<Scene>, Arc<Sequencer>) {
    let scene = Arc::new(Scene::new(spec));
    let sequencer = Arc::new(Sequencer::new(scene.clone(), scene.clone(), options));
    (scene, sequencer)
}
