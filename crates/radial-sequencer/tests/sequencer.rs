use std::time::Duration;

use radial_sequencer::{
    Button, Error, LeafLookup, Point, Scene, SequencerOptions, SignalKind, Stage, TargetId,
    TimingSpec,
    test_support::{POINTER, leaf_mut, reference_scene_spec, scene_sequencer},
};
use tokio::time::{Instant, advance, sleep};

fn city() -> TargetId {
    TargetId::new("build", "City")
}

/// Assert that `start` is `ms` in the past, allowing for timer-wheel rounding.
fn assert_elapsed(start: Instant, ms: u64) {
    let elapsed = start.elapsed();
    let want = Duration::from_millis(ms);
    assert!(
        elapsed >= want && elapsed < want + Duration::from_millis(20),
        "elapsed {elapsed:?}, expected about {want:?}"
    );
}

/// Index of `name` in the reference leaf list.
fn leaf_index(name: &str) -> usize {
    reference_scene_spec()
        .leaves
        .iter()
        .position(|l| l.name == name)
        .expect("reference leaf")
}

#[tokio::test(start_paused = true)]
async fn select_city_clicks_menu_category_then_leaf() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let start = Instant::now();
    let done = seq.run(&city()).await.expect("sequence completes");
    assert_elapsed(start, 600);
    assert_eq!(done.attempts, 1);
    assert_eq!(seq.stage(), Stage::Done);
    assert!(!seq.is_busy());

    let commits = scene.commits();
    assert_eq!(commits.len(), 3);
    let (target, open) = commits[0];
    assert_eq!(target, Scene::surface_id());
    assert_eq!(open.kind, SignalKind::ContextMenu);
    assert_eq!(open.button, Button::Secondary);
    assert_eq!(open.at, Point::new(150.0, 300.0));

    let (target, category) = commits[1];
    assert_eq!(target, Scene::category_id(0));
    assert_eq!(category.kind, SignalKind::Click);
    assert_eq!(category.at, Point::new(210.0, 260.0));

    let (target, leaf) = commits[2];
    assert_eq!(target, Scene::leaf_id(leaf_index("City")));
    assert_eq!(leaf.button, Button::Primary);
    assert_eq!(leaf.at, Point::new(460.0, 336.0));

    assert_eq!(scene.selected().as_deref(), Some("City"));
    // Each click is a full down/up/commit triplet.
    assert_eq!(scene.signals().len(), 9);
}

#[tokio::test(start_paused = true)]
async fn slow_leaf_is_found_by_polling() {
    let mut spec = reference_scene_spec();
    leaf_mut(&mut spec, "City").appears_after_ms = 650;
    let (scene, seq) = scene_sequencer(spec, SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let start = Instant::now();
    let done = seq.run(&city()).await.expect("sequence completes");
    // Category click at 300ms, leaf renders at 950ms: lookups at 600, 800, 1000.
    assert_eq!(done.attempts, 3);
    assert_eq!(scene.leaf_lookups(), 3);
    assert_elapsed(start, 1000);
    assert_eq!(scene.selected().as_deref(), Some("City"));
}

#[tokio::test(start_paused = true)]
async fn missing_leaf_fails_after_exactly_ten_lookups() {
    let mut spec = reference_scene_spec();
    leaf_mut(&mut spec, "Missile Silo").hidden = true;
    let (scene, seq) = scene_sequencer(spec, SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let start = Instant::now();
    let err = seq
        .run(&TargetId::new("build", "Missile Silo"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::LeafNotFound {
            target: "build_Missile Silo".into(),
            attempts: 10
        }
    );
    assert_eq!(scene.leaf_lookups(), 10);
    assert_elapsed(start, 300 + 300 + 9 * 200);
    assert_eq!(seq.stage(), Stage::Failed);
    // Only the right-click and the category click were committed.
    assert_eq!(scene.commits().len(), 2);
    assert_eq!(scene.selected(), None);

    // Nothing keeps polling once the sequence has failed.
    advance(Duration::from_secs(5)).await;
    assert_eq!(scene.leaf_lookups(), 10);
}

#[tokio::test(start_paused = true)]
async fn found_leaf_stops_polling() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    seq.tracker().observe_move(POINTER);
    seq.run(&city()).await.expect("sequence completes");
    advance(Duration::from_secs(5)).await;
    assert_eq!(scene.leaf_lookups(), 1);
}

#[tokio::test(start_paused = true)]
async fn disabled_leaf_is_not_clicked() {
    let mut spec = reference_scene_spec();
    leaf_mut(&mut spec, "City").disabled = true;
    let (scene, seq) = scene_sequencer(spec, SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let err = seq.run(&city()).await.unwrap_err();
    assert_eq!(
        err,
        Error::ElementDisabled {
            target: "build_City".into()
        }
    );
    assert_eq!(scene.leaf_lookups(), 1);
    assert_eq!(scene.commits().len(), 2);
    assert_eq!(scene.selected(), None);
}

#[tokio::test(start_paused = true)]
async fn no_pointer_aborts_before_any_signal() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    let start = Instant::now();
    assert_eq!(seq.run(&city()).await.unwrap_err(), Error::PreconditionMissing);
    assert_elapsed(start, 0);
    assert!(scene.signals().is_empty());
    assert_eq!(seq.stage(), Stage::Failed);
    assert!(!seq.is_busy());
}

#[tokio::test(start_paused = true)]
async fn pointer_off_surface_fails_in_opening() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    seq.tracker().observe_move(Point::new(1200.0, 10.0));
    let err = seq.run(&city()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::ElementNotFound {
            stage: Stage::Opening,
            ..
        }
    ));
    assert!(scene.signals().is_empty());
}

#[tokio::test(start_paused = true)]
async fn missing_category_is_not_retried() {
    let mut spec = reference_scene_spec();
    spec.categories.retain(|c| c.name != "attack");
    let (scene, seq) = scene_sequencer(spec, SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let start = Instant::now();
    let err = seq
        .run(&TargetId::new("attack", "Atom Bomb"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ElementNotFound {
            stage: Stage::CategorySelect,
            ..
        }
    ));
    assert_elapsed(start, 300);
    assert_eq!(scene.commits().len(), 1);
    assert_eq!(scene.leaf_lookups(), 0);
}

#[tokio::test(start_paused = true)]
async fn overlapping_run_is_rejected_without_disturbing_the_first() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    seq.tracker().observe_move(POINTER);

    let first = tokio::spawn({
        let seq = seq.clone();
        async move { seq.run(&city()).await }
    });
    sleep(Duration::from_millis(100)).await;
    assert!(seq.is_busy());
    assert_eq!(seq.stage(), Stage::Opening);

    let second = seq.run(&TargetId::new("attack", "MIRV")).await;
    assert_eq!(second.unwrap_err(), Error::Busy);
    assert_eq!(seq.stage(), Stage::Opening);

    let done = first.await.expect("join").expect("first completes");
    assert_eq!(done.target, city());
    assert_eq!(scene.selected().as_deref(), Some("City"));
    assert_eq!(scene.commits().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn busy_flag_resets_after_terminal_state_by_default() {
    let (scene, seq) = scene_sequencer(reference_scene_spec(), SequencerOptions::default());
    seq.tracker().observe_move(POINTER);
    seq.run(&city()).await.expect("first completes");
    seq.run(&TargetId::new("attack", "Warship"))
        .await
        .expect("second completes");
    assert_eq!(scene.selected().as_deref(), Some("Warship"));
}

#[tokio::test(start_paused = true)]
async fn latched_busy_flag_rejects_everything_after_the_first_run() {
    let opts = SequencerOptions {
        busy: radial_sequencer::BusyPolicy::Latched,
        ..SequencerOptions::default()
    };
    let (scene, seq) = scene_sequencer(reference_scene_spec(), opts);
    // Even a failed first run latches the flag.
    assert_eq!(seq.run(&city()).await.unwrap_err(), Error::PreconditionMissing);
    seq.tracker().observe_move(POINTER);
    assert_eq!(seq.run(&city()).await.unwrap_err(), Error::Busy);
    assert!(seq.is_busy());
    assert!(scene.signals().is_empty());
}

#[tokio::test(start_paused = true)]
async fn visible_name_lookup_matches_trimmed_label() {
    let mut spec = reference_scene_spec();
    leaf_mut(&mut spec, "City").name = "  City\n".into();
    let opts = SequencerOptions {
        lookup: LeafLookup::VisibleName,
        ..SequencerOptions::default()
    };
    let (scene, seq) = scene_sequencer(spec, opts);
    seq.tracker().observe_move(POINTER);
    seq.run(&city()).await.expect("sequence completes");
    assert_eq!(scene.selected().as_deref(), Some("City"));
}

#[tokio::test(start_paused = true)]
async fn acceleration_beats_slow_menu_animation() {
    let mut spec = reference_scene_spec();
    spec.animation_ms = 400;

    let (scene, seq) = scene_sequencer(spec.clone(), SequencerOptions::default());
    seq.tracker().observe_move(POINTER);
    let err = seq.run(&city()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::ElementNotFound {
            stage: Stage::CategorySelect,
            ..
        }
    ));
    assert!(!scene.is_accelerated());

    let opts = SequencerOptions {
        accelerate: true,
        ..SequencerOptions::default()
    };
    let (scene, seq) = scene_sequencer(spec, opts);
    seq.tracker().observe_move(POINTER);
    seq.run(&city()).await.expect("sequence completes");
    assert!(scene.is_accelerated());
    assert_eq!(scene.selected().as_deref(), Some("City"));
}

#[tokio::test(start_paused = true)]
async fn custom_timings_shape_the_retry_window() {
    let mut spec = reference_scene_spec();
    leaf_mut(&mut spec, "Port").hidden = true;
    let opts = SequencerOptions {
        timings: TimingSpec {
            open_settle_ms: Some(350),
            category_settle_ms: Some(400),
            leaf_poll_ms: Some(50),
            leaf_max_attempts: Some(4),
        }
        .resolve(),
        ..SequencerOptions::default()
    };
    let (scene, seq) = scene_sequencer(spec, opts);
    seq.tracker().observe_move(POINTER);
    let start = Instant::now();
    let err = seq.run(&TargetId::new("build", "Port")).await.unwrap_err();
    assert!(matches!(err, Error::LeafNotFound { attempts: 4, .. }));
    assert_eq!(scene.leaf_lookups(), 4);
    assert_elapsed(start, 350 + 400 + 3 * 50);
}
