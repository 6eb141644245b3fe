//! Scripted replays against an in-memory menu host.
//!
//! A scenario pairs a [`SceneSpec`] with a list of steps: pointer moves, shortcut
//! commands, raw inbound messages and waits. Each command or message spawns a
//! sequence exactly as the live dispatcher would; the replay then waits for every
//! sequence to finish and reports what happened.

use std::{fmt, fs, path::Path, sync::Arc, time::Duration};

use radial_config::{Config, Dispatcher, SequenceHandle};
use radial_sequencer::{Completion, Point, Scene, SceneSpec, Sequencer};
use serde::Deserialize;
use tokio::{runtime, task, time};
use tracing::debug;

use crate::error::{Error, Result};

/// A replay script.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Host layout.
    pub scene: SceneSpec,
    /// Steps, run in order.
    pub steps: Vec<Step>,
}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Step {
    /// Pointer moved to `(x, y)`.
    Move(f64, f64),
    /// A shortcut command fired.
    Command(String),
    /// A raw JSON message arrived.
    Message(String),
    /// Let `n` milliseconds pass.
    Wait(u64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(x, y) => write!(f, "move ({x}, {y})"),
            Self::Command(c) => write!(f, "command {c}"),
            Self::Message(m) => write!(f, "message {m}"),
            Self::Wait(ms) => write!(f, "wait {ms}ms"),
        }
    }
}

/// What became of one command or message step.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Dropped by the dispatcher before reaching the sequencer.
    Ignored,
    /// The sequence finished.
    Finished(radial_sequencer::Result<Completion>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("ignored"),
            Self::Finished(Ok(done)) => write!(
                f,
                "selected {} after {} lookup(s)",
                done.target, done.attempts
            ),
            Self::Finished(Err(e)) => write!(f, "failed: {e}"),
        }
    }
}

/// Parse a scenario file.
pub fn load(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)?;
    ron::from_str(&text).map_err(|e| Error::Scenario {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Run `scenario` on a fresh single-threaded runtime and print a report.
///
/// Unless `realtime` is set, delays run on tokio's paused clock and the replay
/// finishes immediately.
pub fn run(config: &Config, scenario: Scenario, realtime: bool) -> Result<()> {
    let rt = runtime::Builder::new_current_thread().enable_time().build()?;
    let (scene, outcomes) = rt.block_on(async move {
        if !realtime {
            time::pause();
        }
        let scene = Arc::new(Scene::new(scenario.scene));
        let sequencer = Arc::new(Sequencer::new(
            scene.clone(),
            scene.clone(),
            config.sequencer_options(),
        ));
        let dispatcher = Dispatcher::from_config(config, sequencer);
        play(&dispatcher, &scenario.steps)
            .await
            .map(|outcomes| (scene, outcomes))
    })?;

    println!("requests:");
    for (step, outcome) in &outcomes {
        println!("  {step}: {outcome}");
    }
    println!("signals:");
    for (target, signal) in scene.signals() {
        println!(
            "  {target} {} button={} at ({}, {})",
            signal.kind,
            signal.button.code(),
            signal.at.x,
            signal.at.y
        );
    }
    Ok(())
}

/// Drive `steps` through `dispatcher` and wait for every spawned sequence.
///
/// Each spawned sequence gets one scheduler turn before the next step, so it has
/// claimed the busy flag and snapshotted the pointer by the time later steps run.
pub async fn play(dispatcher: &Dispatcher, steps: &[Step]) -> Result<Vec<(Step, Outcome)>> {
    let mut pending: Vec<(Step, Option<SequenceHandle>)> = Vec::new();
    for step in steps {
        debug!(step = %step, "replay_step");
        match step {
            Step::Move(x, y) => dispatcher.on_pointer_move(Point::new(*x, *y)),
            Step::Wait(ms) => time::sleep(Duration::from_millis(*ms)).await,
            Step::Command(command) => {
                pending.push((step.clone(), dispatcher.on_command(command)));
                task::yield_now().await;
            }
            Step::Message(raw) => {
                pending.push((step.clone(), dispatcher.on_message(raw)));
                task::yield_now().await;
            }
        }
    }

    let mut outcomes = Vec::with_capacity(pending.len());
    for (step, handle) in pending {
        let outcome = match handle {
            Some(h) => Outcome::Finished(h.await?),
            None => Outcome::Ignored,
        };
        outcomes.push((step, outcome));
    }
    Ok(outcomes)
}
