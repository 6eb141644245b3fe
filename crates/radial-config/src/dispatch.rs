//! Routes shortcut commands and inbound messages to a sequencer.

use std::sync::Arc;

use radial_sequencer::{Completion, Point, Sequencer, TargetId};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{CommandTable, Config, InboundMessage};

/// Handle to a spawned sequence.
pub type SequenceHandle = JoinHandle<radial_sequencer::Result<Completion>>;

/// Resolves commands through a [`CommandTable`] and spawns sequencer runs.
///
/// Unknown commands and malformed messages are logged and dropped without
/// touching the sequencer. Accepted requests each spawn one task; overlap is
/// settled by the sequencer's busy flag, not here.
#[derive(Clone)]
pub struct Dispatcher {
    /// Command lookup.
    table: CommandTable,
    /// Category for plain item names.
    default_category: String,
    /// The sequencer driven by this dispatcher.
    sequencer: Arc<Sequencer>,
}

impl Dispatcher {
    /// Create a dispatcher over an explicit table.
    pub fn new(
        table: CommandTable,
        default_category: impl Into<String>,
        sequencer: Arc<Sequencer>,
    ) -> Self {
        Self {
            table,
            default_category: default_category.into(),
            sequencer,
        }
    }

    /// Create a dispatcher from a loaded config.
    pub fn from_config(config: &Config, sequencer: Arc<Sequencer>) -> Self {
        Self::new(
            config.command_table(),
            config.default_category.as_str(),
            sequencer,
        )
    }

    /// The sequencer driven by this dispatcher.
    pub fn sequencer(&self) -> &Arc<Sequencer> {
        &self.sequencer
    }

    /// The command table.
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Forward a pointer-move signal to the sequencer's tracker.
    pub fn on_pointer_move(&self, at: Point) {
        self.sequencer.tracker().observe_move(at);
    }

    /// Resolve `command` without running anything.
    pub fn resolve(&self, command: &str) -> crate::Result<TargetId> {
        self.table.resolve(command, &self.default_category)
    }

    /// Handle a shortcut command. Returns the spawned sequence, or `None` if the
    /// command is unknown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_command(&self, command: &str) -> Option<SequenceHandle> {
        match self.resolve(command) {
            Ok(target) => {
                debug!(command, target_id = %target, "command_resolved");
                Some(self.spawn(target))
            }
            Err(e) => {
                warn!(command, error = %e, "command_ignored");
                None
            }
        }
    }

    /// Handle a raw JSON message. Returns the spawned sequence, or `None` if the
    /// message was ignored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_message(&self, raw: &str) -> Option<SequenceHandle> {
        let target = InboundMessage::from_json(raw)?.target(&self.default_category)?;
        debug!(target_id = %target, "message_accepted");
        Some(self.spawn(target))
    }

    /// Spawn one sequencer run.
    fn spawn(&self, target: TargetId) -> SequenceHandle {
        let sequencer = self.sequencer.clone();
        tokio::spawn(async move { sequencer.run(&target).await })
    }
}
