//! The radialkey config file.

use std::{collections::BTreeMap, fs, path::Path};

use radial_sequencer::{
    BusyPolicy, DEFAULT_CATEGORY, LeafLookup, SequencerOptions, TimingSpec,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CommandTable, Error, Result};

/// User configuration, as written in RON. Every field is optional.
///
/// ```ron
/// (
///     timings: (open_settle_ms: Some(400), leaf_max_attempts: Some(15)),
///     busy: ResetOnTerminal,
///     leaf_lookup: VisibleName,
///     accelerate: true,
///     commands: Some({ "select_city": "City" }),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settle delays and leaf polling overrides.
    pub timings: TimingSpec,
    /// Busy flag reset behavior.
    pub busy: BusyPolicy,
    /// How leaves are matched in the host UI.
    pub leaf_lookup: LeafLookup,
    /// Disable menu animations after opening it.
    pub accelerate: bool,
    /// Category used for plain item names.
    pub default_category: String,
    /// Command table override. `None` keeps the built-in table.
    pub commands: Option<BTreeMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timings: TimingSpec::default(),
            busy: BusyPolicy::default(),
            leaf_lookup: LeafLookup::default(),
            accelerate: false,
            default_category: DEFAULT_CATEGORY.to_string(),
            commands: None,
        }
    }
}

impl Config {
    /// Parse and validate a config from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the command table against the configured default category.
    pub fn validate(&self) -> Result<()> {
        self.command_table().validate(&self.default_category)
    }

    /// The effective command table.
    pub fn command_table(&self) -> CommandTable {
        match &self.commands {
            Some(map) => CommandTable::from_entries(map.clone()),
            None => CommandTable::builtin(),
        }
    }

    /// Options for constructing a sequencer, with timings clamped into range.
    pub fn sequencer_options(&self) -> SequencerOptions {
        SequencerOptions {
            timings: self.timings.resolve(),
            busy: self.busy,
            lookup: self.leaf_lookup,
            accelerate: self.accelerate,
        }
    }
}

/// Load and validate a config from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let config = Config::from_ron(&text).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), "config_loaded");
    Ok(config)
}
