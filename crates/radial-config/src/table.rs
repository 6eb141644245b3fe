//! Shortcut command names and the leaves they select.

use std::collections::{BTreeMap, btree_map};

use radial_sequencer::{CATEGORIES, TargetId};

use crate::{Error, Result};

/// Built-in commands, in composite identifier form.
pub const BUILTIN_COMMANDS: &[(&str, &str)] = &[
    ("select_atom_bomb", "attack_Atom Bomb"),
    ("select_mirv", "attack_MIRV"),
    ("select_h_bomb", "attack_Hydrogen Bomb"),
    ("select_warship", "attack_Warship"),
    ("select_port", "build_Port"),
    ("select_silo", "build_Missile Silo"),
    ("select_sam", "build_SAM Launcher"),
    ("select_defense", "build_Defense Post"),
    ("select_city", "build_City"),
    ("select_factory", "build_Factory"),
];

/// Static lookup from command name to raw target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    /// Command name to raw identifier (composite or plain name).
    entries: BTreeMap<String, String>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandTable {
    /// The built-in table with composite identifiers, e.g. `build_City`.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_COMMANDS
                .iter()
                .map(|(c, t)| ((*c).to_string(), (*t).to_string())),
        )
    }

    /// The built-in table with plain item names, e.g. `City`.
    pub fn builtin_names() -> Self {
        Self::from_entries(BUILTIN_COMMANDS.iter().map(|(c, t)| {
            let name = t.split_once('_').map_or(*t, |(_, item)| item);
            ((*c).to_string(), name.to_string())
        }))
    }

    /// Build a table from `(command, target)` pairs. Later duplicates win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Raw identifier configured for `command`.
    pub fn get(&self, command: &str) -> Option<&str> {
        self.entries.get(command).map(String::as_str)
    }

    /// Resolve `command` to a leaf target.
    pub fn resolve(&self, command: &str, default_category: &str) -> Result<TargetId> {
        self.get(command)
            .and_then(|raw| TargetId::parse(raw, default_category))
            .ok_or_else(|| Error::UnknownCommand(command.to_string()))
    }

    /// Iterate `(command, raw identifier)` pairs in command order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no commands.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry names a leaf: a non-empty item with no surrounding
    /// whitespace, under a known category.
    ///
    /// All problems are reported together.
    pub fn validate(&self, default_category: &str) -> Result<()> {
        let mut problems = Vec::new();
        if !CATEGORIES.contains(&default_category) {
            problems.push(format!(
                "default category \"{default_category}\" is not one of {CATEGORIES:?}"
            ));
        }
        for (command, raw) in &self.entries {
            if command.trim().is_empty() {
                problems.push(format!("empty command name for target \"{raw}\""));
                continue;
            }
            let Some(target) = TargetId::parse(raw, default_category) else {
                problems.push(format!("{command}: empty target \"{raw}\""));
                continue;
            };
            if target.item().trim() != target.item() {
                problems.push(format!(
                    "{command}: item \"{}\" has surrounding whitespace",
                    target.item()
                ));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "invalid command table:\n  {}",
                problems.join("\n  ")
            )))
        }
    }
}

impl<'a> IntoIterator for &'a CommandTable {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use radial_sequencer::{DEFAULT_CATEGORY, LeafKey, LeafLookup};

    use super::*;

    #[test]
    fn builtin_table_resolves_select_city() {
        let t = CommandTable::builtin();
        assert_eq!(t.len(), 10);
        let target = t.resolve("select_city", DEFAULT_CATEGORY).unwrap();
        assert_eq!(target, TargetId::new("build", "City"));
        assert_eq!(
            t.resolve("select_nothing", DEFAULT_CATEGORY),
            Err(Error::UnknownCommand("select_nothing".into()))
        );
    }

    #[test]
    fn composite_ids_round_trip_through_data_id_lookup() {
        let t = CommandTable::builtin();
        t.validate(DEFAULT_CATEGORY).unwrap();
        for (command, raw) in &t {
            let target = t.resolve(command, DEFAULT_CATEGORY).unwrap();
            assert_eq!(target.composite(), *raw);
            assert_eq!(
                LeafLookup::DataId.key_for(&target),
                LeafKey::DataId(raw.clone())
            );
        }
    }

    #[test]
    fn name_table_matches_visible_labels() {
        let ids = CommandTable::builtin();
        let names = CommandTable::builtin_names();
        names.validate(DEFAULT_CATEGORY).unwrap();
        assert_eq!(names.get("select_silo"), Some("Missile Silo"));
        for (command, _) in &ids {
            let by_id = ids.resolve(command, DEFAULT_CATEGORY).unwrap();
            let by_name = names.resolve(command, DEFAULT_CATEGORY).unwrap();
            assert_eq!(
                LeafLookup::VisibleName.key_for(&by_id),
                LeafLookup::VisibleName.key_for(&by_name)
            );
        }
    }

    #[test]
    fn validation_collects_every_problem() {
        let t = CommandTable::from_entries([
            ("select_ok".to_string(), "build_City".to_string()),
            ("select_empty".to_string(), String::new()),
            ("select_padded".to_string(), "attack_ MIRV".to_string()),
            ("select_bare".to_string(), "attack_".to_string()),
        ]);
        let Err(Error::Validation { message, .. }) = t.validate(DEFAULT_CATEGORY) else {
            panic!("expected validation error");
        };
        assert!(message.contains("select_empty"));
        assert!(message.contains("select_padded"));
        assert!(message.contains("select_bare"));
        assert!(!message.contains("select_ok"));
    }

    #[test]
    fn unknown_default_category_is_rejected() {
        assert!(CommandTable::builtin().validate("naval").is_err());
    }
}
