//! Leaf target identifiers.

use std::fmt;

/// Category slices known to the host's radial menu.
pub const CATEGORIES: &[&str] = &["build", "attack"];

/// Category used for plain item names.
pub const DEFAULT_CATEGORY: &str = "build";

/// Names a leaf action: the category slice it lives under and the item's name.
///
/// The composite form `"<category>_<item>"` is the value of the leaf's `data-id`
/// attribute in the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId {
    /// Category slice.
    category: String,
    /// Visible item name.
    item: String,
}

impl TargetId {
    /// Build a target from its parts.
    pub fn new(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
        }
    }

    /// Parse a raw identifier.
    ///
    /// `"attack_Atom Bomb"` splits at the first `_` when the prefix is a known
    /// category. Anything else is a plain item name under `default_category`.
    /// Returns `None` for an empty string or a bare category prefix (`"attack_"`).
    pub fn parse(raw: &str, default_category: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if let Some((category, item)) = raw.split_once('_')
            && CATEGORIES.contains(&category)
        {
            return (!item.is_empty()).then(|| Self::new(category, item));
        }
        Some(Self::new(default_category, raw))
    }

    /// Category slice name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Plain item name.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// `"<category>_<item>"`
    pub fn composite(&self) -> String {
        format!("{}_{}", self.category, self.item)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.item)
    }
}
