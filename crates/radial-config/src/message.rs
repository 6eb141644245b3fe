//! Messages delivered from the shortcut bridge to the sequencer's host.

use radial_sequencer::TargetId;
use serde_json::Value;
use tracing::debug;

/// The only action understood by the host side.
pub const SELECT_ACTION: &str = "selectBuildItem";

/// A request to select a leaf.
///
/// Wire shapes: `{"action": "selectBuildItem", "id": "build_City"}` or
/// `{"action": "selectBuildItem", "name": "City"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Composite identifier form.
    SelectById(String),
    /// Plain visible-name form.
    SelectByName(String),
}

impl InboundMessage {
    /// Parse a JSON message. Anything not matching a known shape yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(raw) {
            Ok(v) => Self::from_value(&v),
            Err(e) => {
                debug!(error = %e, "inbound_message_not_json");
                None
            }
        }
    }

    /// Interpret an already-decoded JSON value.
    ///
    /// `id` takes precedence over `name` when both are present and valid. Values
    /// must be non-empty strings.
    pub fn from_value(v: &Value) -> Option<Self> {
        if v.get("action").and_then(Value::as_str) != Some(SELECT_ACTION) {
            debug!("inbound_message_ignored_action");
            return None;
        }
        let field = |key: &str| {
            v.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let msg = field("id")
            .map(Self::SelectById)
            .or_else(|| field("name").map(Self::SelectByName));
        if msg.is_none() {
            debug!("inbound_message_ignored_shape");
        }
        msg
    }

    /// The leaf this message asks for.
    pub fn target(&self, default_category: &str) -> Option<TargetId> {
        match self {
            Self::SelectById(id) => TargetId::parse(id, default_category),
            Self::SelectByName(name) => Some(TargetId::new(default_category, name.as_str())),
        }
    }
}
