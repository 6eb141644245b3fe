//! Last-known pointer position.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::geom::Point;

/// Records the most recent pointer position reported by the host.
///
/// Every move overwrites the previous value; nothing is filtered or transformed.
/// Clones share the same cell, so the host's move observer and the sequencer can
/// hold separate handles.
#[derive(Clone, Default)]
pub struct PointerTracker {
    /// Latest position, `None` until the first move.
    last: Arc<Mutex<Option<Point>>>,
}

impl PointerTracker {
    /// Create a tracker with no recorded position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move signal.
    pub fn observe_move(&self, at: Point) {
        trace!(x = at.x, y = at.y, "pointer_move");
        *self.last.lock() = Some(at);
    }

    /// The most recent position, if any movement has been observed.
    pub fn last_known_position(&self) -> Option<Point> {
        *self.last.lock()
    }
}
