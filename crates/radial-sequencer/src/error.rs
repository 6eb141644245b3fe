//! Error types and result alias for the radial-sequencer crate.
use std::result::Result as StdResult;

use thiserror::Error;

use crate::sequencer::Stage;

/// Crate-local `Result` alias using the sequencer error type.
pub type Result<T> = StdResult<T, Error>;

/// Reasons a menu sequence is rejected or aborted.
///
/// None of these are fatal to the host: the sequence that produced one simply stops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No pointer movement has been observed yet, so there is nowhere to right-click.
    #[error("No pointer position available; move the pointer over the surface first")]
    PreconditionMissing,
    /// A required element was absent when its stage ran.
    #[error("Could not find {what} during {stage}")]
    ElementNotFound {
        /// Stage that performed the lookup.
        stage: Stage,
        /// Description of the missing element.
        what: String,
    },
    /// The leaf never appeared within the polling budget.
    #[error("Leaf \"{target}\" not found after {attempts} attempts")]
    LeafNotFound {
        /// Composite identifier of the leaf.
        target: String,
        /// Number of lookups performed.
        attempts: u32,
    },
    /// The leaf exists but is disabled, so it was not clicked.
    #[error("Leaf \"{target}\" is disabled and cannot be clicked")]
    ElementDisabled {
        /// Composite identifier of the leaf.
        target: String,
    },
    /// Another sequence is already in flight.
    #[error("A menu sequence is already running")]
    Busy,
}
