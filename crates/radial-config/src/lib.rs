#![warn(missing_docs)]

//! Configuration and command plumbing for radialkey.
//!
//! - [`CommandTable`]: shortcut command names to leaf identifiers.
//! - [`InboundMessage`]: the `selectBuildItem` message accepted from a host bridge.
//! - [`Config`]: the RON config file, resolved into sequencer options.
//! - [`Dispatcher`]: turns commands and messages into sequencer runs.

mod config;
mod dispatch;
mod error;
mod message;
mod table;

pub use config::{Config, load_from_path};
pub use dispatch::{Dispatcher, SequenceHandle};
pub use error::{Error, Result};
pub use message::{InboundMessage, SELECT_ACTION};
pub use table::{BUILTIN_COMMANDS, CommandTable};
