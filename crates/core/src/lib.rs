//! Core logic of a bounded two-party conversation held before a decision.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod error;
mod session;

pub use error::{Collaborator, Error};
pub use session::{ConversationSession, DEFAULT_MAX_TURNS, SessionBuilder};
