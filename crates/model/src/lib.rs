//! The protocol between a conversation session and its collaborators.
//!
//! A session never renders prompts or talks to a language model by itself.
//! It relies on two capabilities supplied by the host agent: a
//! [`PromptRenderer`] that turns a [`Prompt`] into text, and a [`Responder`]
//! that turns that text into a reply.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod collaborator;
mod error;
mod prompt;

pub use collaborator::*;
pub use error::*;
pub use prompt::*;
