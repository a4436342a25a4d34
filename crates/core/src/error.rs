use std::error::Error as StdError;
use std::fmt::{self, Display};

use parley_model::{CollaboratorError, ErrorKind};

/// The collaborator that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collaborator {
    /// The prompt renderer.
    Renderer,
    /// The responder (language model).
    Responder,
}

impl Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Renderer => write!(f, "prompt renderer"),
            Collaborator::Responder => write!(f, "responder"),
        }
    }
}

/// Describes a failed collaborator call during a conversation.
///
/// The session never retries or degrades, the underlying error is kept as
/// the [`source`](StdError::source).
#[derive(Debug)]
pub struct Error {
    collaborator: Collaborator,
    source: Box<dyn CollaboratorError>,
}

impl Error {
    pub(crate) fn renderer<E: CollaboratorError>(err: E) -> Self {
        Self {
            collaborator: Collaborator::Renderer,
            source: Box::new(err),
        }
    }

    pub(crate) fn responder<E: CollaboratorError>(err: E) -> Self {
        Self {
            collaborator: Collaborator::Responder,
            source: Box::new(err),
        }
    }

    /// Returns which collaborator failed.
    #[inline]
    pub fn collaborator(&self) -> Collaborator {
        self.collaborator
    }

    /// Returns the kind reported by the collaborator.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// Returns the collaborator error.
    #[inline]
    pub fn collaborator_error(&self) -> &dyn CollaboratorError {
        self.source.as_ref()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed ({}): {}",
            self.collaborator,
            self.kind(),
            self.source
        )
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source: &(dyn StdError + 'static) = self.source.as_ref();
        Some(source)
    }
}
