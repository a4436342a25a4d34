use std::fmt::{self, Display};

/// The kind of error that occurred in a collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The collaborator (or the service behind it) can't be reached.
    Unavailable,
    /// The prompt or its parameters were rejected.
    InvalidPrompt,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unavailable => write!(f, "unavailable"),
            ErrorKind::InvalidPrompt => write!(f, "invalid prompt"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}
