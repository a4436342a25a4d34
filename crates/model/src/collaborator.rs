use std::error::Error;

use crate::error::ErrorKind;
use crate::prompt::Prompt;

/// The error type for a collaborator.
pub trait CollaboratorError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that renders named prompt templates.
///
/// Rendering is expected to be cheap and local (a template lookup plus
/// parameter substitution), so it is a plain synchronous call.
pub trait PromptRenderer: Send + Sync {
    /// The error type that may be returned by the renderer.
    type Error: CollaboratorError;

    /// Renders the template named by `prompt` with its parameters.
    fn render(&self, prompt: &Prompt<'_>) -> Result<String, Self::Error>;
}

/// A type that produces a reply for a rendered prompt, usually by calling a
/// language model.
///
/// Once the responder is created, it should behave like a stateless object.
/// Every call is a single request and a single, complete reply.
pub trait Responder: Send + Sync {
    /// The error type that may be returned by the responder.
    type Error: CollaboratorError;

    /// Sends the prompt and resolves to the complete reply text.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static;
}
