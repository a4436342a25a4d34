//! Local fake collaborators for testing purpose.

mod preset;

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use parley_model::{
    CollaboratorError, ErrorKind, Prompt, PromptRenderer, Responder,
};
use serde_json::{Map, Value};
use tokio::time::sleep;

pub use preset::*;

/// The reply used for prompts that have no preset.
pub const DEFAULT_REPLY: &str = "Default response";

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Error {
    #[inline]
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl CollaboratorError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A prompt recorded by [`TestRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPrompt {
    pub template: &'static str,
    pub parameters: Map<String, Value>,
}

/// A renderer that turns every prompt into `Mock prompt for <template>`.
///
/// Clones share the record of rendered prompts, so a test can keep one
/// clone and hand the other to the session.
#[derive(Clone, Default)]
pub struct TestRenderer {
    failing_templates: HashSet<&'static str>,
    rendered: Arc<Mutex<Vec<RenderedPrompt>>>,
}

impl TestRenderer {
    /// Returns the text this renderer produces for `template`.
    #[inline]
    pub fn prompt_for(template: &str) -> String {
        format!("Mock prompt for {template}")
    }

    /// Makes rendering of `template` fail.
    #[inline]
    pub fn fail_template(&mut self, template: &'static str) {
        self.failing_templates.insert(template);
    }

    /// Returns all prompts rendered so far, including failed ones.
    pub fn rendered(&self) -> Vec<RenderedPrompt> {
        lock(&self.rendered).clone()
    }
}

impl PromptRenderer for TestRenderer {
    type Error = crate::Error;

    fn render(&self, prompt: &Prompt<'_>) -> Result<String, Self::Error> {
        let template = prompt.template_name();
        lock(&self.rendered).push(RenderedPrompt {
            template,
            parameters: prompt.parameters(),
        });
        if self.failing_templates.contains(template) {
            return Err(Error {
                message: "template is marked as failing",
                kind: ErrorKind::InvalidPrompt,
            });
        }
        Ok(Self::prompt_for(template))
    }
}

#[derive(Default)]
struct ResponderState {
    prompts: Vec<String>,
    attempts: HashMap<String, u64>,
}

/// A responder that answers prompts from a preset table.
///
/// Prompts without a preset get the default reply, which is
/// [`DEFAULT_REPLY`] unless overridden. Clones share the call log.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestResponder {
    replies: HashMap<String, PresetReply>,
    default_reply: Option<String>,
    delay: Option<Duration>,
    state: Arc<Mutex<ResponderState>>,
}

impl TestResponder {
    #[inline]
    pub fn add_reply<S: Into<String>>(
        &mut self,
        prompt: S,
        reply: PresetReply,
    ) {
        self.replies.insert(prompt.into(), reply);
    }

    #[inline]
    pub fn set_default_reply<S: Into<String>>(&mut self, reply: S) {
        self.default_reply = Some(reply.into());
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every prompt received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.state).prompts.clone()
    }

    /// Returns how many times `complete` has been called.
    pub fn call_count(&self) -> usize {
        lock(&self.state).prompts.len()
    }
}

impl Responder for TestResponder {
    type Error = crate::Error;

    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'static {
        let attempt = {
            let mut state = lock(&self.state);
            state.prompts.push(prompt.to_owned());
            let attempts = state.attempts.entry(prompt.to_owned()).or_default();
            let attempt = *attempts;
            *attempts += 1;
            attempt
        };

        let result = match self.replies.get(prompt) {
            Some(reply) if reply.should_fail(attempt) => Err(Error {
                message: "preset failure",
                kind: ErrorKind::Unavailable,
            }),
            Some(reply) => Ok(reply.text.clone()),
            None => Ok(self
                .default_reply
                .clone()
                .unwrap_or_else(|| DEFAULT_REPLY.to_owned())),
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            result
        }
    }
}
