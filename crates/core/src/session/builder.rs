use parley_model::{PromptRenderer, Responder};

use super::{ConversationSession, DEFAULT_MAX_TURNS};

/// [`ConversationSession`] builder.
pub struct SessionBuilder<R, M> {
    renderer: R,
    responder: M,
    max_turns: usize,
}

impl<R: PromptRenderer, M: Responder> SessionBuilder<R, M> {
    /// Creates a new builder with the specified collaborators.
    #[inline]
    pub fn new(renderer: R, responder: M) -> Self {
        Self {
            renderer,
            responder,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Sets the number of exchange pairs, the exchange holds at most twice
    /// as many turns.
    #[inline]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Builds the session.
    #[inline]
    pub fn build(self) -> ConversationSession<R, M> {
        ConversationSession {
            renderer: self.renderer,
            responder: self.responder,
            max_turns: self.max_turns,
            current: Vec::new(),
            history: Vec::new(),
        }
    }
}
