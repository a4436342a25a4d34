mod builder;

use parley_model::{Prompt, PromptRenderer, Responder};

use crate::conversation::{ConversationTurn, Exchange, Speaker};
use crate::error::Error;
pub use builder::SessionBuilder;

/// The number of exchange pairs a session allows unless configured.
pub const DEFAULT_MAX_TURNS: usize = 3;

/// A bounded two-party exchange held before a decision, plus the history
/// of all exchanges archived so far.
///
/// The session owns two collaborators: a [`PromptRenderer`] that produces
/// the prompt text, and a [`Responder`] that produces the reply. Nothing
/// else can fail. Collaborator errors are returned as-is and never retried.
///
/// An exchange holds at most `2 * max_turns` turns. [`start`] always writes
/// an initiator turn, and every successful [`respond`] writes a responder
/// turn, regardless of how many turns came before.
///
/// [`start`]: ConversationSession::start
/// [`respond`]: ConversationSession::respond
pub struct ConversationSession<R, M> {
    renderer: R,
    responder: M,
    max_turns: usize,
    current: Vec<ConversationTurn>,
    history: Vec<Exchange>,
}

impl<R: PromptRenderer, M: Responder> ConversationSession<R, M> {
    /// Opens a new exchange for `round` and returns the opening message.
    ///
    /// Any exchange in progress is discarded without being archived. If a
    /// collaborator fails, the error is returned and the exchange is left
    /// empty.
    pub async fn start(&mut self, round: u32) -> Result<String, Error> {
        if !self.current.is_empty() {
            debug!(
                "discarding {} unarchived turns on start",
                self.current.len()
            );
        }
        self.current.clear();

        let reply = self.ask(&Prompt::InitConversation { round }).await?;
        self.append(Speaker::Initiator, &reply);
        debug!("round {round}: exchange started");
        Ok(reply)
    }

    /// Answers `incoming` and returns the reply, or `None` once the exchange
    /// has reached its turn limit.
    ///
    /// At the limit no prompt is rendered and the responder is not called.
    pub async fn respond(
        &mut self,
        incoming: &str,
        round: u32,
    ) -> Result<Option<String>, Error> {
        if self.is_exhausted() {
            debug!(
                "round {round}: turn limit of {} reached, not responding",
                self.turn_limit()
            );
            return Ok(None);
        }

        let prompt = Prompt::Response {
            last_message: incoming,
            round,
        };
        let reply = self.ask(&prompt).await?;
        self.append(Speaker::Responder, &reply);
        Ok(Some(reply))
    }

    async fn ask(&self, prompt: &Prompt<'_>) -> Result<String, Error> {
        let text = self.renderer.render(prompt).map_err(|err| {
            error!("failed to render `{}`: {err}", prompt.template_name());
            Error::renderer(err)
        })?;
        trace!("rendered `{}`: {text:?}", prompt.template_name());

        self.responder.complete(&text).await.map_err(|err| {
            error!("responder failed: {err}");
            Error::responder(err)
        })
    }
}

impl<R, M> ConversationSession<R, M> {
    /// Archives the current exchange into the history.
    ///
    /// Does nothing when the current exchange is empty, so calling this
    /// repeatedly is harmless.
    pub fn end(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let turns = std::mem::take(&mut self.current);
        debug!("archiving an exchange of {} turns", turns.len());
        self.history.push(Exchange::new(turns));
    }

    /// Renders the current exchange as one `speaker: message` line per turn.
    ///
    /// Returns an empty string when there is nothing in progress.
    pub fn summary(&self) -> String {
        self.current
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the turns of the exchange in progress.
    #[inline]
    pub fn current_exchange(&self) -> &[ConversationTurn] {
        &self.current
    }

    /// Returns all archived exchanges, oldest first.
    #[inline]
    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Returns the configured number of exchange pairs.
    #[inline]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Returns `true` if [`respond`](Self::respond) would return `None`.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.len() >= self.turn_limit()
    }

    /// Returns how many more calls to [`respond`](Self::respond) would
    /// append a turn.
    #[inline]
    pub fn remaining_responses(&self) -> usize {
        self.turn_limit().saturating_sub(self.current.len())
    }

    #[inline]
    fn turn_limit(&self) -> usize {
        self.max_turns.saturating_mul(2)
    }

    fn append(&mut self, speaker: Speaker, message: &str) {
        self.current
            .push(ConversationTurn::now(speaker, message.to_owned()));
    }
}
