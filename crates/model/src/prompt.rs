use serde::Serialize;
use serde_json::{Map, Value};

/// A prompt to be rendered, identifying the template and carrying its named
/// parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum Prompt<'a> {
    /// Opens a new exchange for the given round.
    InitConversation {
        /// The simulation round this exchange belongs to.
        round: u32,
    },
    /// Answers the other party's latest message.
    Response {
        /// The message being answered.
        last_message: &'a str,
        /// The simulation round this exchange belongs to.
        round: u32,
    },
}

impl Prompt<'_> {
    /// Returns the name of the template to render.
    #[inline]
    pub fn template_name(&self) -> &'static str {
        match self {
            Prompt::InitConversation { .. } => "init_conversation",
            Prompt::Response { .. } => "response",
        }
    }

    /// Returns the named parameters of the template.
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        match *self {
            Prompt::InitConversation { round } => {
                params.insert("round".to_owned(), round.into());
            }
            Prompt::Response {
                last_message,
                round,
            } => {
                params.insert("last_message".to_owned(), last_message.into());
                params.insert("round".to_owned(), round.into());
            }
        }
        params
    }
}
