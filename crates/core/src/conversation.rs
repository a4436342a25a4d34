//! Conversation-related types.

use std::fmt::{self, Display};
use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The party that wrote a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The party that opened the exchange.
    Initiator,
    /// The party answering a message.
    Responder,
}

impl Speaker {
    /// Returns the label used in summaries.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Initiator => "initiator",
            Speaker::Responder => "responder",
        }
    }
}

impl Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in an exchange.
///
/// Turns are immutable once created. The timestamp is taken when the turn
/// is appended and is only meant for ordering and observability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    speaker: Speaker,
    message: String,
    timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub(crate) fn now(speaker: Speaker, message: String) -> Self {
        Self {
            speaker,
            message,
            timestamp: Utc::now(),
        }
    }

    /// Returns who wrote this turn.
    #[inline]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the message text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when this turn was appended.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker, self.message)
    }
}

/// A completed exchange, archived into the session history.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exchange {
    turns: Vec<ConversationTurn>,
}

impl Exchange {
    pub(crate) fn new(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    /// Returns the turns of this exchange in the order they were written.
    #[inline]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }
}

impl Deref for Exchange {
    type Target = [ConversationTurn];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display() {
        let turn =
            ConversationTurn::now(Speaker::Initiator, "Let's cooperate".into());
        assert_eq!(turn.to_string(), "initiator: Let's cooperate");

        let turn = ConversationTurn::now(Speaker::Responder, "Sure".into());
        assert_eq!(turn.to_string(), "responder: Sure");
    }

    #[test]
    fn test_serialize_exchange() {
        let exchange = Exchange::new(vec![
            ConversationTurn::now(Speaker::Initiator, "Hi".into()),
            ConversationTurn::now(Speaker::Responder, "Hello".into()),
        ]);
        let value = serde_json::to_value(&exchange).unwrap();
        let turns = value.as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["speaker"], json!("initiator"));
        assert_eq!(turns[1]["message"], json!("Hello"));

        let back: Exchange = serde_json::from_value(value).unwrap();
        assert_eq!(back, exchange);
    }
}
