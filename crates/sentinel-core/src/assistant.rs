//! Chat assistant that relays the conversation to the gateway.

use tracing::{debug, warn};

use sentinel_gateway::InferenceGateway;
use sentinel_model::ChatTurn;

/// First assistant turn of every conversation.
pub const GREETING: &str = "Hello! I'm your Sentinel AI guide. How can I help you navigate \
the fraud detection pipeline today?";
/// Reply used when the gateway answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm having trouble connecting to the brain right now. Please try again!";
/// Reply used when the gateway call fails.
pub const ERROR_FALLBACK: &str = "Apologies, I encountered an error. Please try again later.";

/// Conversation state. Calls are sequential: `send` blocks until the reply
/// (or its fallback) has been appended, so no second message can overlap.
#[derive(Debug, Clone)]
pub struct Assistant {
    history: Vec<ChatTurn>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            history: vec![ChatTurn::assistant(GREETING)],
        }
    }
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Sends `message` with all prior turns and records the reply.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the returned reply
    /// is never empty.
    pub fn send<G: InferenceGateway + ?Sized>(&mut self, gateway: &G, message: &str) -> Option<&str> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let reply = match gateway.converse(message, &self.history) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("assistant reply was empty");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                ERROR_FALLBACK.to_string()
            }
        };
        debug!(turns = self.history.len() + 2, "assistant replied");

        self.history.push(ChatTurn::user(message));
        self.history.push(ChatTurn::assistant(reply));
        self.history.last().map(|turn| turn.text.as_str())
    }
}
