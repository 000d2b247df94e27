//! Prompt assembly from a bounded window of prior turns.

use serde::{Deserialize, Serialize};

/// Prior turns included in the prompt (most recent, oldest first).
pub const HISTORY_WINDOW: usize = 5;

const USER_LABEL: &str = "用户";
const ASSISTANT_LABEL: &str = "助手";

/// Speaker of a conversation turn. Unknown roles read as assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(other)]
    Assistant,
}

impl Role {
    const fn label(self) -> &'static str {
        match self {
            Self::User => USER_LABEL,
            Self::Assistant => ASSISTANT_LABEL,
        }
    }
}

/// One stored turn, supplied read-only by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Last [`HISTORY_WINDOW`] turns, oldest first. Never drops from the middle.
#[must_use]
pub fn recent_turns(history: &[ConversationTurn]) -> &[ConversationTurn] {
    &history[history.len().saturating_sub(HISTORY_WINDOW)..]
}

/// `label: content` per windowed turn, then the new message and an open
/// assistant line.
#[must_use]
pub fn build_prompt(message: &str, history: &[ConversationTurn]) -> String {
    let mut prompt = String::new();
    for turn in recent_turns(history) {
        prompt.push_str(turn.role.label());
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }
    prompt.push_str(USER_LABEL);
    prompt.push_str(": ");
    prompt.push_str(message);
    prompt.push('\n');
    prompt.push_str(ASSISTANT_LABEL);
    prompt.push(':');
    prompt
}
