//! Chat message types and outbound normalization.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System instruction (persona, task framing).
    System,
    /// Message from the user.
    User,
    /// Message from the model.
    Assistant,
}

/// A single message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Normalizes a message sequence for submission to the engine.
///
/// System-role messages are moved to the front of the sequence. The partition
/// is stable: system messages keep their relative order (first occurrence
/// stays first, no dedup), and non-system messages keep theirs.
pub fn normalize_messages(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let (mut system, rest): (Vec<_>, Vec<_>) = messages
        .into_iter()
        .partition(|message| message.role == MessageRole::System);
    system.extend(rest);
    system
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_moved_to_front() {
        let normalized = normalize_messages(vec![
            ChatMessage::user("bonjour"),
            ChatMessage::system("tu es un assistant d'écriture"),
        ]);

        assert_eq!(normalized[0].role, MessageRole::System);
        assert_eq!(normalized[1].content, "bonjour");
    }

    #[test]
    fn test_non_system_relative_order_preserved() {
        let normalized = normalize_messages(vec![
            ChatMessage::user("a"),
            ChatMessage::assistant("b"),
            ChatMessage::system("s"),
            ChatMessage::user("c"),
        ]);

        let contents: Vec<&str> = normalized.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["s", "a", "b", "c"]);
    }

    #[test]
    fn test_multiple_system_messages_keep_order_no_dedup() {
        let normalized = normalize_messages(vec![
            ChatMessage::user("a"),
            ChatMessage::system("first"),
            ChatMessage::system("second"),
        ]);

        let contents: Vec<&str> = normalized.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "a"]);
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        assert_eq!(normalize_messages(messages.clone()), messages);
    }
}
