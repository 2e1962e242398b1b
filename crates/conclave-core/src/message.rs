//! Inbound conversation types
//!
//! The request shape handed to the core by the transport layer.

use serde::{Deserialize, Serialize};

/// Role in a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool response
    Tool,
}

impl MessageRole {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    #[serde(default)]
    pub content: String,
    /// Optional participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ConversationMessage {
    /// Create a message with the given role
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Chat request as delivered by the transport layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<ConversationMessage>,
    /// Whether the caller wants a chunked response
    #[serde(default)]
    pub stream: bool,
    /// Model requested by the caller (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl InboundRequest {
    /// Single-turn request with one user message
    #[must_use]
    pub fn from_user_text(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ConversationMessage::user(text)],
            stream: false,
            model: None,
        }
    }

    /// Builder-style toggle for streaming
    #[must_use]
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// The newest message with role `user`, if any
    #[must_use]
    pub fn last_user_message(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_as_str() {
        assert_eq!(MessageRole::System.as_str(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
        assert_eq!(MessageRole::Tool.as_str(), "tool");
    }

    #[test]
    fn test_last_user_message_skips_later_assistant_turns() {
        let request = InboundRequest {
            messages: vec![
                ConversationMessage::system("be brief"),
                ConversationMessage::user("@APEX first"),
                ConversationMessage::assistant("done"),
                ConversationMessage::user("@CIPHER second"),
                ConversationMessage::assistant("also done"),
            ],
            stream: false,
            model: None,
        };

        let last = request.last_user_message().unwrap();
        assert_eq!(last.content, "@CIPHER second");
    }

    #[test]
    fn test_last_user_message_none() {
        let request = InboundRequest {
            messages: vec![ConversationMessage::system("only system")],
            ..Default::default()
        };
        assert!(request.last_user_message().is_none());
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let json = r#"{"messages":[{"role":"user","content":"hi"}]}"#;
        let request: InboundRequest = serde_json::from_str(json).unwrap();

        assert!(!request.stream);
        assert!(request.model.is_none());
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert!(request.messages[0].name.is_none());
    }

    #[test]
    fn test_request_deserialize_unknown_role_fails() {
        let json = r#"{"messages":[{"role":"narrator","content":"hi"}]}"#;
        assert!(serde_json::from_str::<InboundRequest>(json).is_err());
    }
}
