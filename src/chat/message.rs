use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }
}

/// Append-only visible conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while no user message is in the transcript; the next send then
    /// carries the document.
    pub fn next_send_is_first_turn(&self) -> bool {
        !self.messages.iter().any(|m| m.role == ChatRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_turn_is_derived_from_user_messages() {
        let mut transcript = Transcript::new();
        assert!(transcript.next_send_is_first_turn());

        transcript.push(ChatMessage::model("Hi! I've analyzed the file."));
        assert!(transcript.next_send_is_first_turn());

        transcript.push(ChatMessage::user("Who owns scope?"));
        assert!(!transcript.next_send_is_first_turn());

        transcript.push(ChatMessage::model("Ada Park."));
        transcript.push(ChatMessage::user("And risks?"));
        assert!(!transcript.next_send_is_first_turn());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hey")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["text"], "hey");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(ChatMessage::user("a").id, ChatMessage::user("a").id);
    }
}
