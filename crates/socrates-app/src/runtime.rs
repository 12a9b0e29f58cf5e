// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ChatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text { text: String },
}

/// Message handed to the chat channel. Serializes as
/// `{"role":"user","parts":[{"type":"text","text":"..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
}

impl OutboundMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            parts: vec![MessagePart::Text { text: text.into() }],
        }
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                MessagePart::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Side effects a widget needs from its host: the chat session it belongs to,
/// a history-mutation primitive, and the outbound message channel.
pub trait ChatRuntime {
    fn chat_id(&self) -> &ChatId;

    /// Replace the browsable location with `path` without reloading.
    fn replace_location(&mut self, path: &str);

    /// Hand `message` to the chat channel. Errors belong to the channel and are
    /// returned to the caller untouched.
    fn send_message(&mut self, message: OutboundMessage) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::OutboundMessage;
    use anyhow::Result;

    #[test]
    fn outbound_message_serializes_to_chat_shape() -> Result<()> {
        let message = OutboundMessage::user_text("Hej");
        let encoded = serde_json::to_string(&message)?;
        assert_eq!(
            encoded,
            r#"{"role":"user","parts":[{"type":"text","text":"Hej"}]}"#
        );
        Ok(())
    }

    #[test]
    fn outbound_message_text_joins_parts() {
        let message = OutboundMessage::user_text("Skapa övningar");
        assert_eq!(message.text(), "Skapa övningar");
    }
}
