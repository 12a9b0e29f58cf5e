// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use socrates_app::{ChatId, ChatRuntime, OutboundMessage};
use std::io::Write;
use tracing::info;

/// Chat runtime for the terminal: the "location" is only remembered and
/// logged, and each outbound message is written as one JSON line.
pub struct StdoutRuntime<W: Write> {
    chat_id: ChatId,
    location: Option<String>,
    out: W,
}

impl<W: Write> StdoutRuntime<W> {
    pub fn new(chat_id: ChatId, out: W) -> Self {
        Self {
            chat_id,
            location: None,
            out,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChatRuntime for StdoutRuntime<W> {
    fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    fn replace_location(&mut self, path: &str) {
        info!(path, "location replaced");
        self.location = Some(path.to_owned());
    }

    fn send_message(&mut self, message: OutboundMessage) -> Result<()> {
        let line = serde_json::to_string(&message).context("encode outbound message")?;
        writeln!(self.out, "{line}").context("write outbound message")?;
        self.out.flush().context("flush outbound message")?;
        info!(chat_id = %self.chat_id, bytes = line.len(), "message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StdoutRuntime;
    use anyhow::Result;
    use socrates_app::{ChatId, ChatRuntime, GuidedPromptWidget, WidgetCommand, WidgetKind};

    #[test]
    fn writes_one_json_line_per_message() -> Result<()> {
        let mut widget = GuidedPromptWidget::mount(WidgetKind::LessonPlanner);
        widget.handle(WidgetCommand::SelectSubject("so".to_owned()));
        let mut runtime = StdoutRuntime::new(ChatId::from("c1"), Vec::new());

        widget.trigger("lecture", &mut runtime)?;

        assert_eq!(runtime.location(), Some("/chat/c1"));
        let written = String::from_utf8(runtime.into_inner())?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(value["role"], "user");
        assert_eq!(value["parts"][0]["type"], "text");
        let text = value["parts"][0]["text"].as_str().unwrap_or_default();
        assert!(text.contains("SO (Samhällsorienterande ämnen)"));
        Ok(())
    }

    #[test]
    fn chat_id_is_exposed() {
        let runtime = StdoutRuntime::new(ChatId::from("c2"), Vec::new());
        assert_eq!(runtime.chat_id().as_str(), "c2");
    }
}
