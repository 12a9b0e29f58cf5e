// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use socrates_app::{
    ChatId, ChatRuntime, GuidedPromptWidget, OutboundMessage, WidgetCommand, WidgetKind,
};
use std::path::PathBuf;
use time::{Date, Month, OffsetDateTime, Time};

pub const TEST_CHAT_ID: &str = "4f1c2b7e-0000-4000-8000-000000000001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Navigate(String),
    Send(OutboundMessage),
}

/// `ChatRuntime` that records every side effect in call order.
#[derive(Debug, Clone)]
pub struct RecordingRuntime {
    chat_id: ChatId,
    calls: Vec<RuntimeCall>,
    send_error: Option<String>,
}

impl Default for RecordingRuntime {
    fn default() -> Self {
        Self::new(TEST_CHAT_ID)
    }
}

impl RecordingRuntime {
    pub fn new(chat_id: &str) -> Self {
        Self {
            chat_id: ChatId::from(chat_id),
            calls: Vec::new(),
            send_error: None,
        }
    }

    /// Runtime whose channel rejects every message with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            send_error: Some(message.to_owned()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[RuntimeCall] {
        &self.calls
    }

    pub fn sent_messages(&self) -> Vec<&OutboundMessage> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RuntimeCall::Send(message) => Some(message),
                RuntimeCall::Navigate(_) => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RuntimeCall::Navigate(path) => Some(path.as_str()),
                RuntimeCall::Send(_) => None,
            })
            .collect()
    }

    pub fn single_sent_text(&self) -> Result<String> {
        let messages = self.sent_messages();
        match messages.as_slice() {
            [message] => Ok(message.text()),
            other => bail!("expected exactly one sent message, got {}", other.len()),
        }
    }
}

impl ChatRuntime for RecordingRuntime {
    fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    fn replace_location(&mut self, path: &str) {
        self.calls.push(RuntimeCall::Navigate(path.to_owned()));
    }

    fn send_message(&mut self, message: OutboundMessage) -> Result<()> {
        if let Some(error) = &self.send_error {
            bail!("{error}");
        }
        self.calls.push(RuntimeCall::Send(message));
        Ok(())
    }
}

/// Mount `kind` and fill the shared subject/grade/topic fields.
pub fn filled_widget(
    kind: WidgetKind,
    subject: &str,
    grade: &str,
    topic: &str,
) -> GuidedPromptWidget {
    let mut widget = GuidedPromptWidget::mount(kind);
    widget.handle(WidgetCommand::SelectSubject(subject.to_owned()));
    widget.handle(WidgetCommand::SelectGrade(grade.to_owned()));
    widget.handle(WidgetCommand::SetTopic(topic.to_owned()));
    widget
}

/// Write `content` into a fresh temp dir. Keep the `TempDir` alive while the
/// path is in use.
pub fn write_student_text(name: &str, content: &[u8]) -> Result<(tempfile::TempDir, PathBuf)> {
    let temp = tempfile::tempdir().context("create temp dir")?;
    let path = temp.path().join(name);
    std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok((temp, path))
}

/// Fixed instant for deterministic prompt tests: 2026-01-15 09:30 UTC.
pub fn fixed_now() -> Result<OffsetDateTime> {
    let date = Date::from_calendar_date(2026, Month::January, 15).context("valid fixture date")?;
    let time = Time::from_hms(9, 30, 0).context("valid fixture time")?;
    Ok(date.with_time(time).assume_utc())
}
