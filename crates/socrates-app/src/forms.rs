// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const SUBJECT_PLACEHOLDER: &str = "[ämne]";
pub const GRADE_PLACEHOLDER: &str = "[årskurs]";
pub const TOPIC_PLACEHOLDER: &str = "[ämne/tema]";
pub const ASSIGNMENT_PLACEHOLDER: &str = "[uppgift]";
pub const STUDENT_TEXT_PLACEHOLDER: &str = "[Ingen text angiven]";

/// Static description of one free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub heading: &'static str,
    pub hint: &'static str,
    /// Substituted into the prompt when the field is left empty.
    pub placeholder: &'static str,
}

pub const TOPIC_FIELD: FieldSpec = FieldSpec {
    heading: "Ämne/Tema",
    hint: "T.ex. Fotosyntesen, Multiplikation, Medeltiden...",
    placeholder: TOPIC_PLACEHOLDER,
};

pub const FLASHCARD_TOPIC_FIELD: FieldSpec = FieldSpec {
    heading: "Ämne/Tema",
    hint: "T.ex. Franska revolutionen, Kemi, Engelska glosor...",
    placeholder: TOPIC_PLACEHOLDER,
};

pub const ASSIGNMENT_FIELD: FieldSpec = FieldSpec {
    heading: "Uppgift/Kontext",
    hint: "T.ex. Skriv en novell, Argumenterande text om miljön...",
    placeholder: ASSIGNMENT_PLACEHOLDER,
};

pub const STUDENT_TEXT_FIELD: FieldSpec = FieldSpec {
    heading: "Elevtext",
    hint: "Klistra in elevtexten här...",
    placeholder: STUDENT_TEXT_PLACEHOLDER,
};

/// Per-widget input state. Lives exactly as long as the widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub subject: String,
    pub grade: String,
    pub topic: String,
    /// `Some` only for widgets that accept a student text.
    pub student_text: Option<String>,
}

impl FormState {
    pub fn new(with_student_text: bool) -> Self {
        Self {
            student_text: with_student_text.then(String::new),
            ..Self::default()
        }
    }

    pub fn accepts_student_text(&self) -> bool {
        self.student_text.is_some()
    }

    pub fn is_complete(&self) -> bool {
        let text_filled = self
            .student_text
            .as_deref()
            .is_none_or(|text| !is_blank(text));
        !is_blank(&self.subject) && !is_blank(&self.grade) && !is_blank(&self.topic) && text_filled
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `value` trimmed, or `placeholder` when nothing is left.
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}
