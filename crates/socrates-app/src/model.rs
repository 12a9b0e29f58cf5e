// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    LessonPlanner,
    FlashcardMaker,
    StudentTextAssessor,
}

impl WidgetKind {
    pub const ALL: [Self; 3] = [
        Self::LessonPlanner,
        Self::FlashcardMaker,
        Self::StudentTextAssessor,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessonPlanner => "lesson-planner",
            Self::FlashcardMaker => "flashcards",
            Self::StudentTextAssessor => "assessor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lesson-planner" => Some(Self::LessonPlanner),
            "flashcards" => Some(Self::FlashcardMaker),
            "assessor" => Some(Self::StudentTextAssessor),
            _ => None,
        }
    }
}

/// Icon shown on an action button. Opaque to the core; front-ends map it to
/// their own glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconRef {
    BookOpen,
    PencilLine,
    ClipboardCheck,
    Target,
    Calendar,
    Presentation,
    List,
    HelpCircle,
    CheckCircle,
    FileQuestion,
    Scale,
    MessageSquarePlus,
    FileText,
}

impl IconRef {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BookOpen => "book-open",
            Self::PencilLine => "pencil-line",
            Self::ClipboardCheck => "clipboard-check",
            Self::Target => "target",
            Self::Calendar => "calendar",
            Self::Presentation => "presentation",
            Self::List => "list",
            Self::HelpCircle => "help-circle",
            Self::CheckCircle => "check-circle",
            Self::FileQuestion => "file-question",
            Self::Scale => "scale",
            Self::MessageSquarePlus => "message-square-plus",
            Self::FileText => "file-text",
        }
    }
}
