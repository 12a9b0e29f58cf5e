// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::actions::{
    ActionDefinition, ActionRegistry, FLASHCARD_MAKER_ACTIONS, LESSON_PLANNER_ACTIONS, PromptArgs,
    TEXT_ASSESSOR_ACTIONS,
};
use crate::catalog::{
    ALL_GRADES, ASSESSMENT_SUBJECTS, COMPULSORY_GRADES, CORE_SUBJECTS, Catalog, resolve_label,
};
use crate::forms::{
    ASSIGNMENT_FIELD, FLASHCARD_TOPIC_FIELD, FieldSpec, FormState, GRADE_PLACEHOLDER,
    STUDENT_TEXT_FIELD, SUBJECT_PLACEHOLDER, TOPIC_FIELD, is_blank, or_placeholder,
};
use crate::{ChatRuntime, ImportOutcome, OutboundMessage, WidgetKind, chat_path};

/// Everything that distinguishes one guided-prompt widget from another.
#[derive(Debug, Clone, Copy)]
pub struct WidgetConfig {
    pub kind: WidgetKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub subjects: Catalog,
    pub grades: Catalog,
    pub topic_field: FieldSpec,
    pub text_field: Option<FieldSpec>,
    pub actions: ActionRegistry,
}

impl WidgetConfig {
    pub fn builder(kind: WidgetKind) -> WidgetConfigBuilder {
        WidgetConfigBuilder {
            config: Self {
                kind,
                title: "",
                subtitle: "",
                subjects: CORE_SUBJECTS,
                grades: COMPULSORY_GRADES,
                topic_field: TOPIC_FIELD,
                text_field: None,
                actions: ActionRegistry::new(&[]),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.subjects.validate()?;
        self.grades.validate()?;
        self.actions.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    pub fn title(mut self, title: &'static str, subtitle: &'static str) -> Self {
        self.config.title = title;
        self.config.subtitle = subtitle;
        self
    }

    pub fn catalogs(mut self, subjects: Catalog, grades: Catalog) -> Self {
        self.config.subjects = subjects;
        self.config.grades = grades;
        self
    }

    pub fn topic_field(mut self, field: FieldSpec) -> Self {
        self.config.topic_field = field;
        self
    }

    pub fn text_field(mut self, field: FieldSpec) -> Self {
        self.config.text_field = Some(field);
        self
    }

    pub fn actions(mut self, actions: ActionRegistry) -> Self {
        self.config.actions = actions;
        self
    }

    pub fn build(self) -> WidgetConfig {
        self.config
    }
}

impl WidgetKind {
    pub fn config(self) -> WidgetConfig {
        let builder = WidgetConfig::builder(self);
        match self {
            Self::LessonPlanner => builder
                .title(
                    "Lektionsplanering",
                    "Välj ämne, årskurs och tema för att komma igång",
                )
                .catalogs(CORE_SUBJECTS, COMPULSORY_GRADES)
                .topic_field(TOPIC_FIELD)
                .actions(LESSON_PLANNER_ACTIONS)
                .build(),
            Self::FlashcardMaker => builder
                .title(
                    "Skapa Flashcards",
                    "Välj ämne, årskurs och tema för att generera studiematerial",
                )
                .catalogs(CORE_SUBJECTS, ALL_GRADES)
                .topic_field(FLASHCARD_TOPIC_FIELD)
                .actions(FLASHCARD_MAKER_ACTIONS)
                .build(),
            Self::StudentTextAssessor => builder
                .title(
                    "Bedöm elevtext",
                    "Ladda upp eller klistra in en elevtext för analys och bedömning",
                )
                .catalogs(ASSESSMENT_SUBJECTS, ALL_GRADES)
                .topic_field(ASSIGNMENT_FIELD)
                .text_field(STUDENT_TEXT_FIELD)
                .actions(TEXT_ASSESSOR_ACTIONS)
                .build(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    SelectSubject(String),
    SelectGrade(String),
    SetTopic(String),
    SetStudentText(String),
    ImportFinished(ImportOutcome),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    SubjectChanged(String),
    GradeChanged(String),
    TopicChanged(String),
    StudentTextChanged,
    StatusUpdated(String),
    StatusCleared,
}

/// One mounted guided-prompt widget: a config plus the form state it owns.
/// Remounting (constructing a new widget) is the only way to reset the form.
#[derive(Debug, Clone)]
pub struct GuidedPromptWidget {
    config: WidgetConfig,
    form: FormState,
    status_line: Option<String>,
}

impl GuidedPromptWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            form: FormState::new(config.text_field.is_some()),
            config,
            status_line: None,
        }
    }

    pub fn mount(kind: WidgetKind) -> Self {
        Self::new(kind.config())
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn handle(&mut self, command: WidgetCommand) -> Vec<WidgetEvent> {
        match command {
            WidgetCommand::SelectSubject(code) => {
                if !self.config.subjects.contains(&code) {
                    debug!(code = %code, "subject not in catalog; keeping raw value");
                }
                self.form.subject = code.clone();
                vec![WidgetEvent::SubjectChanged(code)]
            }
            WidgetCommand::SelectGrade(code) => {
                if !self.config.grades.contains(&code) {
                    debug!(code = %code, "grade not in catalog; keeping raw value");
                }
                self.form.grade = code.clone();
                vec![WidgetEvent::GradeChanged(code)]
            }
            WidgetCommand::SetTopic(topic) => {
                self.form.topic = topic.clone();
                vec![WidgetEvent::TopicChanged(topic)]
            }
            WidgetCommand::SetStudentText(text) => self.replace_student_text(text),
            WidgetCommand::ImportFinished(outcome) => self.apply_import(outcome),
            WidgetCommand::ClearStatus => {
                self.status_line = None;
                vec![WidgetEvent::StatusCleared]
            }
        }
    }

    /// Build the prompt for `action_id` from the current form, or `None` when
    /// the widget has no such action.
    pub fn compose_prompt(&self, action_id: &str) -> Option<String> {
        let action = self.config.actions.resolve(action_id)?;
        Some(self.render(action))
    }

    /// Navigate to the session's chat route, then send the composed prompt.
    /// Unknown actions are ignored; channel errors are returned as-is.
    pub fn trigger<R>(&self, action_id: &str, runtime: &mut R) -> Result<()>
    where
        R: ChatRuntime + ?Sized,
    {
        let Some(text) = self.compose_prompt(action_id) else {
            debug!(
                widget = self.config.kind.as_str(),
                action_id, "unknown action; nothing dispatched"
            );
            return Ok(());
        };

        let path = chat_path(runtime.chat_id());
        runtime.replace_location(&path);
        debug!(
            widget = self.config.kind.as_str(),
            action_id,
            complete = self.form.is_complete(),
            "dispatching prompt"
        );
        runtime.send_message(OutboundMessage::user_text(text))
    }

    fn render(&self, action: &ActionDefinition) -> String {
        let form = &self.form;
        let subject =
            label_or_placeholder(&self.config.subjects, &form.subject, SUBJECT_PLACEHOLDER);
        let grade = label_or_placeholder(&self.config.grades, &form.grade, GRADE_PLACEHOLDER);
        let topic = or_placeholder(&form.topic, self.config.topic_field.placeholder);
        let text = match (form.student_text.as_deref(), self.config.text_field) {
            (Some(text), Some(field)) if is_blank(text) => field.placeholder,
            (Some(text), Some(_)) => text,
            _ => "",
        };

        action.render(&PromptArgs {
            subject,
            grade,
            topic,
            text,
        })
    }

    fn replace_student_text(&mut self, text: String) -> Vec<WidgetEvent> {
        match self.form.student_text.as_mut() {
            Some(slot) => {
                *slot = text;
                vec![WidgetEvent::StudentTextChanged]
            }
            None => Vec::new(),
        }
    }

    fn apply_import(&mut self, outcome: ImportOutcome) -> Vec<WidgetEvent> {
        if !self.form.accepts_student_text() {
            return Vec::new();
        }
        let name = outcome.display_name();
        match outcome {
            ImportOutcome::Loaded { text, .. } => {
                let mut events = self.replace_student_text(text);
                events.push(self.set_status(format!("läste in {name}")));
                events
            }
            ImportOutcome::Failed { error, .. } => {
                warn!(file = %name, %error, "student text import failed");
                vec![self.set_status(format!("kunde inte läsa {name}: {error}"))]
            }
        }
    }

    fn set_status(&mut self, message: String) -> WidgetEvent {
        self.status_line = Some(message.clone());
        WidgetEvent::StatusUpdated(message)
    }
}

fn label_or_placeholder<'a>(catalog: &Catalog, code: &'a str, placeholder: &'a str) -> &'a str {
    if is_blank(code) {
        placeholder
    } else {
        resolve_label(catalog, code.trim())
    }
}
