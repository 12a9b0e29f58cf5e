// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{GuidedPromptWidget, WidgetKind};

pub const GREETING: &str = "Hej!";
pub const GREETING_SUBTITLE: &str = "Hur kan jag hjälpa dig idag?";
pub const OPEN_PLANNER_LABEL: &str = "Öppna lektionsplaneraren";
pub const CLOSE_PLANNER_LABEL: &str = "Stäng lektionsplaneraren";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerVisibility {
    Hidden,
    Visible,
}

/// Landing view that mounts the lesson planner on demand. Closing drops the
/// planner, so reopening starts from an empty form.
#[derive(Debug, Clone)]
pub struct PlannerToggle {
    pub visibility: PlannerVisibility,
    pub status_line: Option<String>,
    planner: Option<GuidedPromptWidget>,
}

impl Default for PlannerToggle {
    fn default() -> Self {
        Self {
            visibility: PlannerVisibility::Hidden,
            status_line: None,
            planner: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleCommand {
    OpenPlanner,
    ClosePlanner,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleEvent {
    VisibilityChanged(PlannerVisibility),
    StatusUpdated(String),
    StatusCleared,
}

impl PlannerToggle {
    pub fn dispatch(&mut self, command: ToggleCommand) -> Vec<ToggleEvent> {
        match command {
            ToggleCommand::OpenPlanner => {
                if self.visibility == PlannerVisibility::Visible {
                    return Vec::new();
                }
                self.visibility = PlannerVisibility::Visible;
                self.planner = Some(GuidedPromptWidget::mount(WidgetKind::LessonPlanner));
                vec![
                    ToggleEvent::VisibilityChanged(self.visibility),
                    self.set_status("lektionsplaneraren öppen"),
                ]
            }
            ToggleCommand::ClosePlanner => {
                if self.visibility == PlannerVisibility::Hidden {
                    return Vec::new();
                }
                self.visibility = PlannerVisibility::Hidden;
                self.planner = None;
                vec![
                    ToggleEvent::VisibilityChanged(self.visibility),
                    self.set_status("lektionsplaneraren stängd"),
                ]
            }
            ToggleCommand::ClearStatus => {
                self.status_line = None;
                vec![ToggleEvent::StatusCleared]
            }
        }
    }

    pub fn planner(&self) -> Option<&GuidedPromptWidget> {
        self.planner.as_ref()
    }

    pub fn planner_mut(&mut self) -> Option<&mut GuidedPromptWidget> {
        self.planner.as_mut()
    }

    /// Label of the single button the landing view shows.
    pub const fn button_label(&self) -> &'static str {
        match self.visibility {
            PlannerVisibility::Hidden => OPEN_PLANNER_LABEL,
            PlannerVisibility::Visible => CLOSE_PLANNER_LABEL,
        }
    }

    fn set_status(&mut self, message: &str) -> ToggleEvent {
        self.status_line = Some(message.to_owned());
        ToggleEvent::StatusUpdated(message.to_owned())
    }
}
