// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::HashSet;

use crate::IconRef;

/// Resolved values handed to a prompt template. Every field is already either a
/// display label, user text, or a placeholder token; templates never see empty
/// form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptArgs<'a> {
    pub subject: &'a str,
    pub grade: &'a str,
    /// Topic for the maker widgets, assignment context for the assessor.
    pub topic: &'a str,
    /// Student text. Only the assessor templates read it.
    pub text: &'a str,
}

pub type PromptTemplate = fn(&PromptArgs<'_>) -> String;

#[derive(Debug, Clone, Copy)]
pub struct ActionDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: IconRef,
    pub template: PromptTemplate,
}

impl ActionDefinition {
    pub fn render(&self, args: &PromptArgs<'_>) -> String {
        (self.template)(args)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionRegistry {
    actions: &'static [ActionDefinition],
}

impl ActionRegistry {
    pub const fn new(actions: &'static [ActionDefinition]) -> Self {
        Self { actions }
    }

    pub fn resolve(&self, id: &str) -> Option<&'static ActionDefinition> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ActionDefinition> {
        self.actions.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.actions.iter().map(|action| action.id).collect()
    }

    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            bail!("action registry has no actions");
        }
        let mut seen = HashSet::new();
        for action in self.actions {
            if !seen.insert(action.id) {
                bail!("action id {:?} is registered twice", action.id);
            }
        }
        Ok(())
    }
}

const LESSON_PLAN_ACTIONS: [ActionDefinition; 6] = [
    ActionDefinition {
        id: "lesson-plan",
        label: "Lektionsplanering",
        icon: IconRef::BookOpen,
        template: lesson_plan_prompt,
    },
    ActionDefinition {
        id: "exercises",
        label: "Övningar",
        icon: IconRef::PencilLine,
        template: exercises_prompt,
    },
    ActionDefinition {
        id: "assessment",
        label: "Bedömning",
        icon: IconRef::ClipboardCheck,
        template: assessment_material_prompt,
    },
    ActionDefinition {
        id: "differentiation",
        label: "Differentiering",
        icon: IconRef::Target,
        template: differentiation_prompt,
    },
    ActionDefinition {
        id: "yearly-plan",
        label: "Årsplanering",
        icon: IconRef::Calendar,
        template: yearly_plan_prompt,
    },
    ActionDefinition {
        id: "lecture",
        label: "Genomgång",
        icon: IconRef::Presentation,
        template: lecture_prompt,
    },
];

const FLASHCARD_ACTIONS: [ActionDefinition; 4] = [
    ActionDefinition {
        id: "concepts",
        label: "Begrepp",
        icon: IconRef::List,
        template: concept_cards_prompt,
    },
    ActionDefinition {
        id: "qa",
        label: "Frågor & Svar",
        icon: IconRef::HelpCircle,
        template: question_cards_prompt,
    },
    ActionDefinition {
        id: "true-false",
        label: "Sant/Falskt",
        icon: IconRef::CheckCircle,
        template: true_false_cards_prompt,
    },
    ActionDefinition {
        id: "fill-blank",
        label: "Fyll i luckor",
        icon: IconRef::FileQuestion,
        template: cloze_cards_prompt,
    },
];

const TEXT_ASSESSMENT_ACTIONS: [ActionDefinition; 3] = [
    ActionDefinition {
        id: "assess",
        label: "Bedömning",
        icon: IconRef::Scale,
        template: assess_text_prompt,
    },
    ActionDefinition {
        id: "feedback",
        label: "Formativ respons",
        icon: IconRef::MessageSquarePlus,
        template: formative_feedback_prompt,
    },
    ActionDefinition {
        id: "analysis",
        label: "Språklig analys",
        icon: IconRef::FileText,
        template: language_analysis_prompt,
    },
];

pub const LESSON_PLANNER_ACTIONS: ActionRegistry = ActionRegistry::new(&LESSON_PLAN_ACTIONS);
pub const FLASHCARD_MAKER_ACTIONS: ActionRegistry = ActionRegistry::new(&FLASHCARD_ACTIONS);
pub const TEXT_ASSESSOR_ACTIONS: ActionRegistry = ActionRegistry::new(&TEXT_ASSESSMENT_ACTIONS);

fn lesson_plan_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa en komplett lektionsplanering i {} för {} om {}. Inkludera syfte, centralt innehåll, kunskapskrav enligt Lgr22, lektionsstruktur med tidsangivelser, och bedömning.",
        args.subject, args.grade, args.topic
    )
}

fn exercises_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa övningar i {} för {} om {}. Inkludera övningar på olika nivåer för differentiering (grundläggande, medel, fördjupning).",
        args.subject, args.grade, args.topic
    )
}

fn assessment_material_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa bedömningsunderlag i {} för {} om {}. Inkludera bedömningsmatris kopplad till kunskapskraven i Lgr22, samt förslag på formativ och summativ bedömning.",
        args.subject, args.grade, args.topic
    )
}

fn differentiation_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa differentierade uppgifter och extra anpassningar i {} för {} om {}. Inkludera material för elever som behöver extra stöd och extra utmaningar.",
        args.subject, args.grade, args.topic
    )
}

fn yearly_plan_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa en årsplanering i {} för {} med fokus på {}. Inkludera arbetsområden, tidsfördelning, och koppling till centralt innehåll och kunskapskrav i Lgr22.",
        args.subject, args.grade, args.topic
    )
}

fn lecture_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa en strukturerad genomgång/föreläsning i {} för {} om {}. Inkludera introduktion, huvudmoment, exempel, och sammanfattning.",
        args.subject, args.grade, args.topic
    )
}

fn concept_cards_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa flashcards med viktiga begrepp och förklaringar inom {} för {} som handlar om {}. Formatet ska vara Begrepp på framsidan och Förklaring på baksidan.",
        args.subject, args.grade, args.topic
    )
}

fn question_cards_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa flashcards med frågor och svar inom {} för {} som handlar om {}. Formatet ska vara Fråga på framsidan och Svar på baksidan.",
        args.subject, args.grade, args.topic
    )
}

fn true_false_cards_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa flashcards med påståenden inom {} för {} som handlar om {}. Användaren ska avgöra om det är Sant eller Falskt. Ge rätt svar och en kort förklaring på baksidan.",
        args.subject, args.grade, args.topic
    )
}

fn cloze_cards_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Skapa flashcards där man ska fylla i luckor i meningar (cloze deletions) inom {} för {} som handlar om {}. Svaret (det som ska fyllas i) ska stå på baksidan.",
        args.subject, args.grade, args.topic
    )
}

fn assess_text_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Agera som en examinerad lärare i {} för {}.\nUppgiften var: \"{}\".\n\nDin uppgift är att bedöma följande elevtext utifrån kunskapskraven i Lgr22 (eller motsvarande för gymnasiet/vux).\nGe en nyanserad bedömning med styrkor och utvecklingsområden.\n\nElevtext:\n\"{}\"",
        args.subject, args.grade, args.topic, args.text
    )
}

fn formative_feedback_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Agera som en lärare i {} för {}.\nUppgiften var: \"{}\".\n\nGe formativ respons på följande elevtext. Fokusera på vad eleven har gjort bra och ge konkreta \"two stars and a wish\" för hur eleven kan ta texten till nästa nivå.\nTilltala eleven direkt (\"Du har...\").\n\nElevtext:\n\"{}\"",
        args.subject, args.grade, args.topic, args.text
    )
}

fn language_analysis_prompt(args: &PromptArgs<'_>) -> String {
    format!(
        "Gör en språklig analys av följande elevtext i {} för {}.\nUppgiften var: \"{}\".\n\nAnalysera meningsbyggnad, ordförråd, struktur, stavning och grammatik. Peka på återkommande fel och mönster.\n\nElevtext:\n\"{}\"",
        args.subject, args.grade, args.topic, args.text
    )
}
