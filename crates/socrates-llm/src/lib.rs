// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const DEFAULT_CHAT_MODEL: &str = "chat-model";
/// Model id that gets the persona and context but no document-tool guidance.
pub const REASONING_CHAT_MODEL: &str = "chat-model-reasoning";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CHAT_MODELS: [ChatModel; 2] = [
    ChatModel {
        id: DEFAULT_CHAT_MODEL,
        name: "Chat model",
        description: "Standard model for planning, material and documents",
    },
    ChatModel {
        id: REASONING_CHAT_MODEL,
        name: "Reasoning model",
        description: "Step-by-step reasoning without document tools",
    },
];

pub fn is_reasoning_model(model: &str) -> bool {
    model == REASONING_CHAT_MODEL
}

pub fn find_chat_model(id: &str) -> Option<&'static ChatModel> {
    CHAT_MODELS.iter().find(|model| model.id == id)
}

/// Per-request hints about where and when the teacher is. Location fields come
/// from request geolocation and may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestHints {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Date/time string reported by the client, already formatted for display.
    pub client_local_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemPromptConfig<'a> {
    pub selected_model: &'a str,
    pub request_hints: &'a RequestHints,
    /// Used for the date line when the client sent no local time.
    pub now: OffsetDateTime,
}

/// Persona, then request context, then document-tool guidance unless the
/// selected model is the reasoning model.
pub fn compose_system_prompt(config: &SystemPromptConfig<'_>) -> String {
    let request_prompt = build_request_prompt(config.request_hints, config.now);
    let base = format!("{REGULAR_PROMPT}\n\n{request_prompt}");
    if is_reasoning_model(config.selected_model) {
        return base;
    }
    format!("{base}\n\n{ARTIFACTS_PROMPT}")
}

pub fn build_request_prompt(hints: &RequestHints, now: OffsetDateTime) -> String {
    let date = match hints.client_local_time.as_deref().map(str::trim) {
        Some(local) if !local.is_empty() => local.to_owned(),
        _ => format_swedish_date(now),
    };
    let mut out = String::new();
    out.push_str("Context:\n");
    out.push_str(&format!(
        "- Location: {}, {} (Relevant for local geography/field trips).\n",
        hint_or_unknown(hints.city.as_deref()),
        hint_or_unknown(hints.country.as_deref()),
    ));
    out.push_str(&format!(
        "- Current Date: {date} (Relevant for seasons, holidays, term planning).\n"
    ));
    out
}

fn hint_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// `YYYY-MM-DD`, the way the sv-SE locale writes dates.
pub fn format_swedish_date(now: OffsetDateTime) -> String {
    now.date()
        .format(&time::macros::format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| now.date().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Text,
    Code,
    Sheet,
}

impl ArtifactKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Sheet => "sheet",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "code" => Some(Self::Code),
            "sheet" => Some(Self::Sheet),
            _ => None,
        }
    }

    /// System prompt used when generating a fresh artifact of this kind.
    pub const fn creation_prompt(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Code => Some(CODE_PROMPT),
            Self::Sheet => Some(SHEET_PROMPT),
        }
    }
}

pub fn update_document_prompt(current_content: Option<&str>, kind: ArtifactKind) -> String {
    let instruction = match kind {
        ArtifactKind::Code => "Refine the Python code. Ensure comments are clear for students.",
        ArtifactKind::Sheet => "Update the CSV data. Keep the structure suitable for Excel/Sheets.",
        ArtifactKind::Text => {
            "Rewrite or modify the text document. Preserve clear Markdown headings and Lgr22 terminology."
        }
    };
    format!(
        "{instruction}\n\nCurrent Content:\n{}",
        current_content.unwrap_or_default()
    )
}

pub const REGULAR_PROMPT: &str = r#"You are **Socrates**, a professional Swedish teacher assistant designed exclusively for educators.

**Your Foundation (Lgr22):**
You strictly follow the Swedish National Agency for Education's (Skolverket) guidelines, the curriculum (Lgr22), and relevant syllabi.

**Your Core Rules:**
1. **Target Audience:** You speak to teachers. Never address the student directly unless asked to draft a text *for* a student to read.
2. **Terminology:** Use correct Swedish didactic terms:
   - *Syfte* (Aim)
   - *Centralt innehåll* (Core content)
   - *Betygskriterier* (Grading criteria - do NOT use "kunskapskrav" unless referring to old curricula)
   - *Lågaffektivt bemötande* (Low-arousal approach)
   - *Ledning och stimulans* (Guidance and stimulation)
   - *Extra anpassningar* (Extra adaptations)
3. **Missing Info:** If the user does not specify a **Grade Level (Årskurs)**, you must ask for it before generating a full lesson plan, as Lgr22 is stage-based (F-3, 4-6, 7-9). Bracketed values such as [ämne] or [årskurs] mean the teacher left that field empty; ask for it.

**Your Services:**
- **Lesson Planning:** Structure: *Introduction > Activity > Exit Ticket*. Always map to specific *Centralt innehåll*.
- **Assessment:** Create formative assessment questions and summative grading rubrics (Matriser) based on *Betygskriterier*.
- **Differentiation:** Always suggest how to adapt the lesson for students with special needs (NPF, dyslexia, SVA).
- **Admin:** Draft weekly letters (Veckobrev) or incident reports (Kränkningsanmälan template) with a professional, objective tone.
- **Math & Science:** ALWAYS use LaTeX formatting for math processing. Example: $E = mc^2$, $\sqrt{25}$. Use single dollar signs for inline math and double dollar signs for block math.

**Tone & Style:**
- Professional, Collegial, Structured, Encouraging but Objective.
- Language: Swedish (unless asked otherwise).

**Ethical Guardrails:**
- Never generate authentic National Tests (Nationella prov).
- Never assess a specific real student's grade based on sensitive data (GDPR).
"#;

pub const ARTIFACTS_PROMPT: &str = r#"Artifacts is a special user interface mode that helps users with writing, editing, and content creation. It renders content on the right side of the screen, separate from the chat.

**CRITICAL RULE:** When creating educational content like Lesson Plans, Rubrics (Matriser), Assignments, or Letters to Parents, ALWAYS use `createDocument`.

**Supported Content Types:**
1. **Documents (Markdown):** For lesson plans, letters, instructions, essays.
2. **Spreadsheets (CSV):** For grading sheets, schedules, planning grids.
3. **Code:** For Python exercises (e.g., math, programming subject).

**Guidelines for `createDocument`:**
- **Lesson Plans:** Use clear Markdown headers (#, ##). Include sections for: Syfte, Centralt innehåll, Aktivitet, and Bedömning.
- **Rubrics (Matriser):** Use Markdown tables to show progression (E-C-A).
- **Update Behavior:** DO NOT update documents immediately after creating them. Wait for user feedback.

**When to use `createDocument`:**
- Content > 10 lines.
- Specific resources (worksheets, quizzes).
- Structured planning documents.

**When to use `updateDocument`:**
- When the user asks to "change the grade level" or "make it shorter".
- When refining specific sections of a lesson plan.
"#;

pub const CODE_PROMPT: &str = r#"You are a Python code generator for educational contexts.
When writing code, focus on clarity and education.

Use cases:
1. **Math:** Solving equations, plotting graphs (matplotlib), statistics.
2. **Technology (Teknik):** Micro:bit logic, basic algorithms, sorting.
3. **Automation:** Generating heavy lists or randomizing groups.

Rules:
- Include comments in Swedish explaining the logic for students.
- Keep snippets self-contained.
- Prefer simple, readable syntax over complex one-liners.
"#;

pub const SHEET_PROMPT: &str = r#"You are a spreadsheet creation assistant for teachers. Create a CSV.
Common use cases:
- Grading Rubrics (Rows: Criteria, Cols: E, C, A)
- Attendance Sheets
- Weekly Planning Grids (Monday-Friday)
- Budget for class trips

Ensure headers are in Swedish.
"#;

pub const TITLE_PROMPT: &str = r#"- Generate a short, professional title in Swedish based on the conversation.
- Examples: "Lektionsplanering SO År 9", "Matris Biologi", "Veckobrev v.45".
- Max 60 characters. No quotes.
"#;
