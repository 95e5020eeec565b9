//! Persona prompt assembly.
//!
//! Pure string composition: the retrieved passages become a newline-joined
//! context block interpolated with the normalized question into a fixed
//! persona template. No external calls happen here.

use handlebars::Handlebars;
use memex_core::{AppError, AppResult};
use std::collections::HashMap;

/// Fixed persona template for answer generation.
///
/// The persona constrains the model to the supplied memories: warm tone,
/// no invented facts, and an explicit admission when nothing relevant was
/// stored.
const PERSONA_TEMPLATE: &str = "\
You are a warm, attentive personal memory companion. You help the user \
recall and reflect on their own stored notes and memories.

These are the user's stored memories relevant to this conversation:
<memories>
{{context}}
</memories>

User's current question: {{question}}

Guidelines:
- Answer naturally and supportively, like a trusted personal assistant.
- Use only the memories above. Never invent facts, events, or dates.
- If the memories contain nothing relevant, say so explicitly and gently.
- Respond with clear plain text. Do not use special formatting or JSON.
";

/// Assembles the generation prompt from passages and the user's question.
pub struct PromptBuilder {
    handlebars: Handlebars<'static>,
}

impl PromptBuilder {
    /// Create a builder with the default persona template.
    pub fn new() -> AppResult<Self> {
        Self::with_template(PERSONA_TEMPLATE)
    }

    /// Create a builder with a custom persona template.
    ///
    /// The template may reference `{{context}}` and `{{question}}`.
    pub fn with_template(template: &str) -> AppResult<Self> {
        let mut handlebars = Handlebars::new();

        // Plain text prompts, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("persona", template)
            .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

        Ok(Self { handlebars })
    }

    /// Render the prompt for one query.
    ///
    /// Passages are newline-joined into the context block; an empty slice
    /// renders an empty block, which the persona handles by admitting that
    /// no memory was found.
    pub fn build(&self, query: &str, passages: &[String]) -> AppResult<String> {
        let mut variables = HashMap::new();
        variables.insert("context".to_string(), passages.join("\n"));
        variables.insert("question".to_string(), query.to_string());

        self.handlebars
            .render("persona", &variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
    }
}
