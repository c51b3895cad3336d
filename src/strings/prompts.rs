//! # Prompts
//!
//! Prompt templates (checked in under `prompts/`) and a small renderer for
//! filling their placeholders.

/// A builder for rendering prompts with context.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    pub fn render(self) -> String {
        let mut result = self.template.to_string();
        for (key, value) in self.replacements {
            result = result.replace(key, &value);
        }

        // Any surviving {{...}} means a placeholder was missed
        if let Some(start) = result.find("{{") {
            if let Some(end) = result[start..].find("}}") {
                let placeholder = &result[start..start + end + 2];
                tracing::error!("Unreplaced placeholder found in prompt: {}", placeholder);
            }
        }

        result
    }
}

pub const ANALYSIS_TEMPLATE: &str = include_str!("../../prompts/analysis.md");
pub const CONTENT_TEMPLATE: &str = include_str!("../../prompts/content.md");
pub const CHAT_TEMPLATE: &str = include_str!("../../prompts/chat.md");

/// The intent-analysis prompt: profile context plus the command, with the
/// strict JSON output-shape example.
pub fn analysis_prompt(user_context: &str, command: &str) -> String {
    PromptRenderer::new(ANALYSIS_TEMPLATE)
        .set("{{USER_CONTEXT}}", user_context)
        .set("{{COMMAND}}", command)
        .render()
}

/// The secondary content-generation prompt used when a `create_file` step
/// arrives with no content.
pub fn content_prompt(intent: &str) -> String {
    PromptRenderer::new(CONTENT_TEMPLATE)
        .set("{{INTENT}}", intent)
        .render()
}

/// Plain conversational prompt for chat mode.
pub fn chat_prompt(command: &str, user_context: &str, extra_context: Option<&str>) -> String {
    let mut context = user_context.to_string();
    if let Some(extra) = extra_context {
        if !extra.is_empty() {
            context.push_str(&format!("\nAdditional context: {}\n", extra));
        }
    }
    PromptRenderer::new(CHAT_TEMPLATE)
        .set("{{COMMAND}}", command)
        .set("{{USER_CONTEXT}}", context)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_command_and_context() {
        let prompt = analysis_prompt("- Name: Riya\n", "open calculator");
        assert!(prompt.contains("open calculator"));
        assert!(prompt.contains("- Name: Riya"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_content_prompt_embeds_intent() {
        let prompt = content_prompt("sort a list");
        assert!(prompt.contains("sort a list"));
    }

    #[test]
    fn test_chat_prompt_includes_extra_context() {
        let prompt = chat_prompt("hi", "", Some("we talked about rust"));
        assert!(prompt.contains("we talked about rust"));
    }
}
