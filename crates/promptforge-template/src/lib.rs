//! Prompt template construction.
//!
//! Renders the user's structured fields into a single instruction-style
//! text block for the model. Rendering is pure: no I/O, no side effects,
//! and identical inputs always produce byte-identical output.

/// Structured user input for a refinement request.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    pub role: &'a str,
    pub task: &'a str,
    pub example: &'a str,
    pub reasoning: &'a str,
    pub external_source: &'a str,
    pub output_format: &'a str,
    pub prompt_format: &'a str,
}

/// Clause inserted when the user wants retrieval-augmented generation.
const RAG_CLAUSE: &str = "Include placeholders or structure that allows retrieved knowledge \
to be inserted. Make it compatible with Retrieval-Augmented Generation (RAG) use cases.";

/// Prompt templates for the refinement request sent to the provider.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Render the instruction template embedding every field verbatim.
    ///
    /// The RAG clause is inserted exactly once when `external_source`
    /// case-insensitively equals "yes".
    pub fn render(fields: &PromptFields) -> String {
        let external_source_instruction = if fields.external_source.eq_ignore_ascii_case("yes") {
            RAG_CLAUSE
        } else {
            ""
        };

        format!(
            r#"You are an expert prompt engineer. Create a clear, concise, and well-structured prompt based on the following user input:
- Role: {role}
- Task: {task}
- Example: {example}
- Reasoning Style: {reasoning}
- External Source: {external_source}
- Desired Output Format: {output_format}
- Prompt Format: {prompt_format}

{external_source_instruction}
Ensure proper grammar and an appropriate tone (adjusted based on the specified role or any mentioned style). Incorporate the reasoning style (e.g., include "Let's think step by step" if Chain-of-Thought is requested). Use any provided examples or external context to clarify the task.

Structure the generated prompt according to the selected Prompt Format: **{prompt_format}**, and ensure its final output is formatted as: **{output_format}**.

Avoid model-specific references so the prompt remains compatible with any AI model.

Refined Prompt:
"#,
            role = fields.role,
            task = fields.task,
            example = fields.example,
            reasoning = fields.reasoning,
            external_source = fields.external_source,
            output_format = fields.output_format,
            prompt_format = fields.prompt_format,
            external_source_instruction = external_source_instruction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields<'a>(external_source: &'a str) -> PromptFields<'a> {
        PromptFields {
            role: "data analyst",
            task: "summarize quarterly sales",
            example: "Q1 revenue grew 4%",
            reasoning: "Chain-of-Thought",
            external_source,
            output_format: "markdown",
            prompt_format: "instruction",
        }
    }

    #[test]
    fn test_fields_embedded_verbatim() {
        let rendered = PromptTemplate::render(&sample_fields("no"));
        assert!(rendered.contains("data analyst"));
        assert!(rendered.contains("summarize quarterly sales"));
        assert!(rendered.contains("Q1 revenue grew 4%"));
        assert!(rendered.contains("Chain-of-Thought"));
        assert!(rendered.contains("**markdown**"));
        assert!(rendered.contains("**instruction**"));
    }

    #[test]
    fn test_rag_clause_only_when_yes() {
        let without = PromptTemplate::render(&sample_fields("no"));
        assert!(!without.contains("Retrieval-Augmented Generation"));

        let with = PromptTemplate::render(&sample_fields("yes"));
        assert_eq!(with.matches("Retrieval-Augmented Generation").count(), 1);
    }

    #[test]
    fn test_rag_clause_case_insensitive() {
        for value in ["yes", "Yes", "YES", "yEs"] {
            let rendered = PromptTemplate::render(&sample_fields(value));
            assert_eq!(
                rendered.matches("Retrieval-Augmented Generation").count(),
                1,
                "expected RAG clause for external_source={value}"
            );
        }

        let rendered = PromptTemplate::render(&sample_fields("yessir"));
        assert!(!rendered.contains("Retrieval-Augmented Generation"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let fields = sample_fields("yes");
        assert_eq!(
            PromptTemplate::render(&fields),
            PromptTemplate::render(&fields)
        );
    }
}
