//! Prompt templates for question generation

/// Prompt builder for question generation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full generation prompt from extracted material text and the
    /// user's instruction.
    ///
    /// A literal example of the expected JSON shape is embedded so the engine
    /// is primed to return matching structure. Pure function, no I/O.
    pub fn build_generation_prompt(text: &str, user_prompt: &str) -> String {
        format!(
            r#"Based on the following text: "{text}" and these instructions: "{user_prompt}", generate questions in the following JSON format:
{{
  "mcqs": [
    {{
      "question": "Sample MCQ question",
      "options": ["A) Option 1", "B) Option 2", "C) Option 3", "D) Option 4"],
      "answer": "A) Option 1"
    }}
  ],
  "theory": [
    "Sample theory question 1",
    "Sample theory question 2"
  ]
}}

Generate the questions based on the content. Every MCQ answer must repeat the exact text of one of its options. Return ONLY the JSON with no additional text."#,
            text = text,
            user_prompt = user_prompt
        )
    }
}
