/// System prompt for card generation.
pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are a historian and content creator specializing in Middle Eastern history and politics. You produce well-researched, accurately sourced historical event cards and you return exactly the output format you are asked for."#;

/// Build the card generation prompt.
///
/// Deterministic: identical inputs yield byte-identical output. When
/// `context_text` is absent or empty, the prompt contains no context block
/// and no dangling placeholder. Parameters are interpolated verbatim — the
/// consumer is a model, not a structured parser, so no escaping is done here.
pub fn build_generation_prompt(
    title: &str,
    system_prompt: &str,
    topics_to_cover: &str,
    context_text: Option<&str>,
) -> String {
    let context_section = match context_text {
        Some(text) if !text.is_empty() => format!(
            r#"
ADDITIONAL CONTEXT FROM PROVIDED DOCUMENT:
{text}

Use this context to inform and enhance your response, but also supplement with your knowledge.
"#
        ),
        _ => String::new(),
    };

    format!(
        r#"Your task: Generate a comprehensive, well-researched historical event card.

TITLE: {title}
SYSTEM PROMPT (Your perspective/angle): {system_prompt}
TOPICS TO COVER: {topics_to_cover}
{context_section}
Please generate a response in the following JSON format:
{{
  "title": "The exact title of the event",
  "description": "A detailed, markdown-formatted description of the historical event. Include sections with ## headers, use **bold** for emphasis, and structure the content logically. Aim for 500-1000 words.",
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"]
}}

Guidelines:
1. Be historically accurate and cite sources where relevant
2. Present multiple perspectives on the event
3. Use clear, accessible language
4. Structure the content with headers and bullet points where appropriate
5. Ensure the keywords are relevant and searchable

Return ONLY the JSON object, no additional text."#
    )
}
