/// System prompt for copilot Q&A over a card's content.
pub const COPILOT_SYSTEM_PROMPT: &str = r#"You are a helpful, knowledgeable assistant for a historical event reference platform."#;

/// System prompt for the bias judge.
pub const BIAS_SYSTEM_PROMPT: &str = r#"You are an expert in media analysis and bias detection."#;

/// Build the copilot prompt. Question and context are interpolated verbatim.
pub fn build_copilot_prompt(question: &str, context: &str) -> String {
    format!(
        r#"QUESTION FROM USER: {question}

DOCUMENT CONTEXT:
{context}

Your task: Answer the user's question based on the provided document context.
- If you can answer directly from the context, provide a clear answer.
- If the context contains partial information, share what you can and note what's missing.
- If the answer cannot be found in the context at all, politely explain this and suggest what kind of information would help.
- You may use your general knowledge to provide context or clarification, but always prioritize information from the provided document.

Keep your answer:
- Clear and conversational
- Helpful and informative
- Accurate and factual
- In plain, accessible language

Respond with the answer only, no preamble."#
    )
}

/// Build the bias judge prompt over card content, interpolated verbatim.
pub fn build_bias_prompt(content: &str) -> String {
    format!(
        r#"Your task: Analyze the following historical content for neutrality and potential bias.

CONTENT TO ANALYZE:
{content}

Please evaluate the content and return a JSON response in this format:
{{
  "bias_score": <a number from 0.0 to 100.0>,
  "explanation": "A detailed explanation of your analysis"
}}

Where:
- 0-20: Highly neutral and objective
- 21-40: Mostly neutral with minor bias
- 41-60: Balanced but with noticeable bias
- 61-80: Significantly biased
- 81-100: Extremely biased

Evaluation criteria:
1. **Loaded Language:** Check for emotionally charged adjectives or adverbs that inject opinion
2. **Framing:** Assess if events are presented from a single perspective or multiple viewpoints
3. **Attribution:** Look for one-sided attribution of motives or blame
4. **Omissions:** Note important facts or perspectives that are absent
5. **Evidence:** Check if claims are supported or merely asserted
6. **Neutrality:** Consider if the tone maintains professional distance or leans persuasive

Return ONLY the JSON object with bias_score (float) and explanation (string), no additional text."#
    )
}
