//! Grounding prompt construction for answer generation.

/// Instructions prepended to every grounding prompt.
const PREAMBLE: &str = "You are a helpful assistant that answers using ONLY the provided \
knowledge-graph context.\nIf the context does not contain the answer, say that you cannot \
tell from the available information.";

/// Build the answer-generation prompt from the question and the
/// formatted context block.
pub fn build_prompt(question: &str, context: &str) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + context.len() + question.len() + 32);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n# Context\n");
    if context.is_empty() {
        prompt.push_str("(no context retrieved)\n");
    } else {
        prompt.push_str(context);
        prompt.push('\n');
    }
    prompt.push_str("\nQ: ");
    prompt.push_str(question);
    prompt.push_str("\nA:");
    prompt
}
