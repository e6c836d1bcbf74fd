//! Prompt-engineering instruction template.

/// Wrap the user's rough idea in the refinement instruction.
///
/// The idea is embedded verbatim between double quotes.
pub fn build_prompt(user_input: &str) -> String {
    format!(
        "You are an expert AI prompt engineer. Transform this rough idea into a detailed, \
creative, and well-structured AI prompt that will generate high-quality results. Make it \
specific, actionable, and engaging. Add relevant context, style guidelines, and technical \
specifications where appropriate.

User's rough idea: \"{user_input}\"

Please provide only the refined prompt, no additional commentary or explanations."
    )
}
