//! Prompt template for call summaries

/// Persona and task line that opens every summary prompt
pub const SUMMARIZER_PERSONA: &str = "You are an expert call summarizer. Generate a concise and informative summary of the following call transcript:";

/// Continuation cue the model completes
pub const SUMMARY_CUE: &str = "Summary:";

/// Prompt for summarizing one call transcript
///
/// The transcript is inserted verbatim, without escaping.
pub fn call_summary_prompt(transcript: &str) -> String {
    format!(
        "{}\n\nCall Transcript:\n{}\n\n{}",
        SUMMARIZER_PERSONA, transcript, SUMMARY_CUE
    )
}
