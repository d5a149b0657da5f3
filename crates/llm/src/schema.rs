//! Output schema for call summaries: `{ "summary": string }`, nothing else

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::SummarizationError;

/// JSON schema handed to backends that support structured output
pub fn summary_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "The summary of the call."
            }
        },
        "required": ["summary"],
        "additionalProperties": false
    })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SummaryPayload {
    summary: String,
}

/// Check a backend reply against the schema and extract the summary text
///
/// The text is returned exactly as the backend produced it.
pub fn validate_summary_reply(reply: Value) -> Result<String, SummarizationError> {
    if !reply.is_object() {
        return Err(SummarizationError::SchemaViolation(format!(
            "expected a JSON object, got {}",
            json_type(&reply)
        )));
    }

    serde_json::from_value::<SummaryPayload>(reply)
        .map(|payload| payload.summary)
        .map_err(|e| SummarizationError::SchemaViolation(e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
