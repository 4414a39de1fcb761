//! Parsing and validation of raw engine completions

use crate::error::{Error, Result};
use crate::types::question::QuestionSet;

/// Parse an engine's raw text completion into a validated question set.
///
/// Engines are asked to return bare JSON but routinely wrap it in prose or
/// markdown fences, so the first balanced outermost object is located and
/// decoded; everything around it is ignored. Decode failures are
/// `Error::Parse`, shape violations `Error::Validation`.
pub fn parse_question_set(raw: &str) -> Result<QuestionSet> {
    let json = extract_json_object(raw)
        .ok_or_else(|| Error::Parse("no balanced JSON object in completion".to_string()))?;

    let set: QuestionSet = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("completion JSON did not decode: {}", e)))?;

    set.validate()?;
    Ok(set)
}

/// Locate the first balanced `{...}` in the text.
///
/// Matches from the first opening brace to its corresponding closing brace.
/// Braces inside JSON string literals (and escaped quotes inside those) do
/// not count toward the balance.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
