//! Output formatting utilities.

use gatehash_canonical::ProfileId;
use gatehash_core::VerificationOutcome;
use serde_json::{json, Value};

/// Renders an outcome as a JSON object tagged with the canonical profile.
pub fn outcome_json(
    outcome: &VerificationOutcome,
    profile: &ProfileId,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(outcome)?;
    if let Value::Object(map) = &mut value {
        map.insert("profile".to_string(), json!(profile.as_ref()));
    }
    Ok(value)
}

/// Renders an outcome as labelled lines.
pub fn format_outcome(outcome: &VerificationOutcome, profile: &ProfileId) -> String {
    let mut lines = vec![format!("{:<9} {}", "STATUS:", outcome.status().as_str().to_uppercase())];
    match outcome {
        VerificationOutcome::Malformed { error } => {
            lines.push(format!("{:<9} {}", "REASON:", error));
        }
        _ => {
            if let Some(digest) = outcome.digest() {
                lines.push(format!("{:<9} {}", "DIGEST:", digest));
            }
            lines.push(format!("{:<9} {}", "PROFILE:", profile));
        }
    }
    lines.join("\n")
}

/// Formats a batch result as a table row.
pub fn format_table_row(line: usize, outcome: &VerificationOutcome) -> String {
    let detail = match outcome {
        VerificationOutcome::Malformed { error } => truncate(&error.to_string(), 64),
        _ => outcome
            .digest()
            .map(|d| d.to_hex())
            .unwrap_or_else(|| "?".to_string()),
    };
    format!("{:<6} {:<11} {}", line, outcome.status().as_str(), detail)
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<6} {:<11} {}", "LINE", "STATUS", "DIGEST");
    println!("{}", "-".repeat(82));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
