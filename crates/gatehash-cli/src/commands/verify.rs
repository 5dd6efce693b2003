//! Verify command implementation.

use gatehash_core::{OutcomeStatus, Verifier};
use tracing::info;

use super::Status;
use crate::errors::CliError;
use crate::{input, output};

pub fn run(
    verifier: &Verifier,
    input: Option<String>,
    expected: Option<String>,
    strict: bool,
    json_output: bool,
) -> Result<Status, CliError> {
    let source = input.as_deref().unwrap_or("<stdin>").to_string();
    let raw = input::read_input(input.as_deref())?;

    let outcome = verifier.verify(&raw, expected.as_deref());
    info!(source = %source, status = %outcome.status(), "receipt checked");

    let profile = verifier.canonicalizer().profile();
    if json_output {
        let value = output::outcome_json(&outcome, profile)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output::format_outcome(&outcome, profile));
    }

    Ok(status_for(outcome.status(), strict))
}

/// Malformed and failed receipts are always rejected; `strict` also rejects
/// receipts that were never compared against a digest.
pub fn status_for(status: OutcomeStatus, strict: bool) -> Status {
    match status {
        OutcomeStatus::Verified => Status::Accepted,
        OutcomeStatus::Unverified if !strict => Status::Accepted,
        _ => Status::Rejected,
    }
}
