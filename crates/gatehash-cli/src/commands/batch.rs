//! Verify-batch command implementation.

use gatehash_core::{OutcomeStatus, VerificationOutcome, Verifier};
use serde_json::Value;
use tracing::{debug, info};

use super::verify::status_for;
use super::Status;
use crate::errors::CliError;
use crate::{input, output};

/// Tally of outcomes across a batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub verified: usize,
    pub unverified: usize,
    pub failed: usize,
    pub malformed: usize,
}

impl Summary {
    fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Verified => self.verified += 1,
            OutcomeStatus::Unverified => self.unverified += 1,
            OutcomeStatus::Failed => self.failed += 1,
            OutcomeStatus::Malformed => self.malformed += 1,
        }
    }

    fn total(&self) -> usize {
        self.verified + self.unverified + self.failed + self.malformed
    }
}

/// Verifies each non-blank receipt line; the expected digest for a receipt is
/// the digests-file line with the same line number.
pub fn verify_lines(
    verifier: &Verifier,
    receipts: &[u8],
    digests: Option<&[u8]>,
    max_receipts: Option<usize>,
) -> Vec<(usize, VerificationOutcome)> {
    let expected_lines = digests.map(input::split_lines).unwrap_or_default();

    input::split_lines(receipts)
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .take(max_receipts.unwrap_or(usize::MAX))
        .map(|(idx, line)| {
            let expected = expected_lines
                .get(idx)
                .map(|raw| String::from_utf8_lossy(raw).into_owned());
            let outcome = verifier.verify(line, expected.as_deref());
            debug!(line = idx + 1, status = %outcome.status(), "batch receipt checked");
            (idx + 1, outcome)
        })
        .collect()
}

pub fn run(
    verifier: &Verifier,
    receipts: String,
    digests: Option<String>,
    strict: bool,
    json_output: bool,
    max_receipts: Option<usize>,
) -> Result<Status, CliError> {
    let receipt_bytes = input::read_file(&receipts)?;
    let digest_bytes = digests.as_deref().map(input::read_file).transpose()?;

    let results = verify_lines(verifier, &receipt_bytes, digest_bytes.as_deref(), max_receipts);

    let mut summary = Summary::default();
    let mut status = Status::Accepted;
    for (_, outcome) in &results {
        summary.record(outcome.status());
        if status_for(outcome.status(), strict) == Status::Rejected {
            status = Status::Rejected;
        }
    }

    let profile = verifier.canonicalizer().profile();
    if json_output {
        let rows = results
            .iter()
            .map(|(line, outcome)| -> Result<Value, serde_json::Error> {
                let mut value = output::outcome_json(outcome, profile)?;
                if let Value::Object(map) = &mut value {
                    map.insert("line".to_string(), Value::from(*line));
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        output::print_table_header();
        for (line, outcome) in &results {
            println!("{}", output::format_table_row(*line, outcome));
        }
        println!(
            "{} receipts: {} verified, {} unverified, {} failed, {} malformed",
            summary.total(),
            summary.verified,
            summary.unverified,
            summary.failed,
            summary.malformed
        );
    }

    info!(
        total = summary.total(),
        failed = summary.failed,
        malformed = summary.malformed,
        "batch complete"
    );
    Ok(status)
}
