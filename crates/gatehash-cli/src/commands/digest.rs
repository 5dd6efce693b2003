//! Digest command implementation.

use gatehash_core::Verifier;
use serde_json::json;

use super::{reject_malformed, Status};
use crate::errors::CliError;
use crate::input;

pub fn run(
    verifier: &Verifier,
    input: Option<String>,
    json_output: bool,
) -> Result<Status, CliError> {
    let raw = input::read_input(input.as_deref())?;
    let (canonical, digest) = match verifier.digest_of(&raw) {
        Ok(pair) => pair,
        Err(error) => return Ok(reject_malformed(&error)),
    };

    if json_output {
        let output = json!({
            "digest": digest.to_hex(),
            "canonical": canonical.as_str(),
            "canonical_len": canonical.len(),
            "profile": verifier.canonicalizer().profile(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", digest);
    }
    Ok(Status::Accepted)
}
