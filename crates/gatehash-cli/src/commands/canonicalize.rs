//! Canonicalize command implementation.

use std::io::{self, Write};

use gatehash_core::Verifier;

use super::{reject_malformed, Status};
use crate::errors::CliError;
use crate::input;

pub fn run(verifier: &Verifier, input: Option<String>) -> Result<Status, CliError> {
    let raw = input::read_input(input.as_deref())?;
    let canonical = match verifier.canonical_form(&raw) {
        Ok(canonical) => canonical,
        Err(error) => return Ok(reject_malformed(&error)),
    };

    let mut stdout = io::stdout().lock();
    // Exact canonical bytes followed by a newline for terminals.
    let written = stdout
        .write_all(canonical.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"));
    written.map_err(CliError::Stdout)?;
    Ok(Status::Accepted)
}
