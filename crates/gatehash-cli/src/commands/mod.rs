//! Subcommand implementations.

pub mod batch;
pub mod canonicalize;
pub mod digest;
pub mod verify;

use gatehash_canonical::ParseError;
use tracing::warn;

/// How a command concluded when it did not hit an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every receipt passed the requested checks.
    Accepted,
    /// At least one receipt was malformed, failed, or (under `--strict`) unverified.
    Rejected,
}

/// Reports a receipt that has no canonical form. Malformed input is a
/// rejection, not a transport error.
pub(crate) fn reject_malformed(error: &ParseError) -> Status {
    warn!(%error, "receipt is malformed");
    eprintln!("Malformed: {}", error);
    Status::Rejected
}
