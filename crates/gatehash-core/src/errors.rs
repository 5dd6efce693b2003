use gatehash_canonical::{Digest, ParseError};
use thiserror::Error;

/// Fail-closed view of a verification outcome that was not `Verified`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Input could not be parsed as structured data.
    #[error("malformed receipt: {0}")]
    Malformed(#[from] ParseError),
    /// Well-formed receipt whose digest differs from the attested one.
    #[error("digest mismatch: computed {computed}")]
    DigestMismatch {
        /// Digest computed from the receipt.
        computed: Digest,
    },
    /// No expected digest was supplied, so nothing was attested.
    #[error("no expected digest supplied (computed {computed})")]
    MissingExpectedDigest {
        /// Digest computed from the receipt.
        computed: Digest,
    },
}
