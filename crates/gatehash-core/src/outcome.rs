use std::fmt;

use gatehash_canonical::{Digest, ParseError};
use serde::{Serialize, Serializer};

use crate::errors::VerifyError;

/// Result of one verification call.
///
/// Every outcome except `Malformed` carries the digest computed from the
/// receipt, so callers can display it whether or not it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// No expected digest was supplied.
    Unverified {
        /// Digest of the canonical form.
        #[serde(serialize_with = "as_hex")]
        digest: Digest,
    },
    /// Computed digest equals the expected digest.
    Verified {
        /// Digest of the canonical form.
        #[serde(serialize_with = "as_hex")]
        digest: Digest,
    },
    /// Computed digest differs from the expected digest.
    Failed {
        /// Digest of the canonical form.
        #[serde(serialize_with = "as_hex")]
        digest: Digest,
    },
    /// Input could not be parsed; no digest was computed.
    Malformed {
        /// Why parsing failed.
        #[serde(serialize_with = "as_display")]
        error: ParseError,
    },
}

/// Tag identifying a [`VerificationOutcome`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// See [`VerificationOutcome::Unverified`].
    Unverified,
    /// See [`VerificationOutcome::Verified`].
    Verified,
    /// See [`VerificationOutcome::Failed`].
    Failed,
    /// See [`VerificationOutcome::Malformed`].
    Malformed,
}

impl VerificationOutcome {
    /// Variant tag.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Unverified { .. } => OutcomeStatus::Unverified,
            Self::Verified { .. } => OutcomeStatus::Verified,
            Self::Failed { .. } => OutcomeStatus::Failed,
            Self::Malformed { .. } => OutcomeStatus::Malformed,
        }
    }

    /// Computed digest, absent only for `Malformed`.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Unverified { digest } | Self::Verified { digest } | Self::Failed { digest } => {
                Some(digest)
            }
            Self::Malformed { .. } => None,
        }
    }

    /// Whether the receipt matched its attested digest.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Accepts only `Verified`; every other outcome becomes an error.
    pub fn ensure_verified(self) -> Result<Digest, VerifyError> {
        match self {
            Self::Verified { digest } => Ok(digest),
            Self::Failed { digest } => Err(VerifyError::DigestMismatch { computed: digest }),
            Self::Unverified { digest } => {
                Err(VerifyError::MissingExpectedDigest { computed: digest })
            }
            Self::Malformed { error } => Err(VerifyError::Malformed(error)),
        }
    }
}

impl OutcomeStatus {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::Malformed => "malformed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn as_hex<S: Serializer>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&digest.to_hex())
}

fn as_display<S: Serializer>(error: &ParseError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
