use gatehash_canonical::{
    CanonicalForm, Canonicalizer, Digest, DigestFn, ParseError, ParseLimits, Sha256Digest,
    StructuredValue,
};
use tracing::{debug, warn};

use crate::outcome::VerificationOutcome;

/// Verifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Bounds applied while parsing the raw receipt.
    pub limits: ParseLimits,
}

impl VerifierConfig {
    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth;
        self
    }

    /// Sets the maximum input size in bytes.
    pub fn with_max_input_bytes(mut self, max_input_bytes: Option<usize>) -> Self {
        self.limits.max_input_bytes = max_input_bytes;
        self
    }
}

/// Receipt verifier: parse, canonicalize, digest, compare.
///
/// Holds no mutable state; one instance can serve concurrent calls.
///
/// # Example
///
/// ```rust
/// use gatehash_canonical::{Canonicalizer, Digest};
/// use gatehash_core::{OutcomeStatus, Verifier, VerifierConfig};
///
/// // Substitute digest function: every input hashes to zeros.
/// let verifier = Verifier::with_digest(
///     VerifierConfig::default(),
///     Canonicalizer::default(),
///     |_: &[u8]| Digest::from_bytes([0; 32]),
/// );
///
/// let outcome = verifier.verify(b"[]", Some("0".repeat(64).as_str()));
/// assert_eq!(outcome.status(), OutcomeStatus::Verified);
/// ```
#[derive(Debug, Clone)]
pub struct Verifier<D = Sha256Digest> {
    config: VerifierConfig,
    canonicalizer: Canonicalizer,
    digest_fn: D,
}

impl Verifier<Sha256Digest> {
    /// Creates a SHA-256 verifier with the default canonicalization profile.
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_digest(config, Canonicalizer::default(), Sha256Digest)
    }
}

impl Default for Verifier<Sha256Digest> {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

impl<D: DigestFn> Verifier<D> {
    /// Creates a verifier with an explicit canonicalizer and digest function.
    pub fn with_digest(config: VerifierConfig, canonicalizer: Canonicalizer, digest_fn: D) -> Self {
        Self {
            config,
            canonicalizer,
            digest_fn,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Canonicalizer in use.
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Parses and canonicalizes `raw`.
    pub fn canonical_form(&self, raw: &[u8]) -> Result<CanonicalForm, ParseError> {
        let value = StructuredValue::parse(raw, &self.config.limits)?;
        Ok(self.canonicalizer.canonicalize(&value))
    }

    /// Parses, canonicalizes and digests `raw` without comparing.
    pub fn digest_of(&self, raw: &[u8]) -> Result<(CanonicalForm, Digest), ParseError> {
        let canonical = self.canonical_form(raw)?;
        let digest = self.digest_fn.digest(canonical.as_bytes());
        Ok((canonical, digest))
    }

    /// Verifies `raw` against an optional expected hex digest.
    ///
    /// - parse failure: `Malformed`, no digest computed
    /// - `expected` absent or blank: `Unverified`
    /// - digest matches `expected` (case and surrounding whitespace ignored): `Verified`
    /// - otherwise, including an `expected` that is not valid hex: `Failed`
    #[tracing::instrument(level = "debug", skip_all, fields(input_len = raw.len()))]
    pub fn verify(&self, raw: &[u8], expected: Option<&str>) -> VerificationOutcome {
        let digest = match self.digest_of(raw) {
            Ok((_, digest)) => digest,
            Err(error) => {
                warn!(%error, "receipt is malformed");
                return VerificationOutcome::Malformed { error };
            }
        };

        let expected = expected.map(str::trim).filter(|e| !e.is_empty());
        let outcome = match expected {
            None => VerificationOutcome::Unverified { digest },
            Some(expected) if digest.matches_hex(expected) => {
                VerificationOutcome::Verified { digest }
            }
            Some(_) => {
                warn!(computed = %digest, "receipt digest mismatch");
                VerificationOutcome::Failed { digest }
            }
        };

        debug!(status = %outcome.status(), %digest, "verification complete");
        outcome
    }
}
