use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::errors::ValidationError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256 over the canonical bytes.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Fixed-length fingerprint of a canonical form.
///
/// Rendered as lowercase hex for transport and display. Serializes as
/// `{"alg":"sha-256","hex":"..."}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "DigestRepr", try_from = "DigestRepr")]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wraps raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses exactly 64 hex characters (either case).
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| ValidationError::PatternMismatch {
            field: "digest",
            value: value.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Algorithm that produced this digest.
    pub fn alg(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compares against an externally supplied hex digest.
    ///
    /// Surrounding whitespace and letter case of `expected` are ignored. A
    /// value that is not a 64-character hex string never matches. The 32
    /// decoded bytes are compared in constant time.
    pub fn matches_hex(&self, expected: &str) -> bool {
        match Self::from_hex(&normalize_expected_hex(expected)) {
            Ok(expected) => constant_time_eq(&self.0, &expected.0),
            Err(_) => false,
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

#[derive(Serialize, Deserialize)]
struct DigestRepr {
    alg: DigestAlg,
    hex: String,
}

impl From<Digest> for DigestRepr {
    fn from(digest: Digest) -> Self {
        Self {
            alg: digest.alg(),
            hex: digest.to_hex(),
        }
    }
}

impl TryFrom<DigestRepr> for Digest {
    type Error = ValidationError;

    fn try_from(repr: DigestRepr) -> Result<Self, Self::Error> {
        Digest::from_hex(&repr.hex)
    }
}

/// A digest function over canonical bytes.
///
/// The verifier takes this as an explicit dependency; any
/// `Fn(&[u8]) -> Digest` closure can stand in for the real hash in tests.
pub trait DigestFn {
    /// Computes the digest of `bytes`.
    fn digest(&self, bytes: &[u8]) -> Digest;
}

impl<F> DigestFn for F
where
    F: Fn(&[u8]) -> Digest,
{
    fn digest(&self, bytes: &[u8]) -> Digest {
        self(bytes)
    }
}

/// SHA-256 digest function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestFn for Sha256Digest {
    fn digest(&self, bytes: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Digest(hasher.finalize().into())
    }
}

/// Trims surrounding whitespace and lowercases ASCII letters.
pub fn normalize_expected_hex(expected: &str) -> String {
    expected.trim().to_ascii_lowercase()
}

/// Byte-slice equality whose running time does not depend on where the
/// slices differ. Slices of different length compare unequal immediately.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}
