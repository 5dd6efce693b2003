//! Canonical form and digest primitives for receipt integrity checks.
//!
//! A receipt is any JSON document. This crate parses it strictly into a
//! [`StructuredValue`], renders that value into a single deterministic byte
//! sequence ([`CanonicalForm`]) and fingerprints those bytes ([`Digest`]).
//! Every byte that participates in hashing is produced here.
//!
//! ```rust
//! use gatehash_canonical::{Canonicalizer, DigestFn, ParseLimits, Sha256Digest, StructuredValue};
//!
//! let value = StructuredValue::parse(br#"{"b":2,"a":1}"#, &ParseLimits::default())?;
//! let canonical = Canonicalizer::default().canonicalize(&value);
//! assert_eq!(canonical.as_str(), r#"{"a":1,"b":2}"#);
//!
//! let digest = Sha256Digest.digest(canonical.as_bytes());
//! assert_eq!(digest.to_hex().len(), 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Canonicalization of structured values into deterministic bytes.
pub mod canonicalizer;
/// Digest values, digest functions and constant-time comparison.
pub mod digest;
/// Error types for parsing and validation.
pub mod errors;
/// Canonicalization profile identifiers.
pub mod identifiers;
/// Canonical textual form of JSON numbers.
pub mod number;
/// Structured value model and strict parser.
pub mod value;

pub use canonicalizer::{canonicalize_slice, CanonicalForm, Canonicalizer};
pub use digest::{
    constant_time_eq, normalize_expected_hex, Digest, DigestAlg, DigestFn, Sha256Digest,
    DIGEST_LEN,
};
pub use errors::{ParseError, ValidationError};
pub use identifiers::{ProfileId, DEFAULT_PROFILE};
pub use number::Number;
pub use value::{ParseLimits, StructuredValue, DEFAULT_MAX_DEPTH};
