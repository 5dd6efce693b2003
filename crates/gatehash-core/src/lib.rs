//! Receipt integrity verification for Gatehash.
//!
//! This crate provides:
//! - The [`Verifier`], which parses a raw receipt, canonicalizes it, digests the
//!   canonical bytes and compares the result with an attested digest
//! - [`VerificationOutcome`], the typed result of every verification call
//!
//! Core invariants:
//! - Verification is a pure function of the input bytes, the expected digest
//!   and the configured limits; repeating a call reproduces its outcome
//! - Malformed input never yields a digest
//! - Digest comparison runs in constant time
//!
//! ```rust
//! use gatehash_core::{OutcomeStatus, Verifier};
//!
//! let verifier = Verifier::default();
//! let receipt = br#"{"b":2,"a":1}"#;
//! let expected = "43258cff783fe7036d8a43033f830adfc60ec037382473548ac742b888292777";
//!
//! let outcome = verifier.verify(receipt, Some(expected));
//! assert_eq!(outcome.status(), OutcomeStatus::Verified);
//! ```
//!
#![deny(missing_docs)]

/// Error types for verification.
pub mod errors;
/// Verification outcome types.
pub mod outcome;
/// Verifier and its configuration.
pub mod verification;

pub use errors::VerifyError;
pub use outcome::{OutcomeStatus, VerificationOutcome};
pub use verification::{Verifier, VerifierConfig};
