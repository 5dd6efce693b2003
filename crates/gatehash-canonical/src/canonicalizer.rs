use std::fmt;

use crate::errors::ParseError;
use crate::identifiers::ProfileId;
use crate::value::{ParseLimits, StructuredValue};

/// Deterministic serialization of a [`StructuredValue`].
///
/// Always valid UTF-8: RFC 8785 JSON, whitespace-free, with object members
/// sorted by the UTF-16 code units of their names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalForm(String);

impl CanonicalForm {
    /// Canonical bytes, the input to digest functions.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Canonical bytes as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the form is empty (never true for a canonicalized value).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the form, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalizer that emits deterministic bytes.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    profile: ProfileId,
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided profile.
    pub fn new(profile: ProfileId) -> Self {
        Self { profile }
    }

    /// Profile this canonicalizer implements.
    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    /// Produces the canonical form of `value`.
    ///
    /// Scalars use their minimal JSON literal, arrays keep element order and
    /// object members are emitted in ascending UTF-16 code unit order of
    /// their names.
    pub fn canonicalize(&self, value: &StructuredValue) -> CanonicalForm {
        // Keys are strings and numbers are finite, so the serializer has
        // nothing to reject and writes into memory.
        let canonical = serde_jcs::to_string(value).expect("structured values always serialize");
        CanonicalForm(canonical)
    }
}

/// Parses `raw` and canonicalizes it with the default profile.
pub fn canonicalize_slice(raw: &[u8], limits: &ParseLimits) -> Result<CanonicalForm, ParseError> {
    let value = StructuredValue::parse(raw, limits)?;
    Ok(Canonicalizer::default().canonicalize(&value))
}
