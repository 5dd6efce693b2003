use crate::errors::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Profile identifier for the canonical form implemented by this crate.
pub const DEFAULT_PROFILE: &str = "gatehash-canonical-v1";

/// Identifier for canonicalization profiles (pattern: `[A-Za-z0-9_-]{16,128}`).
///
/// Digests are only comparable when both sides used the same profile, so the
/// profile travels with every rendered digest report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Parses a validated identifier from a string.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]{16,128}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "ProfileId",
                value: s,
            });
        }
        Ok(Self(s))
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self(DEFAULT_PROFILE.to_string())
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
