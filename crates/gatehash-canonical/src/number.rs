use std::fmt;

/// A finite IEEE-754 binary64 number.
///
/// Receipts are usually produced by JavaScript or Python emitters, so numbers
/// carry exactly the precision a binary64 can hold. The canonical text is the
/// ECMAScript Number-to-String rendering (the one RFC 8785 uses): shortest
/// round-trip digits with ties to even, `-0` as `0`, exponent notation only
/// outside `1e-7..1e21`.
#[derive(Debug, Clone, Copy)]
pub struct Number(f64);

impl Number {
    /// Wraps a float, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// Returns the underlying float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Renders the canonical textual form.
    pub fn canonical_text(&self) -> String {
        ryu_js::Buffer::new().format_finite(self.0).to_owned()
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Non-finite values cannot be constructed, so equality is reflexive.
impl Eq for Number {}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}
