use std::cell::RefCell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::{Serialize, Serializer};

use crate::errors::ParseError;
use crate::number::Number;

/// Default maximum nesting depth accepted by [`StructuredValue::parse`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resource bounds applied while parsing untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum nesting depth; a top-level scalar has depth 0 and every array
    /// or object adds one level.
    pub max_depth: usize,
    /// Maximum input size in bytes (`None` = unbounded).
    pub max_input_bytes: Option<usize>,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: None,
        }
    }
}

/// Parsed form of a receipt: one case per JSON kind.
///
/// Object members live in a `BTreeMap`, so member names are unique and the
/// order they appeared in the source text is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredValue {
    /// JSON `null`.
    Null,
    /// JSON `true` / `false`.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array; element order is significant.
    Array(Vec<StructuredValue>),
    /// JSON object.
    Object(BTreeMap<String, StructuredValue>),
}

impl StructuredValue {
    /// Parses raw bytes as a single JSON document.
    ///
    /// Rejects oversized input before tokenizing, and rejects duplicate member
    /// names, nesting beyond `limits.max_depth`, trailing content and invalid
    /// UTF-8.
    pub fn parse(raw: &[u8], limits: &ParseLimits) -> Result<Self, ParseError> {
        if let Some(max) = limits.max_input_bytes {
            if raw.len() > max {
                return Err(ParseError::TooLarge {
                    size: raw.len(),
                    max,
                });
            }
        }

        let rejection = RefCell::new(None);
        let seed = ValueSeed {
            depth: 0,
            max_depth: limits.max_depth,
            rejection: &rejection,
        };

        let mut deserializer = serde_json::Deserializer::from_slice(raw);
        let parsed = seed
            .deserialize(&mut deserializer)
            .and_then(|value| deserializer.end().map(|()| value));

        parsed.map_err(|err| {
            rejection
                .into_inner()
                .unwrap_or_else(|| ParseError::Syntax(err.to_string()))
        })
    }

    /// Parses a JSON document from text.
    pub fn parse_str(raw: &str, limits: &ParseLimits) -> Result<Self, ParseError> {
        Self::parse(raw.as_bytes(), limits)
    }

    /// Builds an object from `(name, value)` pairs; a repeated name keeps the last value.
    pub fn object<K, I>(members: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, StructuredValue)>,
    {
        Self::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Nesting depth of this value (scalars are 0).
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Object(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Name of the JSON kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl From<bool> for StructuredValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for StructuredValue {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StructuredValue {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for StructuredValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<StructuredValue>> for StructuredValue {
    fn from(value: Vec<StructuredValue>) -> Self {
        Self::Array(value)
    }
}

impl Serialize for StructuredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(n.as_f64()),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => serializer.collect_seq(items),
            Self::Object(members) => serializer.collect_map(members),
        }
    }
}

/// Deserialization seed that tracks nesting depth.
///
/// Structural rejections are recorded in `rejection` so the caller gets a
/// typed [`ParseError`] instead of the tokenizer's message.
struct ValueSeed<'a> {
    depth: usize,
    max_depth: usize,
    rejection: &'a RefCell<Option<ParseError>>,
}

impl<'a> ValueSeed<'a> {
    fn nested<E: de::Error>(&self) -> Result<ValueSeed<'a>, E> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(self.reject(ParseError::DepthExceeded {
                max: self.max_depth,
            }));
        }
        Ok(ValueSeed {
            depth,
            max_depth: self.max_depth,
            rejection: self.rejection,
        })
    }

    fn child(&self) -> ValueSeed<'a> {
        ValueSeed {
            depth: self.depth,
            max_depth: self.max_depth,
            rejection: self.rejection,
        }
    }

    fn reject<E: de::Error>(&self, error: ParseError) -> E {
        let message = error.to_string();
        self.rejection.borrow_mut().get_or_insert(error);
        E::custom(message)
    }
}

impl<'de, 'a> DeserializeSeed<'de> for ValueSeed<'a> {
    type Value = StructuredValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'a> Visitor<'de> for ValueSeed<'a> {
    type Value = StructuredValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StructuredValue::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(StructuredValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        self.visit_f64(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        self.visit_f64(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        match Number::from_f64(v) {
            Some(number) => Ok(StructuredValue::Number(number)),
            None => Err(self.reject(ParseError::NonFiniteNumber)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StructuredValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(StructuredValue::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let nested = self.nested()?;
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(nested.child())? {
            items.push(item);
        }
        Ok(StructuredValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let nested = self.nested()?;
        let mut members = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(nested.child())?;
            match members.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) => {
                    return Err(nested.reject(ParseError::DuplicateKey(slot.key().clone())));
                }
            }
        }
        Ok(StructuredValue::Object(members))
    }
}
