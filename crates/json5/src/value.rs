//! The parsed value tree: a closed sum over JSON5's value kinds.

use core::fmt;

use indexmap::IndexMap;

/// A single JSON5 value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// Fully decoded text: escapes resolved, line continuations removed.
    String(String),
    Number(Number),
    Array(Vec<Value>),
    Object(Object),
}

/// The six numeric sub-kinds a JSON5 number can parse into. Kept distinct
/// (rather than collapsed to a single `f64`) so that read-side fidelity
/// survives a round trip: `0xFF` and `255` are different source forms that
/// this type tells apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Hexadecimal(i64),
    Decimal(f64),
    PositiveInfinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Normalizes `Hexadecimal` to `Integer` for tree-equality checks, per
    /// the round-trip property in spec.md §8 ("tree equality modulo numeric
    /// sub-kind normalization for `Hexadecimal -> Integer`").
    #[must_use]
    pub fn normalized(self) -> Number {
        match self {
            Number::Hexadecimal(n) => Number::Integer(n),
            other => other,
        }
    }

    /// Structural equality after hex-to-integer normalization.
    #[must_use]
    pub fn eq_normalized(self, other: Number) -> bool {
        match (self.normalized(), other.normalized()) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Decimal(a), Number::Decimal(b)) => a.to_bits() == b.to_bits(),
            (Number::PositiveInfinity, Number::PositiveInfinity)
            | (Number::NegativeInfinity, Number::NegativeInfinity)
            | (Number::NaN, Number::NaN) => true,
            _ => false,
        }
    }
}

/// An insertion-ordered sequence of unique `(key, Value)` pairs.
///
/// Backed by [`indexmap::IndexMap`], which already provides O(1) duplicate
/// detection and deterministic insertion-order iteration — the exact
/// properties spec.md's design notes ask for from a hand-rolled
/// key-sequence-with-side-index, for free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object(IndexMap<String, Value>);

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Inserts a new key/value pair.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present. Callers that need to detect a
    /// duplicate key without panicking (e.g. the parser) must check
    /// [`Object::contains_key`] first; `Value` construction never allows
    /// silently overwriting, since that would break the uniqueness
    /// invariant in spec.md §3.
    pub fn insert(&mut self, key: String, value: Value) {
        assert!(
            !self.0.contains_key(&key),
            "duplicate key {key:?} inserted into Object"
        );
        self.0.insert(key, value);
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Structural equality that normalizes `Hexadecimal` numbers to
    /// `Integer` before comparing, per the round-trip properties in
    /// spec.md §8.
    #[must_use]
    pub fn eq_normalized(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.eq_normalized(*b),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_normalized(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| {
                        ka == kb && va.eq_normalized(vb)
                    })
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::serializer::to_string(self, &crate::serializer::Format::default()) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("<unserializable value>"),
        }
    }
}
