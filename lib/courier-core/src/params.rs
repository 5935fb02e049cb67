//! Ordered name/value collections for params and headers.

use std::fmt;

/// A single name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValue {
    name: String,
    value: String,
}

impl NameValue {
    /// Creates a new pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Pair name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pair value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume into `(name, value)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl fmt::Display for NameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for NameValue {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// An insertion-ordered sequence of [`NameValue`] pairs.
///
/// Duplicates are kept. Nothing is validated or encoded on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<NameValue>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a pair.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(NameValue::new(name, value));
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, NameValue> {
        self.pairs.iter()
    }

    /// Returns `true` if a pair has this name, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs
            .iter()
            .any(|pair| pair.name.eq_ignore_ascii_case(name))
    }

    /// First value for this name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.name.eq_ignore_ascii_case(name))
            .map(NameValue::value)
    }

    /// Pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[NameValue] {
        &self.pairs
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a NameValue;
    type IntoIter = std::slice::Iter<'a, NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl IntoIterator for Params {
    type Item = NameValue;
    type IntoIter = std::vec::IntoIter<NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<P: Into<NameValue>> FromIterator<P> for Params {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<NameValue>> Extend<P> for Params {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.pairs.extend(iter.into_iter().map(Into::into));
    }
}
