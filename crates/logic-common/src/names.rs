//! Qualified names and name generation.
//!
//! A qualified name is an ordered list of segments, from the outermost
//! namespace (or record, or enumeration) inward. `Color.setHue` is the path
//! `["Color", "setHue"]`.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NamePath(pub Vec<String>);

impl NamePath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a path of a single segment.
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Get this path extended by one more segment.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for NamePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A name generator is responsible for generating unique names, such as the
/// names of fresh type variables. Every compile owns its own generator, so
/// generated names are only unique within one compile.
#[derive(Clone, Debug, Default)]
pub struct NameGenerator {
    counters: HashMap<String, usize>,
}

impl NameGenerator {
    /// Create an empty [`NameGenerator`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            counters: HashMap::new(),
        }
    }

    /// Generate a name that is unique among the names generated with the same
    /// prefix.
    #[must_use]
    pub fn fresh(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.into()).or_default();
        let id = *counter;
        *counter += 1;
        format!("{prefix}{id}")
    }
}
