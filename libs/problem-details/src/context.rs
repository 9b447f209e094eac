//! Request-scoped string values carried next to a problem.
//!
//! Framework layers collect things like request or trace identifiers here
//! before they know which members the final [`Problem`](crate::Problem) needs.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ProblemContext {
    values: HashMap<String, String>,
}

impl ProblemContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Store a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Snapshot of every stored value.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.values.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for ProblemContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
