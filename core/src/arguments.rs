//! Query arguments passed along with every API call.
//!
//! # Design
//! Trello accepts options such as `fields`, `filter` or `boards` as query
//! parameters. `Arguments` is a plain string-to-string map kept in key order
//! so requests are deterministic and easy to assert on. Several option sets
//! are combined with [`Arguments::flatten`], where the rightmost set wins for
//! any key that appears more than once. Keys are never validated; unknown
//! options reach the service unchanged.

use std::collections::BTreeMap;

/// A set of query options for a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for one-off option sets.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a single option, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every option of `other` into `self`. Values from `other` replace
    /// values already present under the same key.
    pub fn merge(&mut self, other: &Arguments) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Merge option sets left to right into a single set.
    ///
    /// The last set containing a key supplies its value. An empty input
    /// produces an empty set.
    pub fn flatten<'a, I>(sets: I) -> Arguments
    where
        I: IntoIterator<Item = &'a Arguments>,
    {
        sets.into_iter().fold(Arguments::new(), |mut acc, set| {
            acc.merge(set);
            acc
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
