use smallvec::SmallVec;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// Maximum number of captured parameters before heap allocation.
/// Route templates rarely carry more than a handful of blocks.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated capture storage for the match path.
///
/// Names are `Arc<str>` shared with the compiled pattern, so producing a
/// result never copies a group name.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Named parameters captured by a successful match, in pattern order.
///
/// Unnamed and unmatched optional groups are never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: Arc<str>, value: impl Into<String>) {
        self.inner.push((name, value.into()));
    }

    /// Get a parameter by name.
    ///
    /// Uses "last write wins" semantics if a name occurs more than once.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert to a `HashMap`.
    /// Note: this allocates; use [`Params::get`] on hot paths instead.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Source of parameter values for reverse URL generation.
///
/// Implemented for the common map types, for slices of pairs and for
/// [`Params`], so a match result can be fed straight back into generation.
pub trait ParamLookup {
    /// The stringified value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<K, V, S> ParamLookup for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Display,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> ParamLookup for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> ParamLookup for [(K, V)]
where
    K: AsRef<str>,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.to_string())
    }
}

impl<K, V, const N: usize> ParamLookup for [(K, V); N]
where
    K: AsRef<str>,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.as_slice().lookup(name)
    }
}

impl<K, V> ParamLookup for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.as_slice().lookup(name)
    }
}

impl ParamLookup for Params {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }
}
