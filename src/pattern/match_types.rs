use std::collections::BTreeMap;

/// Built-in aliases, always present unless overridden.
///
/// The regex engine has no possessive quantifiers, so the greedy forms are
/// used. They accept a superset of the possessive forms: `/[i:a][i:b]`
/// matches `/12` by splitting the digits.
pub const BUILTIN_MATCH_TYPES: [(&str, &str); 6] = [
    ("i", "[0-9]+"),
    ("a", "[0-9A-Za-z]+"),
    ("h", "[0-9A-Fa-f]+"),
    ("*", ".+?"),
    ("**", ".+"),
    ("", r"[^/\.]+"),
];

/// Mapping from bracket-block alias to regex fragment.
///
/// The empty alias is the default token used by blocks such as `[:id]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTypeTable {
    types: BTreeMap<String, String>,
}

impl Default for MatchTypeTable {
    fn default() -> Self {
        Self {
            types: BUILTIN_MATCH_TYPES
                .iter()
                .map(|(alias, fragment)| ((*alias).to_string(), (*fragment).to_string()))
                .collect(),
        }
    }
}

impl MatchTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge aliases into the table. The last registration for an alias wins,
    /// including over the built-ins.
    pub fn extend<I, K, V>(&mut self, match_types: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (alias, fragment) in match_types {
            self.types.insert(alias.into(), fragment.into());
        }
    }

    pub fn insert(&mut self, alias: impl Into<String>, fragment: impl Into<String>) {
        self.types.insert(alias.into(), fragment.into());
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.types.get(alias).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.types.contains_key(alias)
    }

    /// Aliases in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
