//! Template-to-regex compilation.
//!
//! Transforms route templates like `/users/[i:id].[:format]?` into anchored
//! patterns like `^/users(?:/(?P<id>[0-9]+))(?:\.(?P<format>[^/\.]+))?$`.
//! Each bracket block becomes a non-capturing wrapper (holding the block's
//! lead) around one capturing group holding the alias fragment. Literal text
//! between blocks is copied verbatim and may itself carry regex syntax.
//!
//! Templates starting with `@` skip the bracket grammar: the remainder is the
//! pattern, anchored at both ends.

use regex::Regex;
use std::sync::Arc;
use tracing::error;

use super::cache::PatternCache;
use super::match_types::MatchTypeTable;
use super::params::Params;
use super::template::{ParsedTemplate, Segment};
use crate::error::RouterError;

/// Characters that open a pattern zone when they are the current character.
const ZONE_OPENERS: [char; 3] = ['[', '(', '.'];
/// Characters that open a pattern zone when they follow the current character.
const ZONE_QUANTIFIERS: [char; 4] = ['?', '+', '*', '{'];

/// An anchored, case-sensitive, Unicode-aware pattern for one template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    regex: Regex,
    /// (group index, group name) for every named group
    groups: Vec<(usize, Arc<str>)>,
}

impl CompiledPattern {
    fn new(template: &str, pattern: String) -> Result<Self, RouterError> {
        let regex = Regex::new(&pattern).map_err(|e| {
            error!(
                template = template,
                pattern = %pattern,
                error = %e,
                "Failed to compile route pattern"
            );
            RouterError::InvalidPattern {
                template: template.to_string(),
                pattern: pattern.clone(),
                message: e.to_string(),
            }
        })?;
        let groups = regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| name.map(|n| (index, Arc::from(n))))
            .collect();
        Ok(Self {
            template: template.to_string(),
            regex,
            groups,
        })
    }

    /// The template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The generated regex source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` in full and return its named captures.
    ///
    /// Positional groups and optional groups that did not participate are
    /// left out.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = Params::new();
        for (index, name) in &self.groups {
            if let Some(value) = caps.get(*index) {
                params.push(Arc::clone(name), value.as_str());
            }
        }
        Some(params)
    }

    /// Names of the capture groups in pattern order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(_, name)| name.as_ref())
    }
}

/// Outcome of the lock-step literal prefix scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixScan {
    /// Every literal character before the first pattern zone agrees with the
    /// path. `literal_len` is the byte length of that literal run.
    Compatible { literal_len: usize },
    /// The template's literal text disagrees with the path at `template_offset`.
    Mismatch { template_offset: usize },
}

/// Walk `template` and `path` in lock-step until the template enters a
/// pattern zone.
///
/// A zone opens when the current template character is `[`, `(` or `.`, or
/// when the next one is `?`, `+`, `*` or `{`. Before that point each template
/// character must equal the path character at the same position; a literal
/// `/` is accepted positionally. The walk visits each template character at
/// most once.
#[must_use]
pub fn scan_literal_prefix(template: &str, path: &str) -> PrefixScan {
    let mut template_chars = template.char_indices().peekable();
    let mut path_chars = path.chars();

    while let Some((offset, current)) = template_chars.next() {
        let next = template_chars.peek().map(|(_, c)| *c);
        let zone = ZONE_OPENERS.contains(&current)
            || next.is_some_and(|n| ZONE_QUANTIFIERS.contains(&n));
        if zone {
            return PrefixScan::Compatible {
                literal_len: offset,
            };
        }

        let path_char = path_chars.next();
        if current != '/' && path_char != Some(current) {
            return PrefixScan::Mismatch {
                template_offset: offset,
            };
        }
    }

    PrefixScan::Compatible {
        literal_len: template.len(),
    }
}

/// Compiles route templates against a [`MatchTypeTable`], caching results.
#[derive(Debug, Clone, Default)]
pub struct PatternCompiler {
    match_types: MatchTypeTable,
    cache: PatternCache,
}

impl PatternCompiler {
    pub fn new(match_types: MatchTypeTable, cache: PatternCache) -> Self {
        Self { match_types, cache }
    }

    #[must_use]
    pub fn match_types(&self) -> &MatchTypeTable {
        &self.match_types
    }

    /// Merge aliases into the table. Compiled patterns may resolve
    /// differently afterwards, so the cache is cleared.
    pub fn add_match_types<I, K, V>(&mut self, match_types: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.match_types.extend(match_types);
        // Clones keep the old table, so they keep the old storage too.
        self.cache = PatternCache::new(self.cache.is_enabled());
    }

    #[must_use]
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Compile `template` into an anchored pattern, consulting the cache.
    ///
    /// # Errors
    ///
    /// * [`RouterError::UnknownMatchType`] - a block names an unregistered alias
    /// * [`RouterError::TemplateSyntax`] - malformed bracket syntax
    /// * [`RouterError::InvalidPattern`] - the regex engine rejected the result
    pub fn compile(&self, template: &str) -> Result<Arc<CompiledPattern>, RouterError> {
        self.cache
            .get_or_compile(template, || self.compile_uncached(template))
    }

    fn compile_uncached(&self, template: &str) -> Result<CompiledPattern, RouterError> {
        if let Some(raw) = template.strip_prefix('@') {
            return CompiledPattern::new(template, format!("^(?:{raw})$"));
        }
        let pattern = self.translate(template)?;
        CompiledPattern::new(template, pattern)
    }

    /// Produce the anchored regex source for a bracket template without
    /// compiling it.
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownMatchType`] or [`RouterError::TemplateSyntax`].
    pub fn translate(&self, template: &str) -> Result<String, RouterError> {
        let parsed = ParsedTemplate::parse(template)?;
        let mut pattern = String::with_capacity(template.len() * 2 + 2);
        pattern.push('^');

        for segment in parsed.segments() {
            match segment {
                Segment::Literal(text) => pattern.push_str(text),
                Segment::Block(block) => {
                    let fragment = self.match_types.get(block.alias).ok_or_else(|| {
                        RouterError::UnknownMatchType {
                            alias: block.alias.to_string(),
                            template: template.to_string(),
                        }
                    })?;
                    pattern.push_str("(?:");
                    match block.pre {
                        Some('.') => pattern.push_str(r"\."),
                        Some(lead) => pattern.push(lead),
                        None => {}
                    }
                    pattern.push('(');
                    if let Some(name) = block.name {
                        pattern.push_str("?P<");
                        pattern.push_str(name);
                        pattern.push('>');
                    }
                    pattern.push_str(fragment);
                    pattern.push_str("))");
                    if block.optional {
                        pattern.push('?');
                    }
                }
            }
        }

        pattern.push('$');
        Ok(pattern)
    }
}
