//! # Pattern Module
//!
//! The pattern module holds the template language and everything that turns
//! templates into matches and back into URLs.
//!
//! ## Template syntax
//!
//! | Template                     | Matches                  | Params                   |
//! |------------------------------|--------------------------|--------------------------|
//! | `/users/[i:id]`              | `/users/42`              | `id=42`                  |
//! | `/[:controller]/[:action]`   | `/test/do`               | `controller`, `action`   |
//! | `/files/[**:path]`           | `/files/a/b/c.txt`       | `path=a/b/c.txt`         |
//! | `/posts/[:slug].[:format]?`  | `/posts/hi`, `/posts/hi.json` | `format` when present |
//! | `@^/[a-z]*$`                 | `/everything`            | named groups, if any     |
//! | `*`                          | anything                 | none                     |
//!
//! ## Components
//!
//! - [`MatchTypeTable`] - alias to regex fragment mapping (`i`, `a`, `h`, `*`, `**`, default)
//! - [`PatternCompiler`] - template to anchored regex, plus the literal prefix scan
//! - [`RequestMatcher`] - method gate, fast paths and full pattern matching
//! - [`UrlGenerator`] - reverse substitution by block position
//! - [`PatternCache`] - shared cache of compiled patterns keyed by template

mod cache;
mod compiler;
mod generator;
mod match_types;
mod matcher;
mod params;
mod template;

pub use cache::PatternCache;
pub use compiler::{scan_literal_prefix, CompiledPattern, PatternCompiler, PrefixScan};
pub use generator::UrlGenerator;
pub use match_types::{MatchTypeTable, BUILTIN_MATCH_TYPES};
pub use matcher::{method_allows, RequestMatcher, WILDCARD_TEMPLATE};
pub use params::{ParamLookup, ParamVec, Params, MAX_INLINE_PARAMS};
pub use template::{Block, ParsedTemplate, Segment};
