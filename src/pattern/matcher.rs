use tracing::debug;

use super::compiler::{scan_literal_prefix, PatternCompiler, PrefixScan};
use super::params::Params;
use crate::error::RouterError;

/// Template that matches every path.
pub const WILDCARD_TEMPLATE: &str = "*";

/// Whether a `|`-joined method set admits `request_method` (case-insensitive).
#[must_use]
pub fn method_allows(method_set: &str, request_method: &str) -> bool {
    method_set
        .split('|')
        .any(|method| method.trim().eq_ignore_ascii_case(request_method))
}

/// Decides whether one route accepts one request.
///
/// The matcher holds no per-request state; captures are returned from
/// [`RequestMatcher::match_route`], so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RequestMatcher {
    compiler: PatternCompiler,
}

impl RequestMatcher {
    pub fn new(compiler: PatternCompiler) -> Self {
        Self { compiler }
    }

    #[must_use]
    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    pub fn compiler_mut(&mut self) -> &mut PatternCompiler {
        &mut self.compiler
    }

    /// Check that `template` can be matched, compiling it when the match path
    /// would. Used at registration so misconfiguration surfaces immediately.
    ///
    /// # Errors
    ///
    /// Any compilation error for `@` templates and templates with blocks.
    pub fn prepare(&self, template: &str) -> Result<(), RouterError> {
        if needs_pattern(template) {
            self.compiler.compile(template)?;
        }
        Ok(())
    }

    /// Match one route against one request.
    ///
    /// Steps, in order:
    /// 1. the request method must be in `method_set`
    /// 2. `*` matches anything; `@` templates run as raw anchored patterns;
    ///    templates without `[` compare by plain equality
    /// 3. the path must start with the template text before the first `[`
    ///    and agree with its literal prefix; only then is the full pattern
    ///    compiled and run
    ///
    /// # Returns
    ///
    /// * `Ok(Some(params))` - the route matches; named captures only
    /// * `Ok(None)` - no match
    ///
    /// # Errors
    ///
    /// Compilation errors for a template that was never prepared.
    pub fn match_route(
        &self,
        method_set: &str,
        template: &str,
        path: &str,
        request_method: &str,
    ) -> Result<Option<Params>, RouterError> {
        if !method_allows(method_set, request_method) {
            return Ok(None);
        }

        if template == WILDCARD_TEMPLATE {
            return Ok(Some(Params::new()));
        }

        if template.starts_with('@') {
            let pattern = self.compiler.compile(template)?;
            return Ok(pattern.captures(path));
        }

        let Some(bracket) = template.find('[') else {
            return Ok((template == path).then(Params::new));
        };

        if let PrefixScan::Mismatch { template_offset } = scan_literal_prefix(template, path) {
            debug!(
                template = template,
                path = path,
                template_offset = template_offset,
                "Literal prefix rejected path"
            );
            return Ok(None);
        }

        if !path.starts_with(&template[..bracket]) {
            return Ok(None);
        }

        let pattern = self.compiler.compile(template)?;
        Ok(pattern.captures(path))
    }
}

fn needs_pattern(template: &str) -> bool {
    template != WILDCARD_TEMPLATE && (template.starts_with('@') || template.contains('['))
}
