use super::params::ParamLookup;
use super::template::{ParsedTemplate, Segment};
use crate::error::RouterError;

/// Reverse-maps templates and parameter values into concrete paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlGenerator;

impl UrlGenerator {
    /// Build `base_path + template` with every bracket block resolved.
    ///
    /// For each block, in template order:
    /// - a value for its name replaces the bracket text (the lead stays)
    /// - otherwise an optional block is removed together with its lead
    /// - otherwise the block text is left in place, so a missing required
    ///   parameter shows up in the returned URL
    ///
    /// Substitution follows each block's parsed position, so two blocks with
    /// identical text are resolved independently. Raw `@` templates and
    /// templates without `[` carry no blocks and are returned as-is.
    ///
    /// # Errors
    ///
    /// [`RouterError::TemplateSyntax`] if the template is malformed.
    pub fn generate<P>(base_path: &str, template: &str, params: &P) -> Result<String, RouterError>
    where
        P: ParamLookup + ?Sized,
    {
        let mut url = String::with_capacity(base_path.len() + template.len() + 16);
        url.push_str(base_path);

        // Raw and block-free templates are matched without the bracket
        // grammar, so they are emitted as-is.
        if template.starts_with('@') || !template.contains('[') {
            url.push_str(template);
            return Ok(url);
        }

        let parsed = ParsedTemplate::parse(template)?;
        for segment in parsed.segments() {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Block(block) => {
                    let value = block.name.and_then(|name| params.lookup(name));
                    match value {
                        Some(value) => {
                            if let Some(lead) = block.pre {
                                url.push(lead);
                            }
                            url.push_str(&value);
                        }
                        None if block.optional => {}
                        None => url.push_str(parsed.block_text(block)),
                    }
                }
            }
        }

        Ok(url)
    }
}
