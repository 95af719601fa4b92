use std::fmt;

/// Errors raised while registering routes, compiling templates or
/// generating URLs.
///
/// A request that matches no route is not an error: matching returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A bracket block references an alias that is not in the match type table
    UnknownMatchType {
        /// The unresolved alias (may be empty only if the default was removed)
        alias: String,
        /// The template containing the block
        template: String,
    },
    /// The template's bracket syntax is malformed
    ///
    /// `position` is the byte offset of the offending character.
    TemplateSyntax {
        /// The malformed template
        template: String,
        /// Byte offset of the offending character
        position: usize,
        /// Short description of the defect
        reason: &'static str,
    },
    /// The regex engine rejected the generated (or raw `@`) pattern
    InvalidPattern {
        /// The template the pattern was built from
        template: String,
        /// The regex source handed to the engine
        pattern: String,
        /// The engine's error message
        message: String,
    },
    /// A second route was registered under an existing name
    DuplicateRouteName {
        /// The name that was already taken
        name: String,
    },
    /// URL generation was requested for a name no route carries
    UnknownRouteName {
        /// The requested route name
        name: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnknownMatchType { alias, template } => {
                write!(
                    f,
                    "Unknown match type '{}' in route template '{}'. \
                    Register the alias before mapping the route.",
                    alias, template
                )
            }
            RouterError::TemplateSyntax {
                template,
                position,
                reason,
            } => {
                write!(
                    f,
                    "Malformed route template '{}' at byte {}: {}",
                    template, position, reason
                )
            }
            RouterError::InvalidPattern {
                template,
                pattern,
                message,
            } => {
                write!(
                    f,
                    "Route template '{}' compiled to an invalid pattern '{}': {}",
                    template, pattern, message
                )
            }
            RouterError::DuplicateRouteName { name } => {
                write!(f, "Can not redeclare route '{}'", name)
            }
            RouterError::UnknownRouteName { name } => {
                write!(f, "Route '{}' does not exist.", name)
            }
        }
    }
}

impl std::error::Error for RouterError {}
