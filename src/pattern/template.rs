//! Bracket-template parsing.
//!
//! A route template interleaves literal text with bracket blocks:
//!
//! ```text
//! /users/[i:id]/[:action].[:format]?
//! └────┘└─────┘└────────┘└─────────┘
//! literal  block    block   optional block with '.' lead
//! ```
//!
//! Each block has the shape `[pre][alias(:name)?](?)`, where `pre` is a single
//! `/` or `.` immediately before the opening bracket. The parser records every
//! block's byte span so later passes (compilation, reverse generation) work on
//! structural positions rather than searching for repeated text.

use std::ops::Range;

use crate::error::RouterError;

/// One bracket block of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Leading `/` or `.` consumed together with the block
    pub pre: Option<char>,
    /// Match type alias, empty for the default token
    pub alias: &'a str,
    /// Capture name, `None` for positional blocks such as `[i]` or `[i:]`
    pub name: Option<&'a str>,
    /// A trailing `?` makes the block and its lead optional
    pub optional: bool,
    /// Byte span of the whole block in the template, lead and `?` included
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Block(Block<'a>),
}

/// A template split into literal runs and bracket blocks, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> ParsedTemplate<'a> {
    /// Parse `template` into segments.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::TemplateSyntax`] for an unclosed `[`, a `[`
    /// nested inside a block, a `]` outside any block, or a block with more
    /// than one `:`.
    pub fn parse(template: &'a str) -> Result<Self, RouterError> {
        let bytes = template.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b']' => return Err(syntax(template, i, "unmatched ']'")),
                b'[' => {
                    let close = find_block_end(template, i)?;
                    let inner = &template[i + 1..close];
                    let (alias, name) = split_block(template, i + 1, inner)?;

                    // The lead belongs to the block only if it is still literal text.
                    let pre = if i > literal_start && matches!(bytes[i - 1], b'/' | b'.') {
                        Some(char::from(bytes[i - 1]))
                    } else {
                        None
                    };
                    let start = if pre.is_some() { i - 1 } else { i };
                    let optional = bytes.get(close + 1) == Some(&b'?');
                    let end = if optional { close + 2 } else { close + 1 };

                    if start > literal_start {
                        segments.push(Segment::Literal(&template[literal_start..start]));
                    }
                    segments.push(Segment::Block(Block {
                        pre,
                        alias,
                        name,
                        optional,
                        span: start..end,
                    }));
                    literal_start = end;
                    i = end;
                }
                _ => i += 1,
            }
        }

        if literal_start < bytes.len() {
            segments.push(Segment::Literal(&template[literal_start..]));
        }

        Ok(Self {
            source: template,
            segments,
        })
    }

    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block<'a>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Literal(_) => None,
        })
    }

    /// Capture names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.blocks().filter_map(|block| block.name)
    }

    /// Original text of a block, lead and optional marker included.
    #[must_use]
    pub fn block_text(&self, block: &Block<'_>) -> &'a str {
        &self.source[block.span.clone()]
    }
}

fn find_block_end(template: &str, open: usize) -> Result<usize, RouterError> {
    for (offset, byte) in template.as_bytes()[open + 1..].iter().enumerate() {
        match byte {
            b']' => return Ok(open + 1 + offset),
            b'[' => return Err(syntax(template, open + 1 + offset, "nested '[' inside a block")),
            _ => {}
        }
    }
    Err(syntax(template, open, "unclosed '['"))
}

fn split_block<'a>(
    template: &str,
    inner_start: usize,
    inner: &'a str,
) -> Result<(&'a str, Option<&'a str>), RouterError> {
    let Some(colon) = inner.find(':') else {
        return Ok((inner, None));
    };
    let alias = &inner[..colon];
    let name = &inner[colon + 1..];
    if let Some(extra) = name.find(':') {
        return Err(syntax(
            template,
            inner_start + colon + 1 + extra,
            "more than one ':' in a block",
        ));
    }
    Ok((alias, (!name.is_empty()).then_some(name)))
}

fn syntax(template: &str, position: usize, reason: &'static str) -> RouterError {
    RouterError::TemplateSyntax {
        template: template.to_string(),
        position,
        reason,
    }
}
