//! Tokenizer for HTTP path patterns such as `/v1/{parent}/items/{id}`.
//!
//! A pattern is a run of literal text and `{name}` placeholders where `name`
//! is one or more characters other than braces. Anything else is an error.

use thiserror::Error;

/// A piece of a path pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Field name between the braces, not normalized
    Placeholder(&'a str),
}

/// Ways a path pattern can fail to tokenize. Offsets are byte positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathTemplateError {
    #[error("empty placeholder at byte {offset} in '{pattern}'")]
    EmptyPlaceholder { pattern: String, offset: usize },

    #[error("unclosed '{{' at byte {offset} in '{pattern}'")]
    UnclosedPlaceholder { pattern: String, offset: usize },

    #[error("unexpected '}}' at byte {offset} in '{pattern}'")]
    UnexpectedClose { pattern: String, offset: usize },

    #[error("nested '{{' at byte {offset} in '{pattern}'")]
    NestedPlaceholder { pattern: String, offset: usize },
}

/// Split a path pattern into literal and placeholder segments.
pub fn tokenize(pattern: &str) -> Result<Vec<Segment<'_>>, PathTemplateError> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut open: Option<usize> = None;

    for (offset, ch) in pattern.char_indices() {
        match (ch, open) {
            ('{', None) => {
                if offset > literal_start {
                    segments.push(Segment::Literal(&pattern[literal_start..offset]));
                }
                open = Some(offset);
            }
            ('{', Some(_)) => {
                return Err(PathTemplateError::NestedPlaceholder {
                    pattern: pattern.to_string(),
                    offset,
                });
            }
            ('}', None) => {
                return Err(PathTemplateError::UnexpectedClose {
                    pattern: pattern.to_string(),
                    offset,
                });
            }
            ('}', Some(start)) => {
                let name = &pattern[start + 1..offset];
                if name.is_empty() {
                    return Err(PathTemplateError::EmptyPlaceholder {
                        pattern: pattern.to_string(),
                        offset: start,
                    });
                }
                segments.push(Segment::Placeholder(name));
                open = None;
                literal_start = offset + 1;
            }
            _ => {}
        }
    }

    if let Some(offset) = open {
        return Err(PathTemplateError::UnclosedPlaceholder {
            pattern: pattern.to_string(),
            offset,
        });
    }
    if literal_start < pattern.len() {
        segments.push(Segment::Literal(&pattern[literal_start..]));
    }

    Ok(segments)
}
