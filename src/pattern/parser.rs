//! Pattern factory and back-reference tokenizer.

use std::iter::Peekable;
use std::str::Chars;

use itertools::Itertools;
use log::debug;
use regex::Regex;

use crate::error::PatternError;

use super::ast::*;

/// Compile one spec key into a [`PatternNode`].
///
/// A key mixing `*` with `&` or `[` is rejected, alternation included.
/// Otherwise the first matching rule wins: `|` alternation, then `&`/`[`
/// back-reference, then `*` wildcard, then `@` ancestor marker, otherwise a
/// plain literal.
pub fn compile(raw_key: &str) -> Result<PatternNode, PatternError> {
    if raw_key.contains('*') && (raw_key.contains('&') || raw_key.contains('[')) {
        return Err(PatternError::SyntaxConflict(raw_key.to_string()));
    }
    let node = if raw_key.contains('|') {
        PatternNode::Alternation(Alternation {
            raw_key: raw_key.to_string(),
            branches: compile_levels(raw_key.split('|'))?,
        })
    } else if raw_key.contains('&') || raw_key.contains('[') {
        PatternNode::BackReference(BackReference {
            raw_key: raw_key.to_string(),
            tokens: tokenize(raw_key)?,
        })
    } else if raw_key.contains('*') {
        PatternNode::Wildcard(compile_wildcard(raw_key)?)
    } else if raw_key.contains('@') {
        PatternNode::AncestorMarker(AncestorMarker {
            raw_key: raw_key.to_string(),
        })
    } else {
        PatternNode::Literal(Literal::new(raw_key))
    };
    debug!("compiled key '{}' as {} pattern", raw_key, node.variant_name());
    Ok(node)
}

/// Compile one spec key per path level, preserving order.
pub fn compile_levels<I>(raw_keys: I) -> Result<Vec<PatternNode>, PatternError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    raw_keys.into_iter().map(|key| compile(key.as_ref())).collect()
}

/// Compile a dotted output key such as `data.&1.value`.
///
/// `@` and `*` only make sense when matching input, so they are rejected.
/// Trailing empty segments are dropped and `""` yields no levels.
pub fn compile_dotted(dotted: &str) -> Result<Vec<PatternNode>, PatternError> {
    if dotted.contains('@') || dotted.contains('*') {
        return Err(PatternError::RejectedOutputSyntax(dotted.to_string()));
    }
    let mut segments: Vec<&str> = dotted.split('.').collect();
    while segments.last() == Some(&"") {
        segments.pop();
    }
    compile_levels(segments)
}

fn compile_wildcard(raw_key: &str) -> Result<Wildcard, PatternError> {
    let group_count = raw_key.matches('*').count();

    // "rating-*-*"  ->  "^rating\-(.*?)\-(.*?)$"
    let body = raw_key.split('*').map(regex::escape).join("(.*?)");
    let regex = Regex::new(&format!("(?s)^{body}$")).map_err(|source| {
        PatternError::InvalidWildcard {
            key: raw_key.to_string(),
            source,
        }
    })?;

    Ok(Wildcard {
        raw_key: raw_key.to_string(),
        regex,
        group_count,
    })
}

/// Split a back-reference key into literal text and [`Reference`] tokens.
fn tokenize(key: &str) -> Result<Vec<Token>, PatternError> {
    ReferenceLexer {
        key,
        chars: key.chars().peekable(),
    }
    .tokens()
}

struct ReferenceLexer<'a> {
    key: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl ReferenceLexer<'_> {
    fn tokens(&mut self) -> Result<Vec<Token>, PatternError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.chars.next() {
            let reference = match c {
                '[' => self.array_reference()?,
                '&' => self.reference()?,
                _ => {
                    literal.push(c);
                    continue;
                }
            };
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Reference(reference));
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        Ok(tokens)
    }

    /// Parse `[N]` or `[&...]` (the opening `[` has already been consumed).
    fn array_reference(&mut self) -> Result<Reference, PatternError> {
        let mut body = String::new();
        loop {
            match self.chars.next() {
                Some(']') => break,
                Some(c) => body.push(c),
                None => return Err(self.malformed("unterminated '['")),
            }
        }

        if body.is_empty() {
            return Err(self.malformed("empty '[]'"));
        }
        if body.chars().all(|c| c.is_ascii_digit()) {
            let index = body
                .parse::<usize>()
                .map_err(|_| self.malformed("array index out of range"))?;
            return Ok(Reference {
                is_array: true,
                array_index: Some(index),
                ..Reference::default()
            });
        }

        let nested = body
            .strip_prefix('&')
            .ok_or_else(|| self.malformed("'[]' must hold an index or a '&' reference"))?;
        let reference = parse_reference_body(nested)
            .ok_or_else(|| self.malformed("invalid '&' reference inside '[]'"))?;
        Ok(Reference {
            is_array: true,
            ..reference
        })
    }

    /// Parse the body of `&`, `&N`, `&(G)` or `&N(G)` (the `&` has already
    /// been consumed).
    fn reference(&mut self) -> Result<Reference, PatternError> {
        let mut body = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '(' || c == ')' {
                body.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        parse_reference_body(&body)
            .ok_or_else(|| self.malformed("expected '&', '&N', '&(G)' or '&N(G)'"))
    }

    fn malformed(&self, reason: &'static str) -> PatternError {
        PatternError::MalformedReference {
            key: self.key.to_string(),
            reason,
        }
    }
}

/// `N(G)` with both parts optional; `None` if the shape is anything else.
fn parse_reference_body(body: &str) -> Option<Reference> {
    let (path, group) = match body.split_once('(') {
        None => (body, None),
        Some((path, rest)) => (path, Some(rest.strip_suffix(')')?)),
    };
    let path_index = if path.is_empty() {
        0
    } else {
        parse_digits(path)?
    };
    let key_group = match group {
        None => 0,
        Some(group) => parse_digits(group)?,
    };
    Some(Reference {
        path_index,
        key_group,
        ..Reference::default()
    })
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
