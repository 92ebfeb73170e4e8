//! Matching real keys against compiled nodes, and rendering output keys.

use log::trace;

use crate::error::PatternError;

use super::ast::*;
use super::context::AncestorContext;

// ─── Public API ─────────────────────────────────────────────────────────────

/// Test `real_key` against `pattern` with the current ancestors in `ctx`.
///
/// On success returns the node to push onto the context for this level:
/// the pattern itself for literals and `@`, or a fresh [`Literal`] for
/// wildcards (carrying the captured groups) and back-references.
pub fn match_key(
    pattern: &PatternNode,
    real_key: &str,
    ctx: &AncestorContext,
) -> Result<Option<PatternNode>, PatternError> {
    let matched = match pattern {
        PatternNode::Literal(lit) => (lit.key() == real_key).then(|| pattern.clone()),
        PatternNode::Wildcard(wildcard) => match_wildcard(wildcard, real_key),
        PatternNode::AncestorMarker(_) => Some(pattern.clone()),
        PatternNode::BackReference(reference) => {
            let rendered = render_tokens(reference.tokens(), ctx)?;
            (rendered == real_key).then(|| PatternNode::Literal(Literal::new(rendered)))
        }
        PatternNode::Alternation(alt) => first_match(alt.branches(), real_key, ctx)?,
    };
    trace!(
        "key '{}' {} '{}'",
        real_key,
        if matched.is_some() { "matched" } else { "did not match" },
        pattern
    );
    Ok(matched)
}

/// Render `pattern` as an output key, resolving references against `ctx`.
///
/// Only literals and back-references can be rendered.
pub fn render_output(
    pattern: &PatternNode,
    ctx: &AncestorContext,
) -> Result<String, PatternError> {
    match pattern {
        PatternNode::Literal(lit) => Ok(lit.key().to_string()),
        PatternNode::BackReference(reference) => render_tokens(reference.tokens(), ctx),
        _ => Err(unsupported("render_output", pattern)),
    }
}

/// Sub-key `index` of a matched node; 0 is the whole key.
pub fn sub_key(node: &PatternNode, index: usize) -> Result<&str, PatternError> {
    match node {
        PatternNode::Literal(lit) => lit
            .sub_key(index)
            .ok_or_else(|| PatternError::CaptureOutOfRange {
                key: lit.key().to_string(),
                index,
                available: lit.sub_key_count(),
            }),
        _ => Err(unsupported("sub_key", node)),
    }
}

/// Match a whole input path, one spec level per real key.
///
/// Returns the context holding every level's match, or `None` as soon as a
/// level fails or the path lengths differ.
pub fn match_path<S: AsRef<str>>(
    levels: &[PatternNode],
    real_keys: &[S],
) -> Result<Option<AncestorContext>, PatternError> {
    if levels.len() != real_keys.len() {
        return Ok(None);
    }
    let mut ctx = AncestorContext::new();
    for (pattern, real_key) in levels.iter().zip(real_keys) {
        match match_key(pattern, real_key.as_ref(), &ctx)? {
            Some(matched) => ctx.push(matched),
            None => return Ok(None),
        }
    }
    Ok(Some(ctx))
}

/// Render every level of a dotted output key.
pub fn render_path(
    levels: &[PatternNode],
    ctx: &AncestorContext,
) -> Result<Vec<String>, PatternError> {
    levels.iter().map(|level| render_output(level, ctx)).collect()
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn match_wildcard(wildcard: &Wildcard, real_key: &str) -> Option<PatternNode> {
    let captures = wildcard.regex().captures(real_key)?;
    let groups = captures
        .iter()
        .skip(1)
        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
        .collect();
    Some(PatternNode::Literal(Literal::with_groups(real_key, groups)))
}

fn first_match(
    branches: &[PatternNode],
    real_key: &str,
    ctx: &AncestorContext,
) -> Result<Option<PatternNode>, PatternError> {
    for branch in branches {
        if let Some(matched) = match_key(branch, real_key, ctx)? {
            return Ok(Some(matched));
        }
    }
    Ok(None)
}

fn render_tokens(tokens: &[Token], ctx: &AncestorContext) -> Result<String, PatternError> {
    let mut output = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => output.push_str(text),
            Token::Reference(Reference {
                is_array: true,
                array_index: Some(index),
                ..
            }) => output.push_str(&format!("[{index}]")),
            Token::Reference(reference) => {
                let ancestor = ctx.from_end(reference.path_index)?;
                let text = sub_key(ancestor, reference.key_group)?;
                if reference.is_array {
                    let index: usize = text
                        .parse()
                        .map_err(|_| PatternError::InvalidArrayIndex(text.to_string()))?;
                    output.push_str(&format!("[{index}]"));
                } else {
                    output.push_str(text);
                }
            }
        }
    }
    Ok(output)
}

fn unsupported(operation: &'static str, node: &PatternNode) -> PatternError {
    PatternError::UnsupportedOperation {
        operation,
        variant: node.variant_name(),
        key: node.raw_key().to_string(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
