//! Compiled forms of spec keys.

use std::fmt;

use itertools::Itertools;
use regex::Regex;

/// One compiled level of a spec path.
///
/// Nodes are built once by [`compile`](super::compile) and never mutated.
/// The only nodes created during a traversal are the [`Literal`]s returned
/// by a successful match.
#[derive(Debug, Clone)]
pub enum PatternNode {
    Literal(Literal),
    Wildcard(Wildcard),
    AncestorMarker(AncestorMarker),
    BackReference(BackReference),
    Alternation(Alternation),
}

impl PatternNode {
    /// Build an alternation from nodes that were compiled separately.
    pub fn alternation(branches: Vec<PatternNode>) -> Self {
        let raw_key = branches.iter().map(PatternNode::raw_key).join("|");
        PatternNode::Alternation(Alternation { raw_key, branches })
    }

    /// The key text this node was compiled from.
    pub fn raw_key(&self) -> &str {
        match self {
            PatternNode::Literal(lit) => lit.key(),
            PatternNode::Wildcard(w) => w.raw_key(),
            PatternNode::AncestorMarker(at) => at.raw_key(),
            PatternNode::BackReference(r) => r.raw_key(),
            PatternNode::Alternation(alt) => alt.raw_key(),
        }
    }

    /// Human-readable variant name, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            PatternNode::Literal(_) => "literal",
            PatternNode::Wildcard(_) => "'*'",
            PatternNode::AncestorMarker(_) => "'@'",
            PatternNode::BackReference(_) => "'&'",
            PatternNode::Alternation(_) => "'|'",
        }
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_key())
    }
}

/// An exact key, plus whatever sub-keys a wildcard match bound to it.
///
/// Sub-key 0 is always the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    key: String,
    groups: Vec<String>,
}

impl Literal {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            groups: Vec::new(),
        }
    }

    /// A literal carrying capture groups; `groups[0]` becomes sub-key 1.
    pub fn with_groups(key: impl Into<String>, groups: Vec<String>) -> Self {
        Self {
            key: key.into(),
            groups,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of addressable sub-keys, including the key itself.
    pub fn sub_key_count(&self) -> usize {
        self.groups.len() + 1
    }

    pub fn sub_key(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.key),
            n => self.groups.get(n - 1).map(String::as_str),
        }
    }

    /// All sub-keys in index order, starting with the key itself.
    pub fn sub_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.groups.iter().map(String::as_str))
    }
}

/// A key with one or more `*` placeholders.
#[derive(Debug, Clone)]
pub struct Wildcard {
    pub(crate) raw_key: String,
    /// Anchored regex with one non-greedy group per `*`.
    pub(crate) regex: Regex,
    pub(crate) group_count: usize,
}

impl Wildcard {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of `*` placeholders, and so of captured sub-keys after 0.
    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

/// `@`: matches any key without binding anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorMarker {
    pub(crate) raw_key: String,
}

impl AncestorMarker {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }
}

/// A key built from literal text and references to matched ancestors.
///
/// Only [`compile`](super::compile) builds one; the token list is read-only.
///
/// ```compile_fail
/// use keyshift::pattern::ast::BackReference;
///
/// let forged = BackReference {
///     raw_key: "&1".to_string(),
///     tokens: Vec::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackReference {
    pub(crate) raw_key: String,
    pub(crate) tokens: Vec<Token>,
}

impl BackReference {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Reference(Reference),
}

/// One `&...` or `[...]` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reference {
    /// Written with `[...]`; renders bracketed.
    pub is_array: bool,
    /// Distance up the ancestor context, 0 = most recent match.
    pub path_index: usize,
    /// Sub-key of the referenced ancestor, 0 = its whole key.
    pub key_group: usize,
    /// Set when the brackets held a plain integer (`[3]`).
    pub array_index: Option<usize>,
}

/// `a|b`: first branch to match wins.
#[derive(Debug, Clone)]
pub struct Alternation {
    pub(crate) raw_key: String,
    pub(crate) branches: Vec<PatternNode>,
}

impl Alternation {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn branches(&self) -> &[PatternNode] {
        &self.branches
    }
}
