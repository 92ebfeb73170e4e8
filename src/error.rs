use thiserror::Error;

/// Errors raised while compiling or evaluating key patterns.
///
/// Compile-time errors (`SyntaxConflict`, `MalformedReference`,
/// `RejectedOutputSyntax`, `InvalidWildcard`) mean the spec entry itself is
/// bad. The remaining variants surface during matching or rendering when a
/// spec asks for something the current path cannot provide.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("Can't mix '*' with '&' or '[]' in key '{0}'")]
    SyntaxConflict(String),

    #[error("Malformed reference in key '{key}': {reason}")]
    MalformedReference { key: String, reason: &'static str },

    #[error("Don't call {operation} on the {variant} key '{key}'")]
    UnsupportedOperation {
        operation: &'static str,
        variant: &'static str,
        key: String,
    },

    #[error("Output key '{0}' can not contain '@' or '*'")]
    RejectedOutputSyntax(String),

    #[error("Reference walks {distance} level(s) up but only {depth} ancestor(s) are matched")]
    AncestorOutOfRange { distance: usize, depth: usize },

    #[error("Sub-key {index} requested from '{key}' which has {available} sub-key(s)")]
    CaptureOutOfRange {
        key: String,
        index: usize,
        available: usize,
    },

    #[error("Captured text '{0}' is not a valid array index")]
    InvalidArrayIndex(String),

    #[error("Wildcard key '{key}' failed to compile: {source}")]
    InvalidWildcard {
        key: String,
        #[source]
        source: regex::Error,
    },
}
