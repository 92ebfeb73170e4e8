//! Key path pattern engine.
//!
//! A spec key names one level of a path. It is compiled once into a
//! [`PatternNode`], matched against real keys while walking the input, and
//! (for output keys) rendered by pulling text from ancestors matched earlier
//! on the same path.
//!
//! # Key syntax
//!
//! | Key           | Meaning                                          |
//! |---------------|--------------------------------------------------|
//! | `name`        | Literal; matches exactly `name`                  |
//! | `rating-*-*`  | Wildcard; each `*` captures a sub-key (1, 2, …)  |
//! | `@`           | Matches any key, binds nothing                   |
//! | `&`           | Whole key of the most recent match               |
//! | `&N`          | Whole key of the match `N` levels up             |
//! | `&(G)`        | Sub-key `G` of the most recent match             |
//! | `&N(G)`       | Sub-key `G` of the match `N` levels up           |
//! | `[3]`         | Literal array index, rendered `[3]`              |
//! | `[&N(G)]`     | Numeric sub-key rendered as an array index       |
//! | `a\|b`        | Alternation; first branch that matches wins      |
//!
//! `*` can't be combined with `&` or `[]` in one key, and dotted output
//! keys can't use `@` or `*` at all.

pub mod ast;
pub mod context;
pub mod matcher;
pub mod parser;

#[cfg(test)]
mod tests;

pub use ast::{Literal, PatternNode, Reference, Token};
pub use context::AncestorContext;
pub use matcher::{match_key, match_path, render_output, render_path, sub_key};
pub use parser::{compile, compile_dotted, compile_levels};
