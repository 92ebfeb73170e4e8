//! Compiler and matcher for shift-style key path patterns.
//!
//! Each level of a spec path is compiled once; while walking the input,
//! every real key is matched against its level and the match is pushed onto
//! an [`AncestorContext`]. Output keys then pull text back out of those
//! matches through `&` references.
//!
//! # Example
//!
//! ```rust
//! use keyshift::{AncestorContext, compile, match_key, render_output};
//!
//! let mut ctx = AncestorContext::new();
//!
//! let rating = compile("rating-*-*")?;
//! let matched = match_key(&rating, "rating-5-campaign", &ctx)?.expect("wildcard matches");
//! ctx.push(matched);
//!
//! let output = compile("&(2)-&(1)")?;
//! assert_eq!(render_output(&output, &ctx)?, "campaign-5");
//! # Ok::<(), keyshift::PatternError>(())
//! ```

mod error;
pub mod pattern;

pub use error::PatternError;
pub use pattern::{
    AncestorContext, Literal, PatternNode, Reference, Token, compile, compile_dotted,
    compile_levels, match_key, match_path, render_output, render_path, sub_key,
};
