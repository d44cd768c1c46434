//! Markup tokenizer.
//!
//! A single left-to-right scan with one mode flag (inside a tag or not).
//! Nesting is not tracked here; the parser recovers it from the flat stream.

/// Character classes and cursor movement used by the scanner.
pub mod helpers;
/// The scanner itself.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::Tokenizer;
pub use token::{Position, Token, TokenKind};
