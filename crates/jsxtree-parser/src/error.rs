use strum_macros::IntoStaticStr;
use thiserror::Error;

use crate::tokenizer::{Position, TokenKind};

/// Errors raised while scanning markup text.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
pub enum TokenizeError {
    /// The input is empty or its first character is not `<`.
    #[error("input must be non-empty and start with '<'")]
    MalformedInput,

    /// A `{` inside a tag never reached a matching `}`.
    #[error("embedded expression opened at {position} is never closed")]
    UnbalancedExpression {
        /// Where the opening `{` is.
        position: Position,
    },

    /// A quoted attribute value never reached its closing quote.
    #[error("attribute value opened at {position} is missing its closing quote")]
    UnterminatedAttributeValue {
        /// Where the opening quote is.
        position: Position,
    },

    /// A character that belongs to no token, rejected in strict mode.
    #[error("unrecognized character {character:?} at {position}")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Where it is.
        position: Position,
    },
}

impl TokenizeError {
    /// The variant name, e.g. `"MalformedInput"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Grammar violations found by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
pub enum ParseError {
    /// The token at the cursor cannot appear at this grammar position.
    #[error("expected {} but found {found} {value:?} at {position}", describe(.expected))]
    UnexpectedToken {
        /// Kinds that would have been accepted.
        expected: &'static [TokenKind],
        /// Kind of the token that was found.
        found: TokenKind,
        /// Text of the token that was found.
        value: String,
        /// Where the token starts.
        position: Position,
    },

    /// The token stream ended while more structure was required.
    #[error("unexpected end of input, expected {}", describe(.expected))]
    UnexpectedEndOfInput {
        /// Kinds that would have been accepted.
        expected: &'static [TokenKind],
    },

    /// A closing tag names a different element than the one it closes.
    #[error("closing tag </{found}> at {position} does not match <{expected}>")]
    MismatchedClosingTag {
        /// Tag name of the open element.
        expected: String,
        /// Tag name in the closing tag.
        found: String,
        /// Where the closing tag name starts.
        position: Position,
    },

    /// An element is nested deeper than the parser's depth limit.
    #[error("element at {position} is nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The depth limit in effect.
        limit: usize,
        /// Where the `<` of the first element past the limit is.
        position: Position,
    },
}

impl ParseError {
    /// The variant name, e.g. `"UnexpectedEndOfInput"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Any error produced by [`crate::parse_markup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Scanning failed.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// The variant name of the underlying error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tokenize(err) => err.kind(),
            Self::Parse(err) => err.kind(),
        }
    }
}

fn describe(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {last}", init.join(", "))
        }
    }
}
