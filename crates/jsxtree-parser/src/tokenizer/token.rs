use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// The kind of a token.
///
/// Values are the characters or text the token was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum TokenKind {
    /// `<`, opens a start tag.
    LeftAngle,
    /// `</`, opens a closing tag.
    LeftAngleSlash,
    /// `>`, ends a start or closing tag.
    RightAngle,
    /// `/>`, ends a self-closing tag.
    SelfCloseRightAngle,
    /// A tag name or attribute key, scanned inside a tag.
    Identifier,
    /// A run of literal text outside any tag.
    TextNode,
    /// `=` between an attribute key and its value.
    Equals,
    /// A quoted attribute value, quotes stripped, no escape processing.
    AttributeValue,
    /// Raw text between balanced braces inside a tag, outer braces stripped.
    EmbeddedExpression,
}

/// A location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// The first character of the input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// The text it carries.
    pub value: String,
    /// Where it starts in the source.
    pub position: Position,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Returns true if the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::TextNode | TokenKind::AttributeValue | TokenKind::EmbeddedExpression => {
                let display = self.value.replace('\n', "\\n");
                write!(f, "{}(\"{display}\")", self.kind)
            }
            TokenKind::Identifier => write!(f, "{}({})", self.kind, self.value),
            _ => write!(f, "{}", self.kind),
        }
    }
}
