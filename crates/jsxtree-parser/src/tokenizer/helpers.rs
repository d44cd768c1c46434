//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the scanner:
//! - Character classes (identifier characters, line breaks)
//! - Input/cursor handling with line and column tracking
//! - Token emission
//! - The skipped-character policy

use jsxtree_common::warning::warn_once;

use super::scanner::Tokenizer;
use super::token::{Position, Token, TokenKind};
use crate::error::TokenizeError;

// =============================================================================
// Character Classes
// =============================================================================

/// `[A-Za-z0-9_-]`: characters that make up tag names, attribute keys and
/// word runs.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Line feed or carriage return.
#[must_use]
pub const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

// =============================================================================
// Input/Cursor Helpers
// =============================================================================

impl Tokenizer {
    /// The character under the cursor, `None` at end of input.
    pub(super) fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// The character `offset` positions after the cursor.
    pub(super) fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    /// The character just before the cursor, whatever branch consumed it.
    pub(super) fn previous(&self) -> Option<char> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.chars.get(i))
            .map(|&(_, c)| c)
    }

    /// Position of the character under the cursor.
    pub(super) fn position(&self) -> Position {
        let offset = self
            .chars
            .get(self.pos)
            .map_or(self.input_len, |&(offset, _)| offset);
        Position {
            offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Step over the current character, keeping line and column in sync.
    /// `\n`, `\r\n` and a lone `\r` each end one line.
    pub(super) fn advance(&mut self) {
        let Some(&(_, c)) = self.chars.get(self.pos) else {
            return;
        };
        let ends_line = c == '\n' || (c == '\r' && self.peek(1) != Some('\n'));
        self.previous_position = self.position();
        self.pos += 1;
        if ends_line {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

// =============================================================================
// Token Emission
// =============================================================================

impl Tokenizer {
    /// Append a token to the output stream.
    pub(super) fn emit(&mut self, kind: TokenKind, value: impl Into<String>, position: Position) {
        self.token_stream.push(Token::new(kind, value, position));
    }
}

// =============================================================================
// Skipped Characters
// =============================================================================

impl Tokenizer {
    /// A character no rule claims.
    ///
    /// Whitespace and the `/` of `/>` are structural and skipped silently.
    /// Anything else is unrecognized: skipped with a warning, or rejected in
    /// strict mode.
    pub(super) fn skip_character(&mut self, c: char) -> Result<(), TokenizeError> {
        let structural = c.is_whitespace() || (c == '/' && self.in_tag && self.peek(1) == Some('>'));
        if !structural {
            let position = self.position();
            if self.strict_mode {
                return Err(TokenizeError::UnrecognizedCharacter {
                    character: c,
                    position,
                });
            }
            warn_once(
                "Tokenizer",
                &format!("skipped unrecognized character {c:?} at {position}"),
            );
        }
        self.advance();
        Ok(())
    }
}
