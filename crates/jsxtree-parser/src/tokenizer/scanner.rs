use super::helpers::{is_identifier_char, is_line_break};
use super::token::{Position, Token, TokenKind};
use crate::error::TokenizeError;

/// The markup scanner.
///
/// Rules are tried in a fixed priority order at every position:
///
/// 1. `<` or `</` opens a tag
/// 2. `>` or `/>` closes it
/// 3. a quote right after `=` inside a tag starts an attribute value
/// 4. an identifier character starts a name (inside a tag) or a word run
///    (outside, where spaces continue the run)
/// 5. any other non-space character outside a tag starts a free-text run;
///    a bare line break there is dropped
/// 6. `{` inside a tag starts an embedded expression
/// 7. `=` is emitted as is
/// 8. anything else is skipped
pub struct Tokenizer {
    /// `(byte offset, char)` pairs of the input.
    pub(super) chars: Vec<(usize, char)>,
    /// Byte length of the input, the offset reported at end of input.
    pub(super) input_len: usize,
    /// Index into `chars` of the current input character.
    pub(super) pos: usize,
    pub(super) line: usize,
    pub(super) column: usize,
    /// Position of the character before the current one.
    pub(super) previous_position: Position,
    /// Set between `<` and `>`.
    pub(super) in_tag: bool,
    /// When true, unrecognized characters are errors rather than warnings.
    pub(super) strict_mode: bool,
    pub(super) token_stream: Vec<Token>,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.char_indices().collect(),
            input_len: input.len(),
            pos: 0,
            line: 1,
            column: 1,
            previous_position: Position::START,
            in_tag: false,
            strict_mode: false,
            token_stream: Vec::new(),
        }
    }

    /// Reject unrecognized characters with
    /// [`TokenizeError::UnrecognizedCharacter`] instead of skipping them.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`Tokenizer::run`] to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Tokens produced so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Scan the whole input.
    ///
    /// # Errors
    ///
    /// Fails with [`TokenizeError::MalformedInput`] if the input is empty or
    /// does not start with `<`, and with the first scanning error otherwise.
    pub fn run(&mut self) -> Result<(), TokenizeError> {
        if self.current() != Some('<') {
            return Err(TokenizeError::MalformedInput);
        }

        while let Some(c) = self.current() {
            match c {
                '<' => self.consume_tag_open(),
                '>' => self.consume_tag_close(),
                '\'' | '"' if self.in_tag && self.previous() == Some('=') => {
                    self.consume_attribute_value(c)?;
                }
                c if is_identifier_char(c) => self.consume_word(),
                c if !self.in_tag && c != ' ' => self.consume_free_text(c),
                '{' if self.in_tag => self.consume_expression()?,
                '=' => {
                    self.emit(TokenKind::Equals, "=", self.position());
                    self.advance();
                }
                c => self.skip_character(c)?,
            }
        }
        Ok(())
    }

    /// `<` or `</`. Enters tag mode.
    fn consume_tag_open(&mut self) {
        let position = self.position();
        self.in_tag = true;
        if self.peek(1) == Some('/') {
            self.emit(TokenKind::LeftAngleSlash, "</", position);
            self.advance();
            self.advance();
        } else {
            self.emit(TokenKind::LeftAngle, "<", position);
            self.advance();
        }
    }

    /// `>` or `/>`. Leaves tag mode.
    ///
    /// The `/` of `/>` has already been stepped over as a skipped character,
    /// so only the `>` is consumed here.
    fn consume_tag_close(&mut self) {
        self.in_tag = false;
        if self.previous() == Some('/') {
            let position = self.previous_position;
            self.emit(TokenKind::SelfCloseRightAngle, "/>", position);
        } else {
            self.emit(TokenKind::RightAngle, ">", self.position());
        }
        self.advance();
    }

    /// A quoted attribute value, scanned verbatim up to the matching quote.
    fn consume_attribute_value(&mut self, quote: char) -> Result<(), TokenizeError> {
        let position = self.position();
        self.advance();

        let mut value = String::new();
        loop {
            match self.current() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(TokenizeError::UnterminatedAttributeValue { position }),
            }
        }

        self.emit(TokenKind::AttributeValue, value, position);
        Ok(())
    }

    /// A run of identifier characters. Outside a tag, spaces continue the
    /// run so multi-word text stays one token.
    fn consume_word(&mut self) {
        let position = self.position();
        let mut value = String::new();
        while let Some(c) = self.current() {
            if is_identifier_char(c) || (c == ' ' && !self.in_tag) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if self.in_tag {
            TokenKind::Identifier
        } else {
            TokenKind::TextNode
        };
        self.emit(kind, value, position);
    }

    /// Punctuation and other non-identifier text outside a tag.
    ///
    /// The run ends at an identifier character, a line break, or `<`.
    fn consume_free_text(&mut self, first: char) {
        if is_line_break(first) {
            self.advance();
            return;
        }

        let position = self.position();
        let mut value = String::new();
        while let Some(c) = self.current() {
            if is_identifier_char(c) || is_line_break(c) || c == '<' {
                break;
            }
            value.push(c);
            self.advance();
        }
        self.emit(TokenKind::TextNode, value, position);
    }

    /// `{ ... }` inside a tag. Nested braces are counted so the capture ends
    /// at the brace that balances the opening one.
    fn consume_expression(&mut self) -> Result<(), TokenizeError> {
        let position = self.position();
        self.advance();

        let mut depth = 1_usize;
        let mut value = String::new();
        loop {
            match self.current() {
                None => return Err(TokenizeError::UnbalancedExpression { position }),
                Some('{') => {
                    depth += 1;
                    value.push('{');
                }
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        break;
                    }
                    value.push('}');
                }
                Some(c) => value.push(c),
            }
            self.advance();
        }

        self.emit(TokenKind::EmbeddedExpression, value, position);
        Ok(())
    }
}
