use jsxtree_common::warning::warn_once;

use super::ast::{AttributeValue, Attributes, Document, Element, Node};
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind};

const TAG_NAME: &[TokenKind] = &[TokenKind::Identifier];
const ATTRIBUTE_VALUE: &[TokenKind] = &[TokenKind::AttributeValue, TokenKind::EmbeddedExpression];
const TAG_END: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::SelfCloseRightAngle,
    TokenKind::RightAngle,
];
const CHILD: &[TokenKind] = &[
    TokenKind::LeftAngle,
    TokenKind::TextNode,
    TokenKind::LeftAngleSlash,
];
const CLOSE: &[TokenKind] = &[TokenKind::RightAngle];

/// Deepest element nesting [`Parser`] accepts by default. A root element is
/// at depth 1; anything deeper fails with [`ParseError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive-descent parser over a token slice.
///
/// ```text
/// Document   := ( Element | TextNode )*
/// Element    := '<' TagName Attribute* ( '/>' | '>' Child* '</' TagName '>' )
/// Attribute  := Identifier ( '=' ( StringLiteral | EmbeddedExpression ) )?
/// Child      := Element | TextNode
/// ```
///
/// Every rule takes the cursor by value and returns what it built together
/// with the cursor just past the tokens it consumed. The parser itself is
/// never mutated, so each rule can be called on its own.
///
/// Element nesting is capped at [`MAX_NESTING_DEPTH`] unless changed with
/// [`Parser::with_max_depth`].
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    lenient_closing_tags: bool,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`. Closing tags must match their opening tag.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            lenient_closing_tags: false,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Accept any identifier in a closing tag, as in `<a></b>`.
    #[must_use]
    pub const fn with_lenient_closing_tags(mut self) -> Self {
        self.lenient_closing_tags = true;
        self
    }

    /// Fail with [`ParseError::NestingTooDeep`] past `max_depth` levels
    /// instead of [`MAX_NESTING_DEPTH`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole token stream.
    ///
    /// Root elements and root text runs become document nodes in order. Any
    /// other token at the root is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`]; nothing is returned for a document
    /// that fails part way.
    pub fn run(&self) -> Result<Document, ParseError> {
        let mut nodes = Vec::new();
        let mut cursor = 0;

        while let Some(token) = self.tokens.get(cursor) {
            match token.kind {
                TokenKind::LeftAngle => {
                    let (element, next) = self.parse_element(cursor)?;
                    nodes.push(Node::Element(element));
                    cursor = next;
                }
                TokenKind::TextNode => {
                    nodes.push(Node::text(token.value.as_str()));
                    cursor += 1;
                }
                _ => {
                    warn_once(
                        "Parser",
                        &format!("skipped stray {token} at {} outside any element", token.position),
                    );
                    cursor += 1;
                }
            }
        }

        Ok(Document::new(nodes))
    }

    /// `Element := '<' TagName Attribute* ( '/>' | '>' Child* '</' TagName '>' )`
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the tokens at `cursor` do not form a
    /// complete element. The element counts as a root for the depth limit.
    pub fn parse_element(&self, cursor: usize) -> Result<(Element, usize), ParseError> {
        self.parse_element_at(cursor, 1)
    }

    /// [`Parser::parse_element`] for an element at nesting level `depth`.
    fn parse_element_at(
        &self,
        cursor: usize,
        depth: usize,
    ) -> Result<(Element, usize), ParseError> {
        let open = self.expect(cursor, &[TokenKind::LeftAngle])?;
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                position: open.position,
            });
        }
        let tag = self.expect(cursor + 1, TAG_NAME)?.value.clone();
        let (attributes, cursor) = self.parse_attributes(cursor + 2)?;

        let token = self.peek(cursor, TAG_END)?;
        match token.kind {
            TokenKind::SelfCloseRightAngle => {
                let element = Element {
                    tag,
                    attributes,
                    children: Vec::new(),
                };
                return Ok((element, cursor + 1));
            }
            TokenKind::RightAngle => {}
            _ => return Err(unexpected(token, TAG_END)),
        }

        let (children, cursor) = self.parse_children(cursor + 1, depth)?;
        let cursor = self.parse_closing_tag(cursor, &tag)?;
        let element = Element {
            tag,
            attributes,
            children,
        };
        Ok((element, cursor))
    }

    /// `Attribute*`, stopping at the first token that is not an identifier.
    fn parse_attributes(&self, cursor: usize) -> Result<(Attributes, usize), ParseError> {
        let mut attributes = Attributes::new();
        let mut cursor = cursor;

        while self.peek(cursor, TAG_END)?.is(TokenKind::Identifier) {
            let ((key, value), next) = self.parse_attribute(cursor)?;
            if attributes.insert(key.clone(), value).is_some() {
                let position = self.tokens[cursor].position;
                warn_once(
                    "Parser",
                    &format!("duplicate attribute '{key}' at {position}, keeping the last value"),
                );
            }
            cursor = next;
        }

        Ok((attributes, cursor))
    }

    /// `Attribute := Identifier ( '=' ( StringLiteral | EmbeddedExpression ) )?`
    fn parse_attribute(
        &self,
        cursor: usize,
    ) -> Result<((String, AttributeValue), usize), ParseError> {
        let key = self.expect(cursor, TAG_NAME)?.value.clone();

        let next = self.peek(cursor + 1, TAG_END)?;
        if !next.is(TokenKind::Equals) {
            return Ok(((key, AttributeValue::Boolean), cursor + 1));
        }

        let token = self.peek(cursor + 2, ATTRIBUTE_VALUE)?;
        let value = match token.kind {
            TokenKind::AttributeValue => AttributeValue::StringLiteral(token.value.clone()),
            TokenKind::EmbeddedExpression => AttributeValue::Expression(token.value.clone()),
            _ => return Err(unexpected(token, ATTRIBUTE_VALUE)),
        };
        Ok(((key, value), cursor + 3))
    }

    /// `Child*`, up to (not including) the `</` that closes the parent at
    /// level `depth`.
    fn parse_children(
        &self,
        cursor: usize,
        depth: usize,
    ) -> Result<(Vec<Node>, usize), ParseError> {
        let mut children = Vec::new();
        let mut cursor = cursor;

        loop {
            let token = self.peek(cursor, CHILD)?;
            match token.kind {
                TokenKind::LeftAngleSlash => return Ok((children, cursor)),
                TokenKind::LeftAngle => {
                    let (element, next) = self.parse_element_at(cursor, depth + 1)?;
                    children.push(Node::Element(element));
                    cursor = next;
                }
                TokenKind::TextNode => {
                    children.push(Node::text(token.value.as_str()));
                    cursor += 1;
                }
                _ => return Err(unexpected(token, CHILD)),
            }
        }
    }

    /// `'</' TagName '>'`, checked against the opening tag name unless lenient.
    fn parse_closing_tag(&self, cursor: usize, tag: &str) -> Result<usize, ParseError> {
        let _ = self.expect(cursor, &[TokenKind::LeftAngleSlash])?;
        let name = self.expect(cursor + 1, TAG_NAME)?;
        if name.value != tag {
            if !self.lenient_closing_tags {
                return Err(ParseError::MismatchedClosingTag {
                    expected: tag.to_string(),
                    found: name.value.clone(),
                    position: name.position,
                });
            }
            warn_once(
                "Parser",
                &format!("</{}> at {} closes <{tag}>", name.value, name.position),
            );
        }
        let _ = self.expect(cursor + 2, CLOSE)?;
        Ok(cursor + 3)
    }

    /// The token at `cursor`, or `UnexpectedEndOfInput` naming what was wanted.
    fn peek(&self, cursor: usize, expected: &'static [TokenKind]) -> Result<&'a Token, ParseError> {
        self.tokens
            .get(cursor)
            .ok_or(ParseError::UnexpectedEndOfInput { expected })
    }

    /// The token at `cursor`, which must be one of `expected`.
    fn expect(&self, cursor: usize, expected: &'static [TokenKind]) -> Result<&'a Token, ParseError> {
        let token = self.peek(cursor, expected)?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(unexpected(token, expected))
        }
    }
}

fn unexpected(token: &Token, expected: &'static [TokenKind]) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        found: token.kind,
        value: token.value.clone(),
        position: token.position,
    }
}
