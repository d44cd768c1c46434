use indexmap::IndexMap;

use super::{ExpressionResolver, ResolveError, Resolved, Value};

/// Resolves literal expressions and nothing else.
///
/// Accepts single or double quoted strings (with `\n`, `\t` and `\\`-style
/// escapes), numbers, `true`, `false`, `null`, and object literals whose
/// keys are identifiers, strings or numbers and whose values are literals.
/// Trailing commas in objects are allowed.
///
/// Identifiers, operators and calls are reported as
/// [`ResolveError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralResolver;

impl ExpressionResolver for LiteralResolver {
    fn resolve(&self, source: &str) -> Result<Resolved, ResolveError> {
        parse_literal(source).map(Resolved::Value)
    }
}

/// Parse `source` as a single literal value.
///
/// # Errors
///
/// Returns [`ResolveError::Unsupported`] when `source` is not a literal at
/// all (a variable, a call, an arrow function), and
/// [`ResolveError::Syntax`] when it starts like a literal but is malformed.
pub fn parse_literal(source: &str) -> Result<Value, ResolveError> {
    let mut reader = LiteralReader { source, pos: 0 };
    reader.skip_whitespace();
    let value = reader.value()?;
    reader.skip_whitespace();
    if reader.pos < source.len() {
        return Err(reader.unsupported());
    }
    Ok(value)
}

struct LiteralReader<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> LiteralReader<'s> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            let _ = self.bump();
        }
    }

    fn syntax(&self, message: &str) -> ResolveError {
        ResolveError::Syntax {
            message: message.to_string(),
            offset: self.pos,
        }
    }

    fn unsupported(&self) -> ResolveError {
        ResolveError::Unsupported {
            expression: self.source.to_string(),
        }
    }

    fn value(&mut self) -> Result<Value, ResolveError> {
        match self.peek() {
            Some('"' | '\'') => self.string().map(Value::String),
            Some('{') => self.object(),
            Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if is_word_start(c) => match self.word() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                _ => Err(self.unsupported()),
            },
            Some(_) => Err(self.unsupported()),
            None => Err(self.syntax("expected a value")),
        }
    }

    fn string(&mut self) -> Result<String, ResolveError> {
        let Some(quote) = self.bump() else {
            return Err(self.syntax("expected a string"));
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.syntax("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c) => out.push(c),
                    None => return Err(self.syntax("unterminated string")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Value, ResolveError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        {
            let _ = self.bump();
        }
        let text = &self.source[start..self.pos];
        text.parse::<f64>().map(Value::Number).map_err(|_| ResolveError::Syntax {
            message: format!("invalid number '{text}'"),
            offset: start,
        })
    }

    fn word(&mut self) -> &'s str {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            let _ = self.bump();
        }
        &self.source[start..self.pos]
    }

    fn object(&mut self) -> Result<Value, ResolveError> {
        let _ = self.bump();
        let mut entries = IndexMap::new();

        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some('}') => {
                    let _ = self.bump();
                    return Ok(Value::Map(entries));
                }
                Some('"' | '\'') => self.string()?,
                Some(c) if is_word_char(c) => self.word().to_string(),
                Some(_) => return Err(self.syntax("expected a property name")),
                None => return Err(self.syntax("unterminated object")),
            };

            self.skip_whitespace();
            if self.bump() != Some(':') {
                return Err(self.syntax("expected ':' after property name"));
            }
            self.skip_whitespace();
            let value = self.value()?;
            let _ = entries.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Value::Map(entries)),
                Some(_) => return Err(self.syntax("expected ',' or '}'")),
                None => return Err(self.syntax("unterminated object")),
            }
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
