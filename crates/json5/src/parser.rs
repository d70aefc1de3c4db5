//! Consumes a [`Lexer`]'s tokens into exactly one [`Value`].

use core::mem;
use std::collections::HashMap;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::Lexer;
use crate::token::{Position, Sign, Token, TokenKind};
use crate::value::{Number, Object, Value};

/// Default recursion bound for nested arrays/objects (spec.md §4.2).
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parses `text` as a complete JSON5 document.
///
/// # Errors
///
/// Returns any lexer or parser error, reported at the first offending
/// position. No partial tree is ever returned.
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text)?.parse_document()
}

/// Like [`parse`], but with an explicit recursion bound instead of
/// [`DEFAULT_MAX_DEPTH`].
pub fn parse_with_max_depth(text: &str, max_depth: usize) -> Result<Value> {
    Parser::with_max_depth(text, max_depth)?.parse_document()
}

/// A recursive-descent parser over a [`Lexer`]'s token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// # Errors
    ///
    /// Returns an error if the first token cannot be lexed.
    pub fn new(input: &'a str) -> Result<Self> {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// # Errors
    ///
    /// Returns an error if the first token cannot be lexed.
    pub fn with_max_depth(input: &'a str, max_depth: usize) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            max_depth,
        })
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorKind::UnexpectedToken,
            format!("expected {expected}, found {}", self.current.kind),
            self.current.position,
        )
    }

    /// Parses `document := value EndOfInput`.
    ///
    /// # Errors
    ///
    /// Returns any lexer/parser error, or `TrailingInput` if tokens remain
    /// after the root value.
    pub fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        if self.current.kind != TokenKind::EndOfInput {
            return Err(Error::new(
                ErrorKind::TrailingInput,
                format!("unexpected {} after document root", self.current.kind),
                self.current.position,
            ));
        }
        Ok(value)
    }

    fn enter_container(&mut self, position: Position) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorKind::NestingTooDeep,
                format!("nesting exceeds the configured limit of {}", self.max_depth),
                position,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.current.kind.clone() {
            TokenKind::LBrace => self.parse_object(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::String(s) => {
                self.advance()?;
                Ok(Value::String(s))
            }
            TokenKind::IntegerLiteral(text) => {
                let position = self.current.position;
                self.advance()?;
                Ok(Value::Number(classify_integer(&text, position)?))
            }
            TokenKind::HexLiteral(text) => {
                let position = self.current.position;
                self.advance()?;
                Ok(Value::Number(classify_hex(&text, position)?))
            }
            TokenKind::FloatLiteral(text) => {
                let position = self.current.position;
                self.advance()?;
                Ok(Value::Number(classify_float(&text, position)?))
            }
            TokenKind::InfinityLiteral(sign) => {
                self.advance()?;
                Ok(Value::Number(match sign {
                    Sign::Positive => Number::PositiveInfinity,
                    Sign::Negative => Number::NegativeInfinity,
                }))
            }
            TokenKind::NaNLiteral => {
                self.advance()?;
                Ok(Value::Number(Number::NaN))
            }
            TokenKind::BooleanLiteral(b) => {
                self.advance()?;
                Ok(Value::Boolean(b))
            }
            TokenKind::NullLiteral => {
                self.advance()?;
                Ok(Value::Null)
            }
            TokenKind::Identifier(name) => self.promote_keyword(&name),
            TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::EndOfInput => Err(self.unexpected("a value")),
        }
    }

    /// Reclassifies a bare identifier as a value keyword (spec.md §4.1,
    /// "Keywords inside value context"). Only called from value position;
    /// key position keeps identifiers as plain strings.
    fn promote_keyword(&mut self, name: &str) -> Result<Value> {
        let value = match name {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            "null" => Value::Null,
            "Infinity" => Value::Number(Number::PositiveInfinity),
            "NaN" => Value::Number(Number::NaN),
            _ => return Err(self.unexpected("a value")),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_key(&mut self) -> Result<(String, Position)> {
        let position = self.current.position;
        match self.current.kind.clone() {
            TokenKind::String(s) => {
                self.advance()?;
                Ok((s, position))
            }
            TokenKind::Identifier(name) => {
                self.advance()?;
                Ok((name, position))
            }
            _ => Err(self.unexpected("an object key")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        let open_position = self.current.position;
        self.enter_container(open_position)?;
        self.advance()?; // consume '{'

        let mut object = Object::new();
        if self.current.kind == TokenKind::RBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Object(object));
        }

        let mut seen_keys: HashMap<String, Position> = HashMap::new();
        loop {
            let (key, key_position) = self.parse_key()?;
            if self.current.kind != TokenKind::Colon {
                return Err(self.unexpected("':'"));
            }
            self.advance()?;

            let value = self.parse_value()?;

            if let Some(first_position) = seen_keys.get(&key) {
                return Err(Error::new(
                    ErrorKind::DuplicateKey,
                    format!("key {key:?} first defined at {first_position}, redefined here"),
                    key_position,
                ));
            }
            seen_keys.insert(key.clone(), key_position);
            object.insert(key, value);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.current.kind == TokenKind::RBrace {
                        self.advance()?;
                        break;
                    }
                }
                TokenKind::RBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self) -> Result<Value> {
        let open_position = self.current.position;
        self.enter_container(open_position)?;
        self.advance()?; // consume '['

        let mut items = Vec::new();
        if self.current.kind == TokenKind::RBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.current.kind == TokenKind::RBracket {
                        self.advance()?;
                        break;
                    }
                }
                TokenKind::RBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }
}

fn strip_hex_prefix(digits: &str) -> &str {
    digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits)
}

fn classify_integer(text: &str, position: Position) -> Result<Number> {
    match text.parse::<i64>() {
        Ok(n) => Ok(Number::Integer(n)),
        Err(_) => {
            // Overflowed signed 64-bit range: promote to Decimal (spec.md §3, §9).
            let value: f64 = text.parse().map_err(|_| {
                Error::new(
                    ErrorKind::InvalidNumber,
                    format!("'{text}' is not a valid number"),
                    position,
                )
            })?;
            Ok(Number::Decimal(value))
        }
    }
}

fn classify_hex(text: &str, position: Position) -> Result<Number> {
    let (negative, rest) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };
    let digits = strip_hex_prefix(rest);

    let magnitude = u64::from_str_radix(digits, 16).map_err(|_| {
        Error::new(
            ErrorKind::NumericOverflow,
            format!("hexadecimal literal '{text}' overflows 64 bits"),
            position,
        )
    })?;

    let overflow = || {
        Error::new(
            ErrorKind::NumericOverflow,
            format!("hexadecimal literal '{text}' does not fit in a signed 64-bit integer"),
            position,
        )
    };

    let value = if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(overflow());
        }
        (-i128::from(magnitude)) as i64
    } else {
        if magnitude > i64::MAX as u64 {
            return Err(overflow());
        }
        magnitude as i64
    };

    Ok(Number::Hexadecimal(value))
}

fn classify_float(text: &str, position: Position) -> Result<Number> {
    let value: f64 = text.parse().map_err(|_| {
        Error::new(
            ErrorKind::InvalidNumber,
            format!("'{text}' is not a valid number"),
            position,
        )
    })?;
    if !value.is_finite() {
        return Err(Error::new(
            ErrorKind::NumericOverflow,
            format!("'{text}' is outside the range of a finite decimal number"),
            position,
        ));
    }
    Ok(Number::Decimal(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_and_array() {
        assert_eq!(parse("{}").unwrap(), Value::Object(Object::new()));
        assert_eq!(parse("[]").unwrap(), Value::Array(Vec::new()));
    }

    #[test]
    fn scenario_one_comments_unquoted_keys_trailing_comma() {
        let value = parse(
            "{ /* comment */ name: 'MyApp', version: 2, features: ['auth','analytics',], }",
        )
        .unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(object.get("name"), Some(&Value::String("MyApp".into())));
        assert_eq!(object.get("version"), Some(&Value::Number(Number::Integer(2))));
        assert_eq!(
            object.get("features"),
            Some(&Value::Array(vec![
                Value::String("auth".into()),
                Value::String("analytics".into()),
            ]))
        );
    }

    #[test]
    fn scenario_two_numeric_subkinds() {
        let value =
            parse("{ hex: 0xDECAF, leadingDot: .8675309, positiveSign: +1, notANumber: NaN }")
                .unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(
            object.get("hex"),
            Some(&Value::Number(Number::Hexadecimal(0xDECAF)))
        );
        assert_eq!(
            object.get("leadingDot"),
            Some(&Value::Number(Number::Decimal(0.8675309)))
        );
        assert_eq!(
            object.get("positiveSign"),
            Some(&Value::Number(Number::Integer(1)))
        );
        assert!(matches!(
            object.get("notANumber"),
            Some(Value::Number(Number::NaN))
        ));
    }

    #[test]
    fn scenario_three_duplicate_key_fails() {
        let err = parse("{a:1, a:2}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(err.position, Position::new(1, 7));
    }

    #[test]
    fn trailing_comma_alone_is_invalid() {
        let err = parse("[,]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn trailing_content_after_root_is_rejected() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput);
    }

    #[test]
    fn integer_overflow_promotes_to_decimal() {
        let value = parse("9223372036854775808").unwrap();
        assert_eq!(value, Value::Number(Number::Decimal(9223372036854775808.0)));
        let value = parse("9223372036854775807").unwrap();
        assert_eq!(value, Value::Number(Number::Integer(i64::MAX)));
    }

    #[test]
    fn negative_hex_round_trips() {
        assert_eq!(
            parse("-0xFF").unwrap(),
            Value::Number(Number::Hexadecimal(-0xFF))
        );
    }

    #[test]
    fn key_position_keeps_keyword_identifiers_as_keys() {
        let value = parse("{ true: 1, Infinity: 2 }").unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(object.get("true"), Some(&Value::Number(Number::Integer(1))));
        assert_eq!(object.get("Infinity"), Some(&Value::Number(Number::Integer(2))));
    }

    #[test]
    fn nesting_too_deep_is_reported() {
        let deep = "[".repeat(10) + &"]".repeat(10);
        let err = parse_with_max_depth(&deep, 5).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep);
    }

    #[test]
    fn json_is_a_subset() {
        let value = parse(r#"{"a": [1, 2.5, true, false, null, "s"]}"#).unwrap();
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(
            object.get("a"),
            Some(&Value::Array(vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Decimal(2.5)),
                Value::Boolean(true),
                Value::Boolean(false),
                Value::Null,
                Value::String("s".into()),
            ]))
        );
    }
}
