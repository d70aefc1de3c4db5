//! Converts JSON5 source text into a lazy stream of [`Token`]s.

use crate::error::{Error, ErrorKind, Result};
use crate::token::{Position, Sign, Token, TokenKind};

/// Scans a source string into tokens one at a time, tracking line/column
/// positions and skipping whitespace and comments.
///
/// The lexer owns a borrow of its input for as long as it emits tokens and
/// never allocates beyond the decoded text of string/identifier tokens.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::new(kind, message, self.position())
    }

    fn error_at(&self, kind: ErrorKind, message: impl Into<String>, position: Position) -> Error {
        Error::new(kind, message, position)
    }

    /// Consumes one Unicode scalar value, updating line/column. `\r`, `\n`,
    /// and `\r\n` each advance the line counter exactly once, per
    /// spec.md's `Position` definition.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\r' {
            if self.peek_char() == Some('\n') {
                self.pos += 1;
            }
            self.line += 1;
            self.column = 1;
        } else if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            while self.peek_char().is_some_and(is_json5_whitespace) {
                self.bump();
            }

            if self.rest().starts_with("//") {
                self.bump();
                self.bump();
                while self.peek_char().is_some_and(|c| !is_line_terminator(c)) {
                    self.bump();
                }
            } else if self.rest().starts_with("/*") {
                let start = self.position();
                self.bump();
                self.bump();
                loop {
                    if self.rest().starts_with("*/") {
                        self.bump();
                        self.bump();
                        break;
                    }
                    if self.bump().is_none() {
                        return Err(self.error_at(
                            ErrorKind::UnterminatedComment,
                            "block comment not closed before end of input",
                            start,
                        ));
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Returns the next token, or `EndOfInput` once the input is exhausted.
    /// Idempotent once `EndOfInput` has been emitted.
    pub fn next_token(&mut self) -> Result<Token> {
        if self.done {
            return Ok(Token::new(TokenKind::EndOfInput, self.position()));
        }

        self.skip_whitespace_and_comments()?;

        let start = self.position();
        let Some(c) = self.peek_char() else {
            self.done = true;
            return Ok(Token::new(TokenKind::EndOfInput, start));
        };

        match c {
            '{' => {
                self.bump();
                Ok(Token::new(TokenKind::LBrace, start))
            }
            '}' => {
                self.bump();
                Ok(Token::new(TokenKind::RBrace, start))
            }
            '[' => {
                self.bump();
                Ok(Token::new(TokenKind::LBracket, start))
            }
            ']' => {
                self.bump();
                Ok(Token::new(TokenKind::RBracket, start))
            }
            ':' => {
                self.bump();
                Ok(Token::new(TokenKind::Colon, start))
            }
            ',' => {
                self.bump();
                Ok(Token::new(TokenKind::Comma, start))
            }
            '"' | '\'' => self.scan_string(start),
            '+' | '-' | '.' => self.scan_number(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if is_identifier_start(c) || (c == '\\' && self.rest().starts_with("\\u")) => {
                self.scan_identifier(start)
            }
            other => Err(self.error_at(
                ErrorKind::InvalidCharacter,
                format!("unexpected character '{other}'"),
                start,
            )),
        }
    }

    fn scan_string(&mut self, start: Position) -> Result<Token> {
        let quote = self.bump().expect("caller checked quote present");
        let mut value = String::new();

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.error_at(
                    ErrorKind::UnterminatedString,
                    "string not closed before end of input",
                    start,
                ));
            };

            if c == quote {
                self.bump();
                break;
            }

            if is_line_terminator(c) {
                return Err(self.error(
                    ErrorKind::UnterminatedString,
                    "raw line terminator in string literal",
                ));
            }

            if c == '\\' {
                self.bump();
                self.scan_string_escape(&mut value)?;
                continue;
            }

            self.bump();
            value.push(c);
        }

        Ok(Token::new(TokenKind::String(value), start))
    }

    fn scan_string_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_pos = self.position();
        let Some(c) = self.peek_char() else {
            return Err(self.error_at(
                ErrorKind::UnterminatedString,
                "string not closed before end of input",
                escape_pos,
            ));
        };

        match c {
            '\'' | '"' | '\\' | '/' => {
                self.bump();
                out.push(c);
            }
            'b' => {
                self.bump();
                out.push('\u{0008}');
            }
            'f' => {
                self.bump();
                out.push('\u{000C}');
            }
            'n' => {
                self.bump();
                out.push('\n');
            }
            'r' => {
                self.bump();
                out.push('\r');
            }
            't' => {
                self.bump();
                out.push('\t');
            }
            'v' => {
                self.bump();
                out.push('\u{000B}');
            }
            '0' if !self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.bump();
                out.push('\0');
            }
            'x' => {
                self.bump();
                let cp = self.scan_hex_digits(2, escape_pos)?;
                out.push(char::from_u32(cp).ok_or_else(|| {
                    self.error_at(ErrorKind::InvalidEscape, "invalid \\x escape", escape_pos)
                })?);
            }
            'u' => {
                self.bump();
                let cp = self.scan_unicode_escape(escape_pos)?;
                out.push(cp);
            }
            c if is_line_terminator(c) => {
                // Line continuation: contributes nothing, advances the line.
                self.bump();
            }
            c if c.is_ascii_digit() => {
                // `\0` not followed by a digit is handled above; every other
                // decimal digit (and a `\0` that is followed by one) is not
                // a valid escape target per spec.md's NonEscapeCharacter rule.
                return Err(self.error_at(
                    ErrorKind::InvalidEscape,
                    format!("'\\{c}' is not a valid escape sequence"),
                    escape_pos,
                ));
            }
            other => {
                self.bump();
                out.push(other);
            }
        }
        Ok(())
    }

    fn scan_hex_digits(&mut self, count: usize, escape_pos: Position) -> Result<u32> {
        let mut cp: u32 = 0;
        for _ in 0..count {
            let Some(c) = self.peek_char() else {
                return Err(self.error_at(
                    ErrorKind::InvalidEscape,
                    "escape truncated before end of input",
                    escape_pos,
                ));
            };
            let digit = c.to_digit(16).ok_or_else(|| {
                self.error_at(
                    ErrorKind::InvalidEscape,
                    format!("expected hex digit, found '{c}'"),
                    escape_pos,
                )
            })?;
            cp = (cp << 4) | digit;
            self.bump();
        }
        Ok(cp)
    }

    fn scan_unicode_escape(&mut self, escape_pos: Position) -> Result<char> {
        let high = self.scan_hex_digits(4, escape_pos)?;
        if (0xD800..=0xDBFF).contains(&high) {
            if self.rest().starts_with("\\u") {
                let checkpoint = (self.pos, self.line, self.column);
                self.bump();
                self.bump();
                let low = self.scan_hex_digits(4, escape_pos)?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).ok_or_else(|| {
                        self.error_at(ErrorKind::InvalidEscape, "invalid surrogate pair", escape_pos)
                    });
                }
                (self.pos, self.line, self.column) = checkpoint;
            }
            return Err(self.error_at(
                ErrorKind::InvalidEscape,
                "lone UTF-16 surrogate in \\u escape",
                escape_pos,
            ));
        }
        char::from_u32(high)
            .ok_or_else(|| self.error_at(ErrorKind::InvalidEscape, "invalid code point", escape_pos))
    }

    fn scan_number(&mut self, start: Position) -> Result<Token> {
        let start_byte = self.pos;

        let sign = match self.peek_char() {
            Some('+') => {
                self.bump();
                Some(Sign::Positive)
            }
            Some('-') => {
                self.bump();
                Some(Sign::Negative)
            }
            _ => None,
        };

        if self.rest().starts_with("Infinity") {
            for _ in 0.."Infinity".len() {
                self.bump();
            }
            return Ok(Token::new(
                TokenKind::InfinityLiteral(sign.unwrap_or(Sign::Positive)),
                start,
            ));
        }
        if self.rest().starts_with("NaN") {
            for _ in 0.."NaN".len() {
                self.bump();
            }
            return Ok(Token::new(TokenKind::NaNLiteral, start));
        }

        if self.peek_char() == Some('0') && matches!(self.peek_char_at(1), Some('x' | 'X')) {
            self.bump();
            self.bump();
            let digits_start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            if self.pos == digits_start {
                return Err(self.error_at(
                    ErrorKind::InvalidNumber,
                    "hexadecimal literal requires at least one digit",
                    start,
                ));
            }
            let text = self.input[start_byte..self.pos].to_string();
            return Ok(Token::new(TokenKind::HexLiteral(text), start));
        }

        let int_start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let int_len = self.pos - int_start;
        if int_len > 1 && self.input.as_bytes()[int_start] == b'0' {
            return Err(self.error_at(
                ErrorKind::InvalidNumber,
                "leading zeros are not allowed in decimal numbers",
                start,
            ));
        }

        let mut is_float = false;
        let mut frac_len = 0;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.bump();
            let frac_start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
            frac_len = self.pos - frac_start;
        }

        if int_len == 0 && frac_len == 0 {
            return Err(self.error_at(
                ErrorKind::InvalidNumber,
                "number literal has no digits",
                start,
            ));
        }

        let mut has_exp = false;
        if matches!(self.peek_char(), Some('e' | 'E')) {
            has_exp = true;
            self.bump();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.bump();
            }
            let exp_digits_start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
            if self.pos == exp_digits_start {
                return Err(self.error_at(
                    ErrorKind::InvalidNumber,
                    "exponent requires at least one digit",
                    start,
                ));
            }
        }

        let text = self.input[start_byte..self.pos].to_string();
        if is_float || has_exp {
            Ok(Token::new(TokenKind::FloatLiteral(text), start))
        } else {
            Ok(Token::new(TokenKind::IntegerLiteral(text), start))
        }
    }

    fn scan_identifier(&mut self, start: Position) -> Result<Token> {
        let mut name = String::new();
        let mut first = true;
        loop {
            if self.rest().starts_with("\\u") {
                let escape_pos = self.position();
                self.bump();
                self.bump();
                let cp = self.scan_hex_digits(4, escape_pos).map_err(|_| {
                    self.error_at(
                        ErrorKind::InvalidIdentifierEscape,
                        "invalid \\u escape in identifier",
                        escape_pos,
                    )
                })?;
                let c = char::from_u32(cp).ok_or_else(|| {
                    self.error_at(
                        ErrorKind::InvalidIdentifierEscape,
                        "invalid code point in identifier escape",
                        escape_pos,
                    )
                })?;
                let valid = if first {
                    is_identifier_start(c)
                } else {
                    is_identifier_continue(c)
                };
                if !valid {
                    return Err(self.error_at(
                        ErrorKind::InvalidIdentifierEscape,
                        "escaped code point is not a valid identifier character here",
                        escape_pos,
                    ));
                }
                name.push(c);
                first = false;
                continue;
            }

            match self.peek_char() {
                Some(c) if first && is_identifier_start(c) => {
                    self.bump();
                    name.push(c);
                    first = false;
                }
                Some(c) if !first && is_identifier_continue(c) => {
                    self.bump();
                    name.push(c);
                }
                _ => break,
            }
        }

        if name.is_empty() {
            return Err(self.error_at(
                ErrorKind::InvalidCharacter,
                "expected an identifier",
                start,
            ));
        }

        Ok(Token::new(TokenKind::Identifier(name), start))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_unicode_zs(c: char) -> bool {
    matches!(
        c,
        '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

fn is_json5_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}' // tab
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{FEFF}' // BOM
    ) || is_line_terminator(c)
        || is_unicode_zs(c)
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c == '$'
        || c == '_'
        || c == '\u{200C}'
        || c == '\u{200D}'
        || unicode_ident::is_xid_continue(c)
}
