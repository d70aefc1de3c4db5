//! Renders a [`Value`] (or, via `json5-serde`, an external generic JSON
//! element) back into JSON5 text.

use core::fmt::Write as _;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::{is_identifier_continue, is_identifier_start};
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::token::Position;
use crate::value::{Number, Object, Value};

/// Preferred quote character for string and (optionally) key literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    Single,
    Double,
}

impl Quote {
    fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    fn other(self) -> Quote {
        match self {
            Quote::Single => Quote::Double,
            Quote::Double => Quote::Single,
        }
    }
}

/// Output indentation: `None` for the fully compact form, `Spaces(n)` for
/// one member/element per line indented `n` spaces per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    None,
    Spaces(u8),
}

/// Whether to emit an optional trailing comma after the last member/element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingComma {
    #[default]
    Never,
    WhenIndented,
}

/// Whether object keys are always quoted or left unquoted when they match
/// the identifier grammar and are not a reserved value keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteKeys {
    #[default]
    Always,
    WhenNeeded,
}

/// Serializer configuration. Cheap to construct and copy; the facade and
/// the serializer carry only this configuration, never mutable state
/// shared across calls (spec.md §5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pub quote: Quote,
    pub indent: Indent,
    pub trailing_comma: TrailingComma,
    pub quote_keys: QuoteKeys,
}

const RESERVED_KEYWORDS: [&str; 5] = ["true", "false", "null", "Infinity", "NaN"];

/// Renders `value` as JSON5 text under `format`.
///
/// # Errors
///
/// Returns `CyclicReference` if a container is reentered along its own
/// recursion path, or `UnrepresentableNumber` if a `Decimal` is non-finite.
pub fn to_string(value: &Value, format: &Format) -> Result<String> {
    let mut serializer = Serializer::new(format);
    let mut out = String::new();
    serializer.write_value(value, &mut out, 0)?;
    Ok(out)
}

struct Serializer<'f> {
    format: &'f Format,
    visited: Vec<usize>,
    max_depth: usize,
}

impl<'f> Serializer<'f> {
    fn new(format: &'f Format) -> Self {
        Self {
            format,
            visited: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    fn depth_error(&self) -> Error {
        Error::new(
            ErrorKind::NestingTooDeep,
            format!("nesting exceeds the configured limit of {}", self.max_depth),
            Position::START,
        )
    }

    fn cycle_error(&self) -> Error {
        Error::new(
            ErrorKind::CyclicReference,
            "container was re-entered along its own recursion path",
            Position::START,
        )
    }

    fn newline_indent(&self, out: &mut String, depth: usize) {
        if let Indent::Spaces(n) = self.format.indent {
            out.push('\n');
            for _ in 0..depth * usize::from(n) {
                out.push(' ');
            }
        }
    }

    fn colon_separator(&self) -> &'static str {
        match self.format.indent {
            Indent::None => ":",
            Indent::Spaces(_) => ": ",
        }
    }

    fn trailing_comma_applies(&self) -> bool {
        self.format.trailing_comma == TrailingComma::WhenIndented
            && self.format.indent != Indent::None
    }

    fn write_value(&mut self, value: &Value, out: &mut String, depth: usize) -> Result<()> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::String(s) => write_quoted_string(out, s, self.format.quote),
            Value::Number(n) => write_number(out, *n)?,
            Value::Array(items) => self.write_array(items, out, depth)?,
            Value::Object(object) => self.write_object(object, out, depth)?,
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], out: &mut String, depth: usize) -> Result<()> {
        if items.is_empty() {
            out.push_str("[]");
            return Ok(());
        }
        if depth >= self.max_depth {
            return Err(self.depth_error());
        }
        let identity = items.as_ptr() as usize;
        if self.visited.contains(&identity) {
            return Err(self.cycle_error());
        }
        self.visited.push(identity);

        out.push('[');
        let inner_depth = depth + 1;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline_indent(out, inner_depth);
            self.write_value(item, out, inner_depth)?;
        }
        if self.trailing_comma_applies() {
            out.push(',');
        }
        self.newline_indent(out, depth);
        out.push(']');

        self.visited.pop();
        Ok(())
    }

    fn write_object(&mut self, object: &Object, out: &mut String, depth: usize) -> Result<()> {
        if object.is_empty() {
            out.push_str("{}");
            return Ok(());
        }
        if depth >= self.max_depth {
            return Err(self.depth_error());
        }
        let identity = core::ptr::from_ref(object) as usize;
        if self.visited.contains(&identity) {
            return Err(self.cycle_error());
        }
        self.visited.push(identity);

        out.push('{');
        let inner_depth = depth + 1;
        for (i, (key, value)) in object.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline_indent(out, inner_depth);
            self.write_key(out, key);
            out.push_str(self.colon_separator());
            self.write_value(value, out, inner_depth)?;
        }
        if self.trailing_comma_applies() {
            out.push(',');
        }
        self.newline_indent(out, depth);
        out.push('}');

        self.visited.pop();
        Ok(())
    }

    fn write_key(&self, out: &mut String, key: &str) {
        let unquoted_ok = self.format.quote_keys == QuoteKeys::WhenNeeded
            && is_unquoted_key_safe(key);
        if unquoted_ok {
            out.push_str(key);
        } else {
            write_quoted_string(out, key, self.format.quote);
        }
    }
}

/// A key can be emitted unquoted only if it matches the identifier grammar
/// *and* is not one of the reserved value keywords — otherwise it would
/// reparse as a value keyword rather than a key (spec.md §4.3).
fn is_unquoted_key_safe(key: &str) -> bool {
    if RESERVED_KEYWORDS.contains(&key) {
        return false;
    }
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(is_identifier_continue)
}

fn write_quoted_string(out: &mut String, s: &str, preferred: Quote) {
    let quote = choose_quote(s, preferred);
    let q = quote.as_char();
    out.push(q);

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            c if c == q => {
                out.push('\\');
                out.push(q);
            }
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\u{000B}' => out.push_str("\\v"),
            '\0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push_str("\\0"),
            c if needs_escape(c) => push_hex_or_unicode_escape(out, c),
            c => out.push(c),
        }
    }

    out.push(q);
}

fn needs_escape(c: char) -> bool {
    (c as u32) <= 0x1F || c == '\u{2028}' || c == '\u{2029}' || c == '\u{007F}'
}

fn choose_quote(s: &str, preferred: Quote) -> Quote {
    let other = preferred.other();
    if s.contains(preferred.as_char()) && !s.contains(other.as_char()) {
        other
    } else {
        preferred
    }
}

/// Escapes a mandatory-escape character as `\xHH` when it fits in a byte,
/// `\uHHHH` within the BMP, or a UTF-16 surrogate pair of `\uHHHH` escapes
/// beyond it (spec.md §4.3). None of the characters `needs_escape` flags
/// are actually non-BMP, so the surrogate-pair branch exists for
/// completeness/future escape policies rather than any input this crate
/// currently drives through it.
fn push_hex_or_unicode_escape(out: &mut String, c: char) {
    let cp = c as u32;
    if cp <= 0xFF {
        write!(out, "\\x{cp:02x}").expect("writing to a String cannot fail");
    } else if cp <= 0xFFFF {
        write!(out, "\\u{cp:04x}").expect("writing to a String cannot fail");
    } else {
        let v = cp - 0x10000;
        let high = 0xD800 + (v >> 10);
        let low = 0xDC00 + (v & 0x3FF);
        write!(out, "\\u{high:04x}\\u{low:04x}").expect("writing to a String cannot fail");
    }
}

fn write_number(out: &mut String, number: Number) -> Result<()> {
    match number {
        Number::Integer(v) | Number::Hexadecimal(v) => {
            write!(out, "{v}").expect("writing to a String cannot fail");
        }
        Number::Decimal(f) => {
            if !f.is_finite() {
                return Err(Error::new(
                    ErrorKind::UnrepresentableNumber,
                    "a finite Decimal cannot serialize a non-finite value",
                    Position::START,
                ));
            }
            // f64's Display is already the shortest decimal string that
            // round-trips back to the same bits. Negative zero is a
            // deliberate exception kept bare as "-0" per spec.md §4.3; every
            // other whole-number Decimal needs a trailing ".0" forced on,
            // since Display drops the point for integral values (`1.0` ->
            // "1") and that would reparse as Number::Integer instead.
            if f == 0.0 && f.is_sign_negative() {
                out.push_str("-0");
            } else {
                let start = out.len();
                write!(out, "{f}").expect("writing to a String cannot fail");
                if !out[start..].contains(['.', 'e', 'E']) {
                    out.push_str(".0");
                }
            }
        }
        Number::PositiveInfinity => out.push_str("Infinity"),
        Number::NegativeInfinity => out.push_str("-Infinity"),
        Number::NaN => out.push_str("NaN"),
    }
    Ok(())
}
