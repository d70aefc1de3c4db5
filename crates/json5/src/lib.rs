//! A JSON5 lexer, parser, and serializer producing a typed value tree.
//!
//! JSON5 (<https://json5.org>) is a superset of JSON adding comments,
//! unquoted identifier keys, trailing commas, single-quoted strings, and
//! extended number syntax (leading/trailing decimal points, hexadecimal
//! integers, `Infinity`/`-Infinity`/`NaN`). [`parse`] turns JSON5 text into a
//! [`Value`] tree; [`stringify`] renders one back out under a configurable
//! [`Format`].
//!
//! ```
//! use json5::{Format, Value};
//!
//! let value = json5::parse("{ name: 'demo', version: 1, }").unwrap();
//! assert_eq!(
//!     value.as_object().unwrap().get("name"),
//!     Some(&Value::String("demo".to_string()))
//! );
//!
//! let text = json5::stringify(&value, &Format::default()).unwrap();
//! assert_eq!(json5::parse(&text).unwrap(), value);
//! ```

mod error;
mod lexer;
mod parser;
mod serializer;
mod token;
mod value;

pub use error::{Error, ErrorKind, Result};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse_with_max_depth};
pub use serializer::{Format, Indent, Quote, QuoteKeys, TrailingComma};
pub use token::{Position, Sign, Token, TokenKind};
pub use value::{Number, Object, Value};

/// Parses `text` as a complete JSON5 document, per [`Parser::new`]'s default
/// nesting bound ([`DEFAULT_MAX_DEPTH`]).
///
/// # Errors
///
/// Returns any lexer or parser error, reported at the first offending
/// position. No partial tree is ever returned.
pub fn parse(text: &str) -> Result<Value> {
    parser::parse(text)
}

/// Renders `value` as JSON5 text under `format`.
///
/// # Errors
///
/// Returns `CyclicReference` if a container is re-entered along its own
/// recursion path, or `UnrepresentableNumber` if a `Decimal` is non-finite.
pub fn stringify(value: &Value, format: &Format) -> Result<String> {
    serializer::to_string(value, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_then_stringify_then_parse_round_trips() {
        let text = "{ /* c */ name: 'demo', nums: [1, .5, 0xFF, Infinity, NaN], ok: true }";
        let value = parse(text).unwrap();
        let rendered = stringify(&value, &Format::default()).unwrap();
        let reparsed = parse(&rendered).unwrap();
        assert!(value.eq_normalized(&reparsed));
    }

    #[test]
    fn bom_is_accepted_and_discarded() {
        let value = parse("\u{FEFF}{a:1}").unwrap();
        assert_eq!(
            value.as_object().unwrap().get("a"),
            Some(&Value::Number(Number::Integer(1)))
        );
    }
}
