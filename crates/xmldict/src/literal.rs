//! Literal text form for tuple scalars.
//!
//! A tuple is stored in a single XML text node, so its items (and their
//! types) have to survive inside one string. The format is a small literal
//! language:
//!
//! | Value | Literal |
//! |-------|---------|
//! | `Value::None` | `None` |
//! | `Value::Bool` | `True`, `False` |
//! | `Value::Int` | `42`, `-7` |
//! | `Value::Float` | `3.0`, `1e-7`, `inf`, `NaN` |
//! | `Value::Str` | `'it\'s'` |
//! | `Value::Bytes` | `b'AAE='` (base64 payload) |
//! | `Value::Tuple` | `()`, `(1,)`, `(1, 2)` |
//! | `Value::Sequence` | `[1, 2]` |
//! | `Value::Mapping` | `{'a': 1, 2: 'b'}` |
//!
//! [`render`] and [`parse`] are inverses for every value nested no deeper
//! than [`MAX_NESTING`].

use crate::error::{Result, XmlDictError};
use crate::value::{Key, Mapping, Value, format_float};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt::Write as _;

/// Maximum nesting accepted by [`render`] and [`parse`].
pub const MAX_NESTING: usize = 128;

/// Renders a value as a literal.
///
/// Fails with [`XmlDictError::DepthLimitExceeded`] for values nested deeper
/// than [`MAX_NESTING`], which [`parse`] could not read back.
pub fn render(value: &Value) -> Result<String> {
    let mut out = String::new();
    render_into(value, &mut out, 0)?;
    Ok(out)
}

fn render_into(value: &Value, out: &mut String, depth: usize) -> Result<()> {
    if depth > MAX_NESTING {
        let limit = MAX_NESTING;
        return Err(XmlDictError::DepthLimitExceeded { limit });
    }
    match value {
        Value::None => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) => render_str(s, out),
        Value::Bytes(data) => {
            out.push('b');
            render_str(&STANDARD.encode(data), out);
        }
        Value::Tuple(items) => {
            out.push('(');
            render_items(items, out, depth)?;
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Value::Sequence(items) => {
            out.push('[');
            render_items(items, out, depth)?;
            out.push(']');
        }
        Value::Mapping(mapping) => {
            out.push('{');
            for (i, (key, item)) in mapping.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match key {
                    Key::Str(s) => render_str(s, out),
                    Key::Int(n) => {
                        let _ = write!(out, "{}", n);
                    }
                    Key::Float(f) => out.push_str(&format_float(*f)),
                }
                out.push_str(": ");
                render_into(item, out, depth + 1)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn render_items(items: &[Value], out: &mut String, depth: usize) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_into(item, out, depth + 1)?;
    }
    Ok(())
}

fn render_str(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Parses a literal produced by [`render`].
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = Parser { input, pos: 0 };
    let value = parser.value(0)?;
    parser.skip_ws();
    if parser.pos != input.len() {
        return Err(parser.error("trailing characters"));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> XmlDictError {
        XmlDictError::Literal {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_NESTING {
            return Err(self.error("nesting too deep"));
        }
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.bump();
                Ok(Value::Tuple(self.items(')', depth)?))
            }
            Some('[') => {
                self.bump();
                Ok(Value::Sequence(self.items(']', depth)?))
            }
            Some('{') => {
                self.bump();
                self.mapping(depth)
            }
            Some('\'') | Some('"') => Ok(Value::Str(self.string()?)),
            Some('b') if matches!(self.rest().chars().nth(1), Some('\'') | Some('"')) => {
                self.bump();
                let encoded = self.string()?;
                STANDARD
                    .decode(encoded.as_bytes())
                    .map(Value::Bytes)
                    .map_err(|e| self.error(&format!("invalid base64: {}", e)))
            }
            Some(_) => self.word(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Comma-separated items up to `close`; a trailing comma is allowed.
    fn items(&mut self, close: char, depth: usize) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                _ => return Err(self.error(&format!("expected ',' or '{}'", close))),
            }
        }
    }

    fn mapping(&mut self, depth: usize) -> Result<Value> {
        let mut mapping = Mapping::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Mapping(mapping));
            }
            let key = match self.value(depth + 1)? {
                Value::Str(s) => Key::Str(s),
                Value::Int(i) => Key::Int(i),
                Value::Float(f) => Key::Float(f),
                _ => return Err(self.error("mapping keys must be strings or numbers")),
            };
            self.expect(':')?;
            let item = self.value(depth + 1)?;
            mapping.insert(key, item);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Mapping(mapping)),
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn string(&mut self) -> Result<String> {
        let quote = self.bump().ok_or_else(|| self.error("expected quote"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or_else(|| self.error("dangling escape"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        '0' => out.push('\0'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        'x' => {
                            let start = self.pos;
                            let hex = self
                                .rest()
                                .get(..2)
                                .ok_or_else(|| self.error("short \\x escape"))?;
                            let code = u32::from_str_radix(hex, 16)
                                .map_err(|_| self.error("invalid \\x escape"))?;
                            self.pos = start + 2;
                            out.push(
                                char::from_u32(code)
                                    .ok_or_else(|| self.error("invalid \\x escape"))?,
                            );
                        }
                        _ => return Err(self.error("unknown escape")),
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Keywords and numbers.
    fn word(&mut self) -> Result<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '+' | '-' | '.' | '_') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        let word = &self.input[start..self.pos];
        match word {
            "" => Err(self.error("unexpected character")),
            "None" => Ok(Value::None),
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            _ => {
                let is_float = word.contains(['.', 'e', 'E'])
                    || word.trim_start_matches(['+', '-']).eq_ignore_ascii_case("inf")
                    || word.eq_ignore_ascii_case("nan");
                if is_float {
                    word.parse::<f64>()
                        .map(Value::Float)
                        .map_err(|_| self.error("invalid float"))
                } else {
                    word.parse::<i64>()
                        .map(Value::Int)
                        .map_err(|_| self.error("invalid literal"))
                }
            }
        }
    }
}
