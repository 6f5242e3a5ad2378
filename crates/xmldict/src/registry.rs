//! The type tag registry shared by the encoder and the decoder.
//!
//! Each scalar kind of the object model has a short identifier that is stored
//! in the `type` and `tag-name-type` attributes. The mapping is total from
//! values to tags ([`tag_of`], falling back to [`TypeTag::NoneType`]) and
//! partial from tag names back to text parsers ([`type_for`]). The encoder and
//! decoder must agree on this table; a mismatch silently produces wrong
//! round-trips rather than errors.
//!
//! | Tag | Kind | Text form |
//! |-----|------|-----------|
//! | `bool` | [`Value::Bool`] | `True` / `False` |
//! | `int` | [`Value::Int`] | decimal |
//! | `str` | [`Value::Str`] | verbatim |
//! | `float` | [`Value::Float`] | `3.0`, `1e-7`, `inf`, `NaN` |
//! | `tuple` | [`Value::Tuple`] | literal, see [`crate::literal`] |
//! | `bytes` | [`Value::Bytes`] | standard base64 |
//! | `NoneType` | [`Value::None`], containers | `None` (not parseable) |

use crate::error::Result;
use crate::literal;
use crate::value::{Key, Value, format_float};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;

/// Identifier naming a scalar's original type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    Int,
    Str,
    Float,
    Tuple,
    Bytes,
    /// Fallback for anything without a registered tag.
    NoneType,
}

impl TypeTag {
    /// All tags with a text parser, in registry order.
    pub const REGISTERED: [TypeTag; 6] = [
        TypeTag::Bool,
        TypeTag::Int,
        TypeTag::Str,
        TypeTag::Float,
        TypeTag::Tuple,
        TypeTag::Bytes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Str => "str",
            TypeTag::Float => "float",
            TypeTag::Tuple => "tuple",
            TypeTag::Bytes => "bytes",
            TypeTag::NoneType => "NoneType",
        }
    }

    /// Looks up a registered tag by name. `NoneType` is not registered and
    /// yields `None`; the legacy `unicode` name is an alias of `str`.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        match name {
            "bool" => Some(TypeTag::Bool),
            "int" => Some(TypeTag::Int),
            "str" | "unicode" => Some(TypeTag::Str),
            "float" => Some(TypeTag::Float),
            "tuple" => Some(TypeTag::Tuple),
            "bytes" => Some(TypeTag::Bytes),
            _ => None,
        }
    }

    /// Text parser for this tag; `None` for the fallback tag.
    pub fn parser(self) -> Option<ScalarParser> {
        match self {
            TypeTag::Bool => Some(parse_bool),
            TypeTag::Int => Some(parse_int),
            TypeTag::Str => Some(parse_str),
            TypeTag::Float => Some(parse_float),
            TypeTag::Tuple => Some(parse_tuple),
            TypeTag::Bytes => Some(parse_bytes),
            TypeTag::NoneType => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the text form of one scalar kind; `None` when the text is not a
/// valid value of that kind.
pub type ScalarParser = fn(&str) -> Option<Value>;

/// Returns the registered tag of a value, or [`TypeTag::NoneType`].
pub fn tag_of(value: &Value) -> TypeTag {
    match value {
        Value::Bool(_) => TypeTag::Bool,
        Value::Int(_) => TypeTag::Int,
        Value::Str(_) => TypeTag::Str,
        Value::Float(_) => TypeTag::Float,
        Value::Tuple(_) => TypeTag::Tuple,
        Value::Bytes(_) => TypeTag::Bytes,
        Value::None | Value::Mapping(_) | Value::Sequence(_) => TypeTag::NoneType,
    }
}

/// Returns the tag of a mapping key.
pub fn tag_of_key(key: &Key) -> TypeTag {
    match key {
        Key::Str(_) => TypeTag::Str,
        Key::Int(_) => TypeTag::Int,
        Key::Float(_) => TypeTag::Float,
    }
}

/// Inverse lookup: the text parser registered under `name`.
pub fn type_for(name: &str) -> Option<ScalarParser> {
    TypeTag::from_name(name).and_then(TypeTag::parser)
}

/// Renders a scalar value as element text.
///
/// Values without a registered tag fall back to their literal form (`None`
/// for [`Value::None`]), which keeps the document shape but decodes to
/// [`Value::None`]. Fails only for literals nested deeper than
/// [`literal::MAX_NESTING`].
pub fn render_scalar(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Str(s) => s.clone(),
        Value::Float(f) => format_float(*f),
        Value::Bytes(data) => STANDARD.encode(data),
        Value::Tuple(_) | Value::None | Value::Mapping(_) | Value::Sequence(_) => {
            literal::render(value)?
        }
    })
}

/// Parses a key from its text form using the tag stored alongside it.
/// Tags that do not produce a string or number give `None`.
pub fn parse_key(tag_name: &str, text: &str) -> Option<Key> {
    match type_for(tag_name)?(text)? {
        Value::Str(s) => Some(Key::Str(s)),
        Value::Int(i) => Some(Key::Int(i)),
        Value::Float(f) => Some(Key::Float(f)),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<Value> {
    match text.trim() {
        "True" | "true" | "1" => Some(Value::Bool(true)),
        "False" | "false" | "0" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn parse_int(text: &str) -> Option<Value> {
    text.trim().parse::<i64>().ok().map(Value::Int)
}

fn parse_str(text: &str) -> Option<Value> {
    Some(Value::Str(text.to_string()))
}

fn parse_float(text: &str) -> Option<Value> {
    text.trim().parse::<f64>().ok().map(Value::Float)
}

fn parse_tuple(text: &str) -> Option<Value> {
    match literal::parse(text) {
        Ok(tuple @ Value::Tuple(_)) => Some(tuple),
        _ => None,
    }
}

fn parse_bytes(text: &str) -> Option<Value> {
    STANDARD.decode(text.trim().as_bytes()).ok().map(Value::Bytes)
}
