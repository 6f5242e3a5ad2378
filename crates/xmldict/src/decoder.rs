//! Annotated XML → object model.
//!
//! Each element decodes to one `(key, value)` entry. The key is the element
//! name, or for `numeric` elements the `value` attribute parsed with the tag
//! in `tag-name-type`. The value is a scalar parsed with the tag in `type`, or
//! a container built from the children: list nodes collect their children's
//! values in document order, every other node merges its children's entries
//! into a mapping.
//!
//! Decoding degrades instead of failing: an unknown type tag, a missing
//! attribute or text that does not parse under its tag produce
//! [`Value::None`] for that node (or a string key for a `numeric` element)
//! while the rest of the tree decodes normally.

use crate::encoder::DEFAULT_MAX_DEPTH;
use crate::error::{Result, XmlDictError};
use crate::registry::{parse_key, type_for};
use crate::value::{Key, Mapping, Value};
use crate::xml::XmlElement;
use crate::xml::utils::{
    ATTR_TAG_NAME_TYPE, ATTR_TYPE, ATTR_VALUE, DICT_KIND, LIST_KIND, NUMERIC_TAG,
};
use tracing::{debug, trace, warn};

/// Decoder configuration.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Maximum element nesting before decoding fails.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes an element into the single-entry mapping `{key: value}`.
pub fn decode(element: &XmlElement, options: &DecodeOptions) -> Result<Value> {
    let (key, value) = Decoder::new(options).decode_entry(element)?;
    Ok(Value::Mapping(Mapping::from_iter([(key, value)])))
}

/// Decodes a document root and returns the value under its root key.
///
/// # Examples
///
/// ```
/// use helios_xmldict::{DecodeOptions, Value, decode_root, xml::from_xml_str};
///
/// let root = from_xml_str(
///     r#"<root type="dict"><numeric value="1" type="float" tag-name-type="int">2.5</numeric></root>"#,
/// ).unwrap();
/// let value = decode_root(&root, &DecodeOptions::default()).unwrap();
/// assert_eq!(value.get(1), Some(&Value::Float(2.5)));
/// ```
pub fn decode_root(element: &XmlElement, options: &DecodeOptions) -> Result<Value> {
    let (_, value) = Decoder::new(options).decode_entry(element)?;
    Ok(value)
}

/// Stateless walker over one element tree.
pub struct Decoder<'a> {
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(options: &'a DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes an element into its `(key, value)` entry.
    pub fn decode_entry(&self, element: &XmlElement) -> Result<(Key, Value)> {
        debug!(root = element.name(), "Decoding element tree");
        self.entry(element, 0)
    }

    fn entry(&self, element: &XmlElement, depth: usize) -> Result<(Key, Value)> {
        if depth > self.options.max_depth {
            return Err(XmlDictError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        trace!(element = element.name(), depth, "Decoding element");

        let kind = element.attribute(ATTR_TYPE);
        let is_list = kind == Some(LIST_KIND);
        let key = key_of(element);

        // Child elements take precedence over text in mixed content.
        let value = if element.has_child_elements() {
            if is_list {
                let mut items = Vec::new();
                for child in element.child_elements() {
                    let (_, item) = self.entry(child, depth + 1)?;
                    items.push(item);
                }
                Value::Sequence(items)
            } else {
                let mut mapping = Mapping::new();
                for child in element.child_elements() {
                    let (child_key, child_value) = self.entry(child, depth + 1)?;
                    mapping.insert(child_key, child_value);
                }
                Value::Mapping(mapping)
            }
        } else {
            own_value(element, kind, is_list)
        };

        Ok((key, value))
    }
}

/// Value of an element without child elements.
fn own_value(element: &XmlElement, kind: Option<&str>, is_list: bool) -> Value {
    let structural = matches!(kind, Some(DICT_KIND) | Some(LIST_KIND));
    let text = element
        .text()
        .filter(|text| !(structural && text.trim().is_empty()));

    match (text, kind.and_then(type_for)) {
        (text, Some(parse)) => {
            let text = text.unwrap_or_default();
            parse(&text).unwrap_or_else(|| {
                warn!(
                    element = element.name(),
                    kind = kind.unwrap_or_default(),
                    text = %text,
                    "Text does not parse under its type tag, decoding as None"
                );
                Value::None
            })
        }
        (Some(_), None) => {
            match kind {
                Some("NoneType") => {}
                Some(other) => warn!(
                    element = element.name(),
                    kind = other,
                    "Unknown type tag, decoding as None"
                ),
                None => warn!(
                    element = element.name(),
                    "Text without a type attribute, decoding as None"
                ),
            }
            Value::None
        }
        (None, None) if is_list => Value::Sequence(Vec::new()),
        (None, None) => Value::Mapping(Mapping::new()),
    }
}

/// Key an element contributes to its parent's mapping.
fn key_of(element: &XmlElement) -> Key {
    if element.name() == NUMERIC_TAG {
        if let Some(raw) = element.attribute(ATTR_VALUE) {
            let tag = element.attribute(ATTR_TAG_NAME_TYPE).unwrap_or_default();
            return parse_key(tag, raw).unwrap_or_else(|| {
                warn!(value = %raw, tag, "Numeric key does not parse, keeping it as a string");
                Key::Str(raw.to_string())
            });
        }
        warn!("Numeric element without a value attribute");
    }
    Key::Str(element.name().to_string())
}
