//! Object model → annotated XML.
//!
//! The encoder walks a single-key root mapping top-down. Every value's
//! structural kind is inspected before its element is emitted, so each
//! element is created in its final shape and attached to its parent exactly
//! once.
//!
//! ## Element shapes
//!
//! | Entry | Element |
//! |-------|---------|
//! | `"name": {..}` | `<name type="dict" tag-name-type="str">..</name>` |
//! | `"name": [..]` | `<name type="list" tag-name-type="str"><element-list number="0" ..>..</name>` |
//! | `"name": 42` | `<name type="int" tag-name-type="str">42</name>` |
//! | `7: "x"` | `<numeric value="7" type="str" tag-name-type="int">x</numeric>` |
//!
//! List items carry `tag-name-type="str"`: they have no mapping key, and the
//! tag describes their rendered text.

use crate::classificator::ClassificatorBook;
use crate::error::{Result, XmlDictError};
use crate::registry::{TypeTag, render_scalar, tag_of, tag_of_key};
use crate::value::{Key, Mapping, Value};
use crate::xml::XmlElement;
use crate::xml::utils::{
    ATTR_CLASSIFICATOR, ATTR_NUMBER, ATTR_TAG_NAME_TYPE, ATTR_TYPE, ATTR_VALUE, DICT_KIND,
    LIST_ITEM_TAG, LIST_KIND, NUMERIC_TAG, is_reserved_tag, is_valid_tag_name,
};
use tracing::{debug, trace};

/// Default limit on mapping/sequence nesting for both directions.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Encoder configuration.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Labels attached as `classificator` attributes, keyed by element name.
    pub classificator: ClassificatorBook,
    /// Maximum nesting depth before encoding fails.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            classificator: ClassificatorBook::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encodes a single-key root mapping into an annotated element tree.
///
/// # Examples
///
/// ```
/// use helios_xmldict::{EncodeOptions, Key, Mapping, Value, encode};
///
/// let mut root = Mapping::new();
/// root.insert("root", Value::mapping([(Key::from("answer"), Value::Int(42))]));
///
/// let element = encode(&root, &EncodeOptions::default()).unwrap();
/// let answer = element.child_elements().next().unwrap();
/// assert_eq!(answer.attribute("type"), Some("int"));
/// assert_eq!(answer.text().as_deref(), Some("42"));
/// ```
pub fn encode(root: &Mapping, options: &EncodeOptions) -> Result<XmlElement> {
    Encoder::new(options).encode(root)
}

/// Like [`encode`], for a root held as a [`Value`].
pub fn encode_value(root: &Value, options: &EncodeOptions) -> Result<XmlElement> {
    match root {
        Value::Mapping(mapping) => encode(mapping, options),
        other => Err(XmlDictError::InvalidRoot {
            found: format!("a {} value", tag_of(other)),
        }),
    }
}

/// Stateless walker over one object model.
pub struct Encoder<'a> {
    options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(options: &'a EncodeOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, root: &Mapping) -> Result<XmlElement> {
        let (key, value) = root
            .single_entry()
            .ok_or_else(|| XmlDictError::InvalidRoot {
                found: format!("{} keys", root.len()),
            })?;
        debug!(root = %key, "Encoding object model");
        self.keyed_element(key, value, 0)
    }

    /// Element for one mapping entry.
    fn keyed_element(&self, key: &Key, value: &Value, depth: usize) -> Result<XmlElement> {
        let mut element = match key {
            Key::Str(name) => {
                if is_reserved_tag(name) {
                    return Err(XmlDictError::ReservedKey { key: name.clone() });
                }
                if !is_valid_tag_name(name) {
                    return Err(XmlDictError::InvalidTagName { key: name.clone() });
                }
                XmlElement::new(name.as_str())
            }
            Key::Int(_) | Key::Float(_) => {
                XmlElement::new(NUMERIC_TAG).with_attribute(ATTR_VALUE, key.to_string())
            }
        };

        if let Some(label) = self.options.classificator.get(element.name()) {
            element.set_attribute(ATTR_CLASSIFICATOR, label);
        }

        self.fill(&mut element, value, tag_of_key(key), depth)?;
        Ok(element)
    }

    /// Annotates `element` with the kind of `value` and builds its content.
    /// `name_tag` is the type tag of whatever named the element.
    fn fill(
        &self,
        element: &mut XmlElement,
        value: &Value,
        name_tag: TypeTag,
        depth: usize,
    ) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(XmlDictError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        trace!(element = element.name(), depth, "Encoding element");

        match value {
            Value::Mapping(mapping) => {
                element.set_attribute(ATTR_TYPE, DICT_KIND);
                element.set_attribute(ATTR_TAG_NAME_TYPE, name_tag.as_str());
                for (key, child_value) in mapping {
                    let child = self.keyed_element(key, child_value, depth + 1)?;
                    element.push_element(child);
                }
            }
            Value::Sequence(items) => {
                element.set_attribute(ATTR_TYPE, LIST_KIND);
                element.set_attribute(ATTR_TAG_NAME_TYPE, name_tag.as_str());
                for (index, item) in items.iter().enumerate() {
                    let mut child = XmlElement::new(LIST_ITEM_TAG)
                        .with_attribute(ATTR_NUMBER, index.to_string());
                    self.fill(&mut child, item, TypeTag::Str, depth + 1)?;
                    element.push_element(child);
                }
            }
            scalar => {
                let tag = tag_of(scalar);
                if tag == TypeTag::NoneType {
                    debug!(
                        element = element.name(),
                        "Value has no registered type tag, emitting NoneType"
                    );
                }
                element.set_attribute(ATTR_TYPE, tag.as_str());
                element.set_attribute(ATTR_TAG_NAME_TYPE, name_tag.as_str());
                let text = render_scalar(scalar)?;
                if !text.is_empty() {
                    element.push_text(text);
                }
            }
        }
        Ok(())
    }
}
