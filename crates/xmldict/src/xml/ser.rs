//! Writing an [`XmlElement`] tree as XML text.

use crate::error::{Result, XmlDictError};
use crate::xml::node::{XmlElement, XmlNode};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Output formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Emit the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

impl WriteOptions {
    /// Single-line output with declaration.
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: true,
        }
    }
}

/// Serialize an element tree to an XML string.
///
/// # Examples
///
/// ```
/// use helios_xmldict::xml::{WriteOptions, XmlElement, to_xml_string};
///
/// let root = XmlElement::new("root").with_attribute("type", "dict");
/// let options = WriteOptions { indent: None, declaration: false };
/// assert_eq!(to_xml_string(&root, &options).unwrap(), r#"<root type="dict"/>"#);
/// ```
pub fn to_xml_string(root: &XmlElement, options: &WriteOptions) -> Result<String> {
    let buffer = to_xml_vec(root, options)?;
    String::from_utf8(buffer).map_err(|e| XmlDictError::Custom(e.to_string()))
}

/// Serialize an element tree to an XML byte vector.
pub fn to_xml_vec(root: &XmlElement, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(root, &mut buffer, options)?;
    Ok(buffer)
}

/// Serialize an element tree to an XML writer.
pub fn to_xml_writer<W: Write>(root: &XmlElement, out: W, options: &WriteOptions) -> Result<()> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(out, b' ', width),
        None => Writer::new(out),
    };

    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    // Explicit stack: deep trees must not exhaust the call stack.
    let mut steps = vec![Step::Enter(root)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(element) => {
                let mut start = BytesStart::new(element.name());
                for (key, value) in element.attributes() {
                    start.push_attribute((key, value));
                }
                if element.children().is_empty() {
                    writer.write_event(Event::Empty(start))?;
                    continue;
                }
                writer.write_event(Event::Start(start))?;
                steps.push(Step::Leave(element.name()));
                for child in element.children().iter().rev() {
                    steps.push(match child {
                        XmlNode::Element(e) => Step::Enter(e),
                        XmlNode::Text(t) => Step::Text(t),
                    });
                }
            }
            Step::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Step::Leave(name) => {
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
    }

    if options.indent.is_some() {
        writer.get_mut().write_all(b"\n")?;
    }
    Ok(())
}

enum Step<'a> {
    Enter(&'a XmlElement),
    Text(&'a str),
    Leave(&'a str),
}
