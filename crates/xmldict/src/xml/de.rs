//! Parsing XML text into an [`XmlElement`] tree.
//!
//! The tree is built from quick-xml events with an explicit element stack, so
//! parsing itself never recurses. Nesting is still capped at
//! [`MAX_DOCUMENT_DEPTH`] because the resulting tree is walked and dropped
//! recursively.

use crate::error::{Result, XmlDictError};
use crate::xml::node::XmlElement;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Maximum element nesting accepted by the parser.
pub const MAX_DOCUMENT_DEPTH: usize = 4096;

/// Parse an XML document from a string.
///
/// # Examples
///
/// ```
/// use helios_xmldict::xml::from_xml_str;
///
/// let root = from_xml_str(r#"<root type="dict"><a type="int">1</a></root>"#).unwrap();
/// assert_eq!(root.name(), "root");
/// assert_eq!(root.child_elements().count(), 1);
/// ```
pub fn from_xml_str(xml: &str) -> Result<XmlElement> {
    read_tree(Reader::from_str(xml))
}

/// Parse an XML document from bytes.
pub fn from_xml_slice(xml: &[u8]) -> Result<XmlElement> {
    let xml_str = std::str::from_utf8(xml)
        .map_err(|e| XmlDictError::Custom(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml_str)
}

/// Parse an XML document from a buffered reader.
pub fn from_xml_reader<R: BufRead>(reader: R) -> Result<XmlElement> {
    read_tree(Reader::from_reader(reader))
}

/// Parse an XML document from a file.
pub fn from_xml_file(path: impl AsRef<Path>) -> Result<XmlElement> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading XML document");
    let file = File::open(path)?;
    from_xml_reader(BufReader::new(file))
}

fn read_tree<R: BufRead>(mut reader: Reader<R>) -> Result<XmlElement> {
    // Whitespace matters inside scalar leaves; indentation is removed per
    // element once its children are known.
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                if stack.len() >= MAX_DOCUMENT_DEPTH {
                    return Err(XmlDictError::DepthLimitExceeded {
                        limit: MAX_DOCUMENT_DEPTH,
                    });
                }
                let element = element_from_start(&start)?;
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots(element.name()));
                }
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml has already checked that the end name matches.
                let element = stack.pop().ok_or_else(|| {
                    XmlDictError::MalformedXml("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                push_text(&mut stack, &unescape(&raw)?)?;
            }
            Event::CData(data) => {
                push_text(&mut stack, &String::from_utf8_lossy(&data))?;
            }
            Event::GeneralRef(reference) => {
                let name = String::from_utf8_lossy(&reference);
                push_text(&mut stack, &resolve_reference(&name)?)?;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlDictError::MalformedXml(format!("unclosed element <{}>", open.name())));
    }
    root.ok_or_else(|| XmlDictError::MalformedXml("document has no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value);
        element.set_attribute(key, unescape(&raw)?.into_owned());
    }
    Ok(element)
}

/// Attaches a completed element to its parent, or makes it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    mut element: XmlElement,
) -> Result<()> {
    element.strip_indentation();
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None if root.is_some() => return Err(multiple_roots(element.name())),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => current.push_text(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(XmlDictError::MalformedXml("text outside of the root element".to_string()));
        }
    }
    Ok(())
}

fn multiple_roots(name: &str) -> XmlDictError {
    XmlDictError::MalformedXml(format!("second root element <{}>", name))
}

/// Resolves `&name;` references: the five predefined entities and character
/// references.
fn resolve_reference(name: &str) -> Result<String> {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|code| {
            let code = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }),
    };
    resolved.map(String::from).ok_or_else(|| {
        XmlDictError::MalformedXml(format!("unknown entity reference &{};", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::node::XmlNode;

    #[test]
    fn test_parse_attributes_in_order() {
        let root = from_xml_str(r#"<a type="dict" tag-name-type="str" x="&lt;1&gt;"/>"#).unwrap();
        let attrs: Vec<_> = root.attributes().collect();
        assert_eq!(
            attrs,
            vec![("type", "dict"), ("tag-name-type", "str"), ("x", "<1>")]
        );
    }

    #[test]
    fn test_parse_drops_indentation_keeps_leaf_whitespace() {
        let xml = "<?xml version=\"1.0\"?>\n<root>\n  <a>  padded  </a>\n  <!-- note -->\n  <b/>\n</root>\n";
        let root = from_xml_str(xml).unwrap();
        assert_eq!(root.children().len(), 2);
        let a = root.child_elements().next().unwrap();
        assert_eq!(a.text().as_deref(), Some("  padded  "));
    }

    #[test]
    fn test_parse_entities_and_cdata() {
        let root = from_xml_str("<t>a &amp; b &#233;&#x41;<![CDATA[<raw>]]></t>").unwrap();
        assert_eq!(root.text().as_deref(), Some("a & b éA<raw>"));
        assert!(matches!(root.children(), [XmlNode::Text(_)]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(from_xml_str("").is_err());
        assert!(from_xml_str("<a>").is_err());
        assert!(from_xml_str("<a/><b/>").is_err());
        assert!(from_xml_str("<a></b>").is_err());
        assert!(from_xml_str("text<a/>").is_err());
        assert!(from_xml_str("<a>&bogus;</a>").is_err());
    }

    #[test]
    fn test_parse_depth_limit() {
        let deep = format!(
            "{}{}",
            "<a>".repeat(MAX_DOCUMENT_DEPTH + 1),
            "</a>".repeat(MAX_DOCUMENT_DEPTH + 1)
        );
        assert!(matches!(
            from_xml_str(&deep),
            Err(XmlDictError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_parse_slice_rejects_invalid_utf8() {
        assert!(from_xml_slice(&[0x3c, 0xff, 0x3e]).is_err());
    }
}
