//! Convenience wrapper tying an element tree to the codec and to text I/O.
//!
//! An [`XmlDocument`] owns one parsed or encoded element tree and offers the
//! conversions a caller usually wants in one place: parse from a string or
//! file, encode from an object model, print, and decode to an object model or
//! to JSON.

use crate::decoder::{DecodeOptions, decode};
use crate::encoder::{EncodeOptions, encode};
use crate::error::Result;
use crate::json;
use crate::value::{Mapping, Value};
use crate::xml::{self, Descendants, WriteOptions, XmlElement};
use std::io::Write;
use std::path::Path;

/// An annotated XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl Default for XmlDocument {
    /// The placeholder document `<empty/>`.
    fn default() -> Self {
        Self {
            root: XmlElement::new("empty"),
        }
    }
}

impl XmlDocument {
    /// Parses a document from XML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use helios_xmldict::XmlDocument;
    ///
    /// let doc = XmlDocument::from_str(r#"<root type="list"><element-list number="0" type="bool">True</element-list></root>"#).unwrap();
    /// assert_eq!(doc.to_json().unwrap(), r#"{"root":[true]}"#);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &str) -> Result<Self> {
        Ok(Self {
            root: xml::from_xml_str(xml)?,
        })
    }

    /// Parses a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            root: xml::from_xml_file(path)?,
        })
    }

    /// Encodes a single-key root mapping.
    pub fn from_mapping(root: &Mapping, options: &EncodeOptions) -> Result<Self> {
        Ok(Self {
            root: encode(root, options)?,
        })
    }

    /// Encodes a root held as a [`Value`].
    pub fn from_value(root: &Value, options: &EncodeOptions) -> Result<Self> {
        Ok(Self {
            root: crate::encoder::encode_value(root, options)?,
        })
    }

    /// Replaces the document with one parsed from XML text.
    pub fn set(&mut self, xml: &str) -> Result<()> {
        self.root = xml::from_xml_str(xml)?;
        Ok(())
    }

    /// Replaces the document with one parsed from a file.
    pub fn set_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.root = xml::from_xml_file(path)?;
        Ok(())
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// All elements of the document in document order, root first.
    pub fn nodes(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    /// Compact XML text without indentation.
    pub fn to_xml(&self) -> Result<String> {
        xml::to_xml_string(&self.root, &WriteOptions::compact())
    }

    /// Indented XML text.
    pub fn to_pretty_xml(&self) -> Result<String> {
        xml::to_xml_string(&self.root, &WriteOptions::default())
    }

    /// Writes the document with the given formatting.
    pub fn write_to<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        xml::to_xml_writer(&self.root, writer, options)
    }

    /// Pretty-prints the document to a writer.
    pub fn dump<W: Write>(&self, writer: W) -> Result<()> {
        self.write_to(writer, &WriteOptions::default())
    }

    /// Decodes the document into the single-entry mapping `{root: value}`.
    pub fn to_value(&self) -> Result<Value> {
        self.to_value_with(&DecodeOptions::default())
    }

    pub fn to_value_with(&self, options: &DecodeOptions) -> Result<Value> {
        decode(&self.root, options)
    }

    /// Decodes the document and renders it as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        json::to_json_string(&self.to_value()?)
    }

    /// Decodes the document and renders it as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        json::to_json_string_pretty(&self.to_value()?)
    }
}
