//! XML element tree with quick-xml backed parsing and printing.
//!
//! The codec only needs "a tree of elements with ordered attributes and
//! ordered children" as its interchange type. [`XmlElement`] is that tree;
//! [`from_xml_str`] and friends build it from text and [`to_xml_string`] and
//! friends print it back.
//!
//! ## Whitespace
//!
//! Text inside an element without child elements is kept verbatim, because
//! that is where scalar values live. Whitespace-only text between child
//! elements is indentation and is dropped while parsing. The pretty printer
//! never adds whitespace inside an element that holds text, so indented and
//! compact output parse to the same tree.
//!
//! ## Annotated document shape
//!
//! ```xml
//! <root type="dict" tag-name-type="str">
//!   <name type="str" tag-name-type="str">héllo</name>
//!   <numeric value="1" type="int" tag-name-type="int">42</numeric>
//!   <items type="list" tag-name-type="str">
//!     <element-list number="0" type="int" tag-name-type="str">1</element-list>
//!   </items>
//! </root>
//! ```

pub mod de;
mod node;
pub mod ser;
pub mod utils;

pub use node::{Descendants, XmlElement, XmlNode};

// Re-export serialization functions
pub use ser::{WriteOptions, to_xml_string, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{from_xml_file, from_xml_reader, from_xml_slice, from_xml_str};
