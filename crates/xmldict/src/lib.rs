//! # Helios XML Dictionary Codec
//!
//! Type-preserving conversion between a dynamically typed object model
//! (mappings, sequences and scalars) and XML.
//!
//! A naive XML serializer loses every scalar type and cannot tell a numeric
//! mapping key from a string one. This crate annotates each element with
//! enough metadata that decoding an encoded document reconstructs the
//! original object model.
//!
//! ## Features
//!
//! - **Encoder**: walks a single-key root [`Mapping`] and emits an annotated
//!   [`XmlElement`] tree.
//! - **Decoder**: walks an element tree and rebuilds the object model from the
//!   annotations, degrading unknown nodes to [`Value::None`] instead of
//!   failing.
//! - **Type Tag Registry**: the shared table of scalar type tags
//!   ([`registry`]).
//! - **XML and JSON layers**: quick-xml backed parsing/printing ([`xml`]) and
//!   serde_json rendering ([`json`]).
//!
//! ## Object model ↔ XML mapping
//!
//! | Object model | XML |
//! |--------------|-----|
//! | `{"root": {"name": "Ann"}}` | `<root type="dict" tag-name-type="str"><name type="str" tag-name-type="str">Ann</name></root>` |
//! | `{"root": {1: true}}` | `<root ..><numeric value="1" type="bool" tag-name-type="int">True</numeric></root>` |
//! | `{"root": {"xs": [1]}}` | `<root ..><xs type="list" tag-name-type="str"><element-list number="0" type="int" tag-name-type="str">1</element-list></xs></root>` |
//! | `{"root": {"t": (1, 2)}}` | `<root ..><t type="tuple" tag-name-type="str">(1, 2)</t></root>` |
//!
//! ## Examples
//!
//! ```
//! use helios_xmldict::{DecodeOptions, EncodeOptions, Key, Mapping, Value, decode, encode};
//! use helios_xmldict::xml::{WriteOptions, from_xml_str, to_xml_string};
//!
//! let mut root = Mapping::new();
//! root.insert(
//!     "root",
//!     Value::mapping([
//!         (Key::Int(1), Value::from("a")),
//!         (Key::from("ratio"), Value::Float(0.5)),
//!     ]),
//! );
//!
//! let element = encode(&root, &EncodeOptions::default())?;
//! let text = to_xml_string(&element, &WriteOptions::default())?;
//!
//! let decoded = decode(&from_xml_str(&text)?, &DecodeOptions::default())?;
//! assert_eq!(decoded, Value::Mapping(root));
//! # Ok::<(), helios_xmldict::XmlDictError>(())
//! ```

pub mod classificator;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod json;
pub mod literal;
pub mod registry;
pub mod value;
pub mod xml;

// Re-export common types and functions
pub use classificator::ClassificatorBook;
pub use decoder::{DecodeOptions, Decoder, decode, decode_root};
pub use document::XmlDocument;
pub use encoder::{DEFAULT_MAX_DEPTH, EncodeOptions, Encoder, encode, encode_value};
pub use error::{Result, XmlDictError};
pub use registry::{TypeTag, tag_of, type_for};
pub use value::{Key, Mapping, Value};
pub use xml::{XmlElement, XmlNode};
