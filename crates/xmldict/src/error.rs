//! Error types for encoding and decoding annotated XML documents.
//!
//! Per-node problems never surface here: an unknown type tag or an unparsable
//! scalar degrades to [`Value::None`](crate::Value::None) during decoding. The
//! variants below cover structural failures that make a whole conversion
//! meaningless (a bad root, a key that cannot become an element name, runaway
//! nesting) and failures of the surrounding XML/JSON/IO layers.

use thiserror::Error;

/// The primary error type for all conversions in this crate.
#[derive(Error, Debug)]
pub enum XmlDictError {
    /// The encoder input is not a mapping with exactly one entry.
    #[error("root must be a mapping with exactly one key, found {found}")]
    InvalidRoot { found: String },

    /// A string key cannot be used as an XML element name.
    #[error("key {key:?} is not a valid XML element name")]
    InvalidTagName { key: String },

    /// A string key collides with one of the reserved element names.
    #[error("key {key:?} collides with a reserved element name")]
    ReservedKey { key: String },

    /// Nesting exceeded the configured maximum depth.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// A tuple literal could not be parsed or rendered.
    #[error("invalid literal at offset {offset}: {message}")]
    Literal { offset: usize, message: String },

    /// The XML input parsed but does not form a single-rooted element tree.
    #[error("malformed XML document: {0}")]
    MalformedXml(String),

    /// JSON serialization or deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML reader or writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute syntax error
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// XML escape sequence error
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// IO error while reading or writing a document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}

impl From<String> for XmlDictError {
    fn from(msg: String) -> Self {
        XmlDictError::Custom(msg)
    }
}

impl From<&str> for XmlDictError {
    fn from(msg: &str) -> Self {
        XmlDictError::Custom(msg.to_string())
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, XmlDictError>;
