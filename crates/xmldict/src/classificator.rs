//! Optional lookup table of display labels keyed by element name.
//!
//! When the encoder emits an element whose name has an entry in the book, the
//! label is attached as a `classificator` attribute. The decoder never reads
//! it, so a book changes how a document looks, not what it decodes to.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Element name → display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificatorBook {
    labels: HashMap<String, String>,
}

impl ClassificatorBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a book from a JSON object of string labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use helios_xmldict::ClassificatorBook;
    ///
    /// let book = ClassificatorBook::from_json_str(r#"{"inn": "Taxpayer number"}"#).unwrap();
    /// assert_eq!(book.get("inn"), Some("Taxpayer number"));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a book from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let book = Self::from_json_str(&content)?;
        debug!(path = %path.display(), entries = book.len(), "Loaded classificator book");
        Ok(book)
    }

    pub fn insert(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(name.into(), label.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClassificatorBook {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
