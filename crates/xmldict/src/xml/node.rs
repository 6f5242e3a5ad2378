//! In-memory XML element tree.
//!
//! Only what the codec needs is modelled: elements with ordered attributes and
//! ordered children, and text. Comments, processing instructions and the
//! document prolog are dropped when parsing.

/// A child of an [`XmlElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn push_element(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Appends text, merging with a directly preceding text node.
    pub fn push_text(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenated text content of the direct text children, or `None` when
    /// the element has no text child at all.
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for child in &self.children {
            if let XmlNode::Text(t) = child {
                text.get_or_insert_with(String::new).push_str(t);
            }
        }
        text
    }

    /// Drops whitespace-only text children of an element that also has child
    /// elements (indentation of pretty-printed documents).
    pub(crate) fn strip_indentation(&mut self) {
        if self.has_child_elements() {
            self.children.retain(|child| match child {
                XmlNode::Text(t) => !t.trim().is_empty(),
                XmlNode::Element(_) => true,
            });
        }
    }

    /// This element and all its descendant elements, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(
            element
                .children
                .iter()
                .rev()
                .filter_map(XmlNode::as_element),
        );
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut e = XmlElement::new("a")
            .with_attribute("type", "dict")
            .with_attribute("tag-name-type", "str");
        e.set_attribute("type", "list");
        let attrs: Vec<_> = e.attributes().collect();
        assert_eq!(attrs, vec![("type", "list"), ("tag-name-type", "str")]);
        assert_eq!(e.remove_attribute("type"), Some("list".to_string()));
        assert_eq!(e.attribute("type"), None);
    }

    #[test]
    fn test_push_text_merges() {
        let mut e = XmlElement::new("a");
        assert_eq!(e.text(), None);
        e.push_text("x");
        e.push_text("&y");
        assert_eq!(e.children().len(), 1);
        assert_eq!(e.text().as_deref(), Some("x&y"));
    }

    #[test]
    fn test_strip_indentation_only_with_element_children() {
        let mut leaf = XmlElement::new("leaf");
        leaf.push_text("  ");
        leaf.strip_indentation();
        assert_eq!(leaf.text().as_deref(), Some("  "));

        let mut parent = XmlElement::new("parent");
        parent.push_text("\n  ");
        parent.push_element(XmlElement::new("child"));
        parent.push_text("\n");
        parent.strip_indentation();
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.text(), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut b = XmlElement::new("b");
        b.push_element(XmlElement::new("c"));
        let mut a = XmlElement::new("a");
        a.push_element(b);
        a.push_element(XmlElement::new("d"));
        let names: Vec<_> = a.descendants().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
