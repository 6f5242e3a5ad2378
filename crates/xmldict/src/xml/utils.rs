//! Attribute vocabulary and element-name helpers shared by the encoder and
//! decoder.

/// Structural kind or scalar type tag of an element's value.
pub const ATTR_TYPE: &str = "type";

/// Type tag of the mapping key that produced an element.
pub const ATTR_TAG_NAME_TYPE: &str = "tag-name-type";

/// Text form of a numeric key, only on [`NUMERIC_TAG`] elements.
pub const ATTR_VALUE: &str = "value";

/// Zero-based position of a list item, only on [`LIST_ITEM_TAG`] elements.
pub const ATTR_NUMBER: &str = "number";

/// Opaque display label; never read by the decoder.
pub const ATTR_CLASSIFICATOR: &str = "classificator";

/// Element name used for mapping entries whose key is a number.
pub const NUMERIC_TAG: &str = "numeric";

/// Element name used for the items of a list.
pub const LIST_ITEM_TAG: &str = "element-list";

/// `type` value of mapping nodes.
pub const DICT_KIND: &str = "dict";

/// `type` value of list nodes.
pub const LIST_KIND: &str = "list";

/// Checks if a name collides with one of the element names the codec
/// reserves for itself.
pub fn is_reserved_tag(name: &str) -> bool {
    name == NUMERIC_TAG || name == LIST_ITEM_TAG
}

/// Checks if a string can be used verbatim as an XML element name.
///
/// This is the XML 1.0 `Name` production without namespace prefixes, so `:`
/// is rejected along with everything outside the `NameStartChar` and
/// `NameChar` ranges.
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// `NameStartChar` ranges, `:` excluded.
const NAME_START_RANGES: [(char, char); 15] = [
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{2ff}'),
    ('\u{370}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2c00}', '\u{2fef}'),
    ('\u{3001}', '\u{d7ff}'),
    ('\u{f900}', '\u{fdcf}'),
    ('\u{fdf0}', '\u{fffd}'),
    ('\u{10000}', '\u{effff}'),
];

/// Ranges `NameChar` adds on top of `NameStartChar`.
const NAME_EXTRA_RANGES: [(char, char); 6] = [
    ('-', '-'),
    ('.', '.'),
    ('0', '9'),
    ('\u{b7}', '\u{b7}'),
    ('\u{300}', '\u{36f}'),
    ('\u{203f}', '\u{2040}'),
];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(low, high)| (low..=high).contains(&c))
}

fn is_name_start_char(c: char) -> bool {
    in_ranges(c, &NAME_START_RANGES)
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || in_ranges(c, &NAME_EXTRA_RANGES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_reserved_tag() {
        assert!(is_reserved_tag("numeric"));
        assert!(is_reserved_tag("element-list"));
        assert!(!is_reserved_tag("Numeric"));
        assert!(!is_reserved_tag("list"));
    }

    #[test]
    fn test_is_valid_tag_name() {
        assert!(is_valid_tag_name("root"));
        assert!(is_valid_tag_name("_private"));
        assert!(is_valid_tag_name("tag-name.v2"));
        assert!(is_valid_tag_name("héllo"));
        assert!(is_valid_tag_name("документ"));
        assert!(!is_valid_tag_name(""));
        assert!(!is_valid_tag_name("1abc"));
        assert!(!is_valid_tag_name("-x"));
        assert!(!is_valid_tag_name("with space"));
        assert!(!is_valid_tag_name("ns:tag"));
        assert!(!is_valid_tag_name("a<b"));
    }

    #[test]
    fn test_tag_name_character_ranges() {
        // Decomposed "é": a combining mark is a name character but not a start.
        assert!(is_valid_tag_name("e\u{301}"));
        assert!(!is_valid_tag_name("\u{301}e"));
        assert!(is_valid_tag_name("x\u{b7}y"));
        assert!(is_valid_tag_name("a\u{203f}b"));
        // Superscript digits and other `No` characters are not name characters.
        assert!(!is_valid_tag_name("x\u{b2}"));
        assert!(!is_valid_tag_name("\u{d7}"));
        assert!(!is_valid_tag_name("a\u{2028}"));
    }
}
