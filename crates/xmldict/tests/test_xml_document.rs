//! Wire-format and document wrapper tests.

use helios_xmldict::xml::{WriteOptions, to_xml_string};
use helios_xmldict::{
    ClassificatorBook, EncodeOptions, Key, Mapping, Result, Value, XmlDictError, XmlDocument,
};
use std::io::Write;

fn sample_root() -> Mapping {
    Mapping::from_iter([(
        Key::from("order"),
        Value::mapping([
            (Key::from("id"), Value::Int(17)),
            (Key::Int(2), Value::Bool(true)),
            (
                Key::from("lines"),
                Value::sequence([Value::from("a"), single("sku", Value::Float(1.5))]),
            ),
        ]),
    )])
}

fn single(key: &str, value: Value) -> Value {
    Value::mapping([(Key::from(key), value)])
}

#[test]
fn test_encoded_wire_format() -> Result<()> {
    let options = EncodeOptions {
        classificator: [("id", "Identifier")].into_iter().collect(),
        ..Default::default()
    };
    let doc = XmlDocument::from_mapping(&sample_root(), &options)?;
    let xml = to_xml_string(
        doc.root(),
        &WriteOptions {
            indent: Some(2),
            declaration: false,
        },
    )?;

    let expected = r#"<order type="dict" tag-name-type="str">
  <id classificator="Identifier" type="int" tag-name-type="str">17</id>
  <numeric value="2" type="bool" tag-name-type="int">True</numeric>
  <lines type="list" tag-name-type="str">
    <element-list number="0" type="str" tag-name-type="str">a</element-list>
    <element-list number="1" type="dict" tag-name-type="str">
      <sku type="float" tag-name-type="str">1.5</sku>
    </element-list>
  </lines>
</order>
"#;
    assert_eq!(xml, expected);
    Ok(())
}

#[test]
fn test_document_to_json() -> Result<()> {
    let doc = XmlDocument::from_mapping(&sample_root(), &EncodeOptions::default())?;
    assert_eq!(
        doc.to_json()?,
        r#"{"order":{"id":17,"2":true,"lines":["a",{"sku":1.5}]}}"#
    );
    let reparsed = XmlDocument::from_str(&doc.to_pretty_xml()?)?;
    assert_eq!(reparsed.to_value()?, Value::Mapping(sample_root()));
    Ok(())
}

#[test]
fn test_document_from_value_rejects_non_mapping() {
    let result = XmlDocument::from_value(&Value::from("x"), &EncodeOptions::default());
    assert!(matches!(result, Err(XmlDictError::InvalidRoot { .. })));
}

#[test]
fn test_document_file_roundtrip() -> Result<()> {
    let doc = XmlDocument::from_mapping(&sample_root(), &EncodeOptions::default())?;
    let mut file = tempfile::NamedTempFile::new()?;
    doc.dump(&mut file)?;
    file.flush()?;

    let loaded = XmlDocument::from_file(file.path())?;
    assert_eq!(loaded, doc);

    let mut replaced = XmlDocument::default();
    replaced.set_file(file.path())?;
    assert_eq!(replaced.to_value()?, Value::Mapping(sample_root()));
    Ok(())
}

#[test]
fn test_nodes_iterates_whole_document() -> Result<()> {
    let doc = XmlDocument::from_mapping(&sample_root(), &EncodeOptions::default())?;
    let names: Vec<&str> = doc.nodes().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "order",
            "id",
            "numeric",
            "lines",
            "element-list",
            "element-list",
            "sku",
        ]
    );
    Ok(())
}

#[test]
fn test_classificator_does_not_change_decoding() -> Result<()> {
    let book = ClassificatorBook::from_json_str(r#"{"order": "Order", "sku": "Stock unit"}"#)?;
    let labelled = XmlDocument::from_mapping(
        &sample_root(),
        &EncodeOptions {
            classificator: book,
            ..Default::default()
        },
    )?;
    let plain = XmlDocument::from_mapping(&sample_root(), &EncodeOptions::default())?;
    assert_eq!(labelled.root().attribute("classificator"), Some("Order"));
    assert_ne!(labelled, plain);
    assert_eq!(labelled.to_value()?, plain.to_value()?);
    Ok(())
}

#[test]
fn test_legacy_documents_decode() -> Result<()> {
    // Shape written by earlier producers: unannotated root, `unicode` tags and
    // whitespace around the list items.
    let doc = XmlDocument::from_str(
        r#"<?xml version="1.0" ?>
<root>
  <name type="unicode" tag-name-type="str">Ann</name>
  <numeric value="5" type="str" tag-name-type="str">five</numeric>
  <tags type="list" tag-name-type="str">
    <element-list number="0" type="int" tag-name-type="str">1</element-list>
  </tags>
</root>"#,
    )?;
    let expected = Value::mapping([(
        Key::from("root"),
        Value::mapping([
            (Key::from("name"), Value::from("Ann")),
            (Key::from("5"), Value::from("five")),
            (Key::from("tags"), Value::sequence([1])),
        ]),
    )]);
    assert_eq!(doc.to_value()?, expected);
    Ok(())
}
