//! Round-trip tests: object model → XML text → object model.

use helios_xmldict::literal::MAX_NESTING;
use helios_xmldict::xml::{WriteOptions, from_xml_str, to_xml_string};
use helios_xmldict::{
    DecodeOptions, EncodeOptions, Key, Mapping, Result, TypeTag, Value, XmlDictError, decode,
    decode_root, encode, tag_of,
};

/// Encodes `{root_key: value}`, prints it, parses it back and decodes it.
fn roundtrip_with(value: &Value, options: &WriteOptions) -> Result<Value> {
    let root = Mapping::from_iter([(Key::from("root"), value.clone())]);
    let element = encode(&root, &EncodeOptions::default())?;
    let xml = to_xml_string(&element, options)?;
    let parsed = from_xml_str(&xml)?;
    decode_root(&parsed, &DecodeOptions::default())
}

fn roundtrip(value: &Value) -> Result<Value> {
    let pretty = roundtrip_with(value, &WriteOptions::default())?;
    let compact = roundtrip_with(value, &WriteOptions::compact())?;
    assert_eq!(
        pretty, compact,
        "pretty and compact output decode differently"
    );
    Ok(pretty)
}

fn single(key: &str, value: Value) -> Value {
    Value::mapping([(Key::from(key), value)])
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn test_scalar_roundtrip_for_every_registered_tag() -> Result<()> {
    let samples = [
        (Value::Bool(true), TypeTag::Bool),
        (Value::Int(42), TypeTag::Int),
        (Value::Float(3.14), TypeTag::Float),
        (Value::from("héllo"), TypeTag::Str),
        (Value::bytes(b"\x00\x01".to_vec()), TypeTag::Bytes),
        (Value::tuple([1, 2, 3]), TypeTag::Tuple),
    ];

    for (sample, tag) in samples {
        let decoded = roundtrip(&single("k", sample.clone()))?;
        let k = decoded.get("k").expect("key k missing");
        assert_eq!(k, &sample);
        assert_eq!(tag_of(k), tag);
    }
    Ok(())
}

#[test]
fn test_scalar_edge_values() -> Result<()> {
    let samples = [
        Value::Bool(false),
        Value::Int(i64::MAX),
        Value::Int(-1),
        Value::Float(3.0),
        Value::Float(-0.0),
        Value::Float(1e-300),
        Value::Float(f64::NEG_INFINITY),
        Value::from(""),
        Value::from("  leading and trailing  "),
        Value::from("multi\nline\ttext"),
        Value::from("<markup> & \"quotes\" 'apos'"),
        Value::from("True"),
        Value::from("42"),
        Value::bytes(Vec::new()),
        Value::Tuple(vec![]),
        Value::tuple([Value::from("a, b"), Value::None, Value::Float(0.5)]),
    ];

    for sample in samples {
        let decoded = roundtrip(&single("k", sample.clone()))?;
        assert_eq!(decoded.get("k"), Some(&sample), "sample {:?}", sample);
    }
    Ok(())
}

#[test]
fn test_deep_tuple_roundtrips_or_fails_to_encode() -> Result<()> {
    let nested = |levels: usize| {
        let mut value = Value::Int(1);
        for _ in 0..levels {
            value = Value::tuple([value]);
        }
        value
    };

    let deepest = single("k", nested(MAX_NESTING));
    assert_eq!(roundtrip(&deepest)?, deepest);

    let too_deep = Mapping::from_iter([(Key::from("root"), nested(MAX_NESTING + 1))]);
    assert!(matches!(
        encode(&too_deep, &EncodeOptions::default()),
        Err(XmlDictError::DepthLimitExceeded { .. })
    ));
    Ok(())
}

#[test]
fn test_scalar_root_value() -> Result<()> {
    assert_eq!(roundtrip(&Value::Int(5))?, Value::Int(5));
    Ok(())
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn test_numeric_key_roundtrip() -> Result<()> {
    let value = Value::mapping([
        (Key::Int(1), Value::from("a")),
        (Key::Float(2.5), Value::from("b")),
    ]);
    let decoded = roundtrip(&value)?;
    let keys: Vec<Key> = decoded.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec![Key::Int(1), Key::Float(2.5)]);
    assert_eq!(decoded, value);
    Ok(())
}

#[test]
fn test_numeric_key_with_container_values() -> Result<()> {
    let value = Value::mapping([
        (Key::Int(-3), Value::sequence([1, 2])),
        (Key::Float(1.0), single("inner", Value::Bool(true))),
        (Key::from("three"), Value::from("3")),
    ]);
    assert_eq!(roundtrip(&value)?, value);
    Ok(())
}

#[test]
fn test_numeric_root_key() -> Result<()> {
    let root = Mapping::from_iter([(Key::Int(7), Value::from("seven"))]);
    let element = encode(&root, &EncodeOptions::default())?;
    assert_eq!(element.name(), "numeric");
    let decoded = decode(&element, &DecodeOptions::default())?;
    assert_eq!(decoded, Value::Mapping(root));
    Ok(())
}

// =============================================================================
// Containers
// =============================================================================

#[test]
fn test_list_roundtrip_and_numbering() -> Result<()> {
    let items = Value::sequence([Value::Int(1), Value::from("x"), Value::Float(3.0)]);
    let value = single("items", items.clone());

    let decoded = roundtrip(&value)?;
    let decoded_items = decoded.get("items").and_then(Value::as_sequence).unwrap();
    let original_items = items.as_sequence().unwrap();
    assert_eq!(decoded_items.len(), original_items.len());
    for (decoded, original) in decoded_items.iter().zip(original_items) {
        assert_eq!(decoded, original);
        assert_eq!(tag_of(decoded), tag_of(original));
    }

    let root = Mapping::from_iter([(Key::from("root"), value)]);
    let element = encode(&root, &EncodeOptions::default())?;
    let list = element.child_elements().next().unwrap();
    for (index, item) in list.child_elements().enumerate() {
        assert_eq!(item.attribute("number"), Some(index.to_string().as_str()));
    }
    Ok(())
}

#[test]
fn test_nested_structure_roundtrip() -> Result<()> {
    let value = Value::mapping([
        (
            Key::from("outer"),
            Value::mapping([(
                Key::from("list"),
                Value::sequence([
                    single("first", Value::Int(1)),
                    Value::from("between"),
                    Value::mapping([
                        (Key::from("z"), Value::Bool(false)),
                        (
                            Key::from("a"),
                            Value::sequence([Value::sequence([1]), Value::None]),
                        ),
                    ]),
                ]),
            )]),
        ),
        (Key::from("tail"), Value::Float(-2.25)),
    ]);
    let decoded = roundtrip(&value)?;
    assert_eq!(decoded, value);

    // Mapping equality ignores order, so check it explicitly.
    let inner = decoded
        .get("outer")
        .and_then(|o| o.get("list"))
        .and_then(Value::as_sequence)
        .unwrap();
    let keys: Vec<String> = inner[2]
        .as_mapping()
        .unwrap()
        .keys()
        .map(ToString::to_string)
        .collect();
    assert_eq!(keys, vec!["z", "a"]);
    Ok(())
}

#[test]
fn test_empty_containers() -> Result<()> {
    assert_eq!(
        roundtrip(&Value::Mapping(Mapping::new()))?,
        Value::Mapping(Mapping::new())
    );
    assert_eq!(
        roundtrip(&Value::Sequence(vec![]))?,
        Value::Sequence(vec![])
    );

    let value = Value::mapping([
        (Key::from("m"), Value::Mapping(Mapping::new())),
        (Key::from("s"), Value::sequence([Value::Sequence(vec![])])),
    ]);
    assert_eq!(roundtrip(&value)?, value);
    Ok(())
}

// =============================================================================
// Degradation
// =============================================================================

#[test]
fn test_none_degrades_without_disturbing_siblings() -> Result<()> {
    let value = Value::mapping([
        (Key::from("before"), Value::Int(1)),
        (Key::from("missing"), Value::None),
        (
            Key::from("after"),
            Value::sequence([Value::None, Value::from("ok")]),
        ),
    ]);
    let decoded = roundtrip(&value)?;
    assert_eq!(decoded.get("missing"), Some(&Value::None));
    assert_eq!(decoded.get("before"), Some(&Value::Int(1)));
    assert_eq!(
        decoded.get("after"),
        Some(&Value::sequence([Value::None, Value::from("ok")]))
    );
    Ok(())
}

#[test]
fn test_foreign_type_tags_decode_as_none() -> Result<()> {
    let element = from_xml_str(
        r#"<root type="dict" tag-name-type="str">
             <when type="datetime" tag-name-type="str">2024-01-01</when>
             <count type="int" tag-name-type="str">3</count>
           </root>"#,
    )?;
    let decoded = decode_root(&element, &DecodeOptions::default())?;
    assert_eq!(decoded.get("when"), Some(&Value::None));
    assert_eq!(decoded.get("count"), Some(&Value::Int(3)));
    Ok(())
}

// =============================================================================
// Idempotence over a generated grammar
// =============================================================================

/// Deterministic pseudo-random generator for the grammar sweep.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn generate(rng: &mut Lcg, depth: usize) -> Value {
    let choice = if depth == 0 { rng.below(6) } else { rng.below(8) };
    match choice {
        0 => Value::Bool(rng.below(2) == 0),
        1 => Value::Int(rng.next() as i64 - (1 << 30)),
        2 => Value::Float(rng.below(10_000) as f64 / 8.0),
        3 => Value::Str(format!("s{} é", rng.below(100))),
        4 => Value::bytes((0..rng.below(5)).map(|b| b as u8).collect::<Vec<u8>>()),
        5 => Value::tuple((0..rng.below(4)).map(|i| Value::Int(i as i64))),
        6 => Value::Sequence(
            (0..rng.below(4))
                .map(|_| generate(rng, depth - 1))
                .collect(),
        ),
        _ => {
            let mut mapping = Mapping::new();
            for i in 0..rng.below(4) {
                let key = match rng.below(3) {
                    0 => Key::Int(i as i64),
                    1 => Key::Float(i as f64 + 0.5),
                    _ => Key::Str(format!("k{}", i)),
                };
                mapping.insert(key, generate(rng, depth - 1));
            }
            Value::Mapping(mapping)
        }
    }
}

#[test]
fn test_decode_encode_is_identity_on_generated_values() -> Result<()> {
    let mut rng = Lcg(0x5eed);
    for _ in 0..200 {
        let value = generate(&mut rng, 4);
        assert_eq!(roundtrip(&value)?, value);
    }
    Ok(())
}
