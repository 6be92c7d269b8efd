//! End-to-end behavior of the templated codec over the standard registry.

#![expect(unused_crate_dependencies, reason = "macro hacks")]

use strata_typed_buf::{
    CodecError, Cursor, NumKind, Template, TemplateConfig, TemplatedCodec, Value,
};
use strata_typed_buf_tests::{
    proptest::{collection, prelude::*},
    registry, strategies,
};
use strata_typed_buf_types::{STANDARD_TYPES, UDim2, Vector3, Vector3int16};

#[test]
fn test_small_unsigned_scenario() {
    let reg = registry();
    let template = ["unsigned8", "unsigned16"];

    let mut writer = TemplatedCodec::new(reg, template);
    let mut bytes = writer
        .serialize(&[Value::UInt(100), Value::UInt(5000)])
        .expect("test: serialize")
        .to_vec();
    assert_eq!(bytes.len(), 3);

    let mut reader = TemplatedCodec::new(reg, template);
    let values = reader
        .import_buffer(&mut bytes)
        .expect("test: import")
        .deserialize()
        .expect("test: deserialize");
    assert_eq!(values, [Value::UInt(100), Value::UInt(5000)]);
}

#[test]
fn test_int_float_scenario() {
    let reg = registry();
    let template = ["int32", "float32"];

    let mut writer = TemplatedCodec::new(reg, template);
    let mut bytes = writer
        .serialize(&[Value::Int(-123456), Value::Float(456.75)])
        .expect("test: serialize")
        .to_vec();
    assert_eq!(bytes.len(), 8);

    let mut reader = TemplatedCodec::new(reg, template);
    let values = reader
        .import_buffer(&mut bytes)
        .expect("test: import")
        .deserialize()
        .expect("test: deserialize");
    assert_eq!(values[0], Value::Int(-123456));
    assert_eq!(values[1], Value::Float(456.75));
}

#[test]
fn test_float32_loses_precision_within_tolerance() {
    let reg = registry();
    let mut codec = TemplatedCodec::new(reg, ["float32"]);
    codec.serialize(&[Value::Float(3.14)]).expect("test: serialize");
    let back = codec.deserialize().expect("test: deserialize")[0]
        .as_f64()
        .expect("test: numeric");
    assert_ne!(back, 3.14);
    assert!((back - 3.14).abs() < 1e-6);
}

#[test]
fn test_template_mismatch() {
    let reg = registry();
    let mut codec = TemplatedCodec::new(reg, ["int8", "int8", "int8"]);
    assert!(matches!(
        codec.serialize(&[Value::Int(1), Value::Int(2)]),
        Err(CodecError::TemplateMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_boundary_selection() {
    let reg = registry();
    for (value, expected) in [
        (Value::Int(127), "int8"),
        (Value::Int(128), "int16"),
        (Value::Int(32767), "int16"),
        (Value::Int(32768), "int32"),
        (Value::Float(3.14), "float64"),
        (Value::Float(456.75), "float32"),
    ] {
        assert_eq!(reg.resolve_type(&value), Some(expected), "test: {value}");
    }
}

#[test]
fn test_bijection() {
    let reg = registry();
    for name in STANDARD_TYPES {
        let id = reg.type_to_id(name).expect("test: registered");
        assert_eq!(reg.id_to_type(id), Some(name));
    }
    for d in reg.iter() {
        assert_eq!(reg.type_to_id(d.name()).expect("test: registered"), d.id());
    }
}

#[test]
fn test_mixed_composite_template() {
    let reg = registry();
    let values = vec![
        Value::from(Vector3::new(1.0, 2.0, 3.0)),
        Value::UInt(7),
        Value::from(UDim2::new(0.5, -20, 1.0, 0)),
    ];

    let mut codec = TemplatedCodec::new(reg, ["Vector3", "unsigned8", "UDim2"]);
    let len = codec.serialize(&values).expect("test: serialize").len();
    assert_eq!(len, 24 + 1 + 32);

    // Probe the middle field without moving the pointer.
    let mut bytes = codec.cursor().bytes().expect("test: bound").to_vec();
    let mut probe = Cursor::new(reg);
    probe.set_buffer(Some(&mut bytes[..])).expect("test: attach");
    let (v, n) = probe.read_type("unsigned8", Some(24)).expect("test: probe");
    assert_eq!((v, n), (Value::UInt(7), 1));
    assert_eq!(probe.pointer(), 0);

    assert_eq!(codec.deserialize().expect("test: deserialize"), values);
}

#[test]
fn test_serialize_auto_composites() {
    let reg = registry();
    let values = [
        Value::from(Vector3::new(0.0, 1.0, 0.0)),
        Value::Int(-5),
        Value::Float(1e100),
    ];

    let mut codec = TemplatedCodec::new(reg, Template::default());
    let len = codec.serialize_auto(&values).expect("test: serialize").len();
    assert_eq!(len, 24 + 1 + 8);
    assert_eq!(
        codec.template(),
        &Template::from(["Vector3", "int8", "float64"])
    );
    assert_eq!(codec.deserialize().expect("test: deserialize"), values);
}

#[test]
fn test_strict_import() {
    let reg = registry();
    let mut bytes = vec![0u8; 25];
    let config = TemplateConfig::new().with_strict_length(true);
    let mut codec = TemplatedCodec::with_config(reg, ["Vector3"], config);
    codec.import_buffer(&mut bytes).expect("test: import");
    assert!(matches!(
        codec.deserialize(),
        Err(CodecError::LengthMismatch {
            expected: 24,
            found: 25
        })
    ));
}

#[test]
fn test_manual_layout_with_raw_writes() {
    let reg = registry();
    let mut cur = Cursor::new(reg);
    cur.alloc_buffer(7)
        .expect("test: alloc")
        .write(1, NumKind::Unsigned, 3u8)
        .expect("test: write")
        .write_type("Vector3int16", &Value::from(Vector3int16::new(1, -1, 300)))
        .expect("test: write_type");
    assert_eq!(cur.pointer(), 7);

    // Raw reads don't advance.
    cur.set_pointer(1).expect("test: seek");
    assert_eq!(cur.read(2, NumKind::Signed).expect("test: read"), Value::Int(1));
    assert_eq!(cur.read(2, NumKind::Signed).expect("test: read"), Value::Int(1));
    cur.increment_pointer(4).expect("test: skip");
    assert_eq!(cur.read(2, NumKind::Signed).expect("test: read"), Value::Int(300));
    assert!(matches!(
        cur.increment_pointer(3),
        Err(CodecError::OutOfBounds { offset: 8, len: 7 })
    ));
}

proptest! {
    #[test]
    fn test_random_templates_roundtrip(fields in collection::vec(strategies::any_typed_value(), 0..12)) {
        let reg = registry();
        let template: Template = fields.iter().map(|(name, _)| *name).collect();
        let values: Vec<Value> = fields.into_iter().map(|(_, v)| v).collect();

        let mut writer = TemplatedCodec::new(reg, template.clone());
        let mut bytes = writer.serialize(&values).expect("test: serialize").to_vec();
        prop_assert_eq!(bytes.len(), template.byte_len(reg).expect("test: known types"));

        let mut reader = TemplatedCodec::new(reg, template);
        let decoded = reader
            .import_buffer(&mut bytes)
            .expect("test: import")
            .deserialize()
            .expect("test: deserialize");
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn test_truncated_buffers_fail(
        fields in collection::vec(strategies::any_typed_value(), 1..6),
        cut in 1usize..8,
    ) {
        let reg = registry();
        let template: Template = fields.iter().map(|(name, _)| *name).collect();
        let values: Vec<Value> = fields.into_iter().map(|(_, v)| v).collect();

        let mut writer = TemplatedCodec::new(reg, template.clone());
        let mut bytes = writer.serialize(&values).expect("test: serialize").to_vec();
        let keep = bytes.len().saturating_sub(cut);
        bytes.truncate(keep);

        let mut reader = TemplatedCodec::new(reg, template);
        let res = reader.import_buffer(&mut bytes).expect("test: import").deserialize();
        prop_assert!(matches!(res, Err(CodecError::OutOfBounds { .. })), "expected OutOfBounds, got {:?}", res);
    }

    #[test]
    fn test_pointer_stays_in_bounds(len in 0usize..32, moves in collection::vec(-40isize..40, 0..20)) {
        let reg = registry();
        let mut cur = Cursor::new(reg);
        cur.alloc_buffer(len).expect("test: alloc");
        for m in moves {
            let before = cur.pointer();
            if cur.increment_pointer(m).is_err() {
                prop_assert_eq!(cur.pointer(), before);
            }
            prop_assert!(cur.pointer() <= len);
        }
    }
}
