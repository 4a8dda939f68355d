use std::borrow::Cow;

use detcbor::{
    encode_to_canonical, marshal, marshal_with, BoxError, CborEncode, CborError, EncodeOptions,
    Encoder, ErrorCode, FieldCache, MarshalCbor, RecordKeyOrder, Value,
};

#[test]
fn scalar_constructors() {
    assert_eq!(marshal(&Value::Null).unwrap(), vec![0xf6]);
    assert_eq!(marshal(&Value::from(false)).unwrap(), vec![0xf4]);
    assert_eq!(marshal(&Value::from(-1i64)).unwrap(), vec![0x20]);
    assert_eq!(marshal(&Value::from(500u16)).unwrap(), vec![0x19, 0x01, 0xf4]);
    assert_eq!(marshal(&Value::from(1.5f64)).unwrap(), vec![0xfa, 0x3f, 0xc0, 0x00, 0x00]);
    assert_eq!(marshal(&Value::from("a")).unwrap(), vec![0x61, b'a']);
    assert_eq!(marshal(&Value::bytes(&b"a"[..])).unwrap(), vec![0x41, b'a']);
    assert_eq!(marshal(&Value::from(None::<u8>)).unwrap(), vec![0xf6]);
    assert_eq!(marshal(&Value::from(Some(3u8))).unwrap(), vec![0x03]);
}

#[test]
fn fields_follow_record_key_order() {
    let v = Value::Fields(vec![
        (Cow::Borrowed("zz"), Value::from(1)),
        (Cow::Borrowed("a"), Value::from(2)),
    ]);
    assert_eq!(
        marshal(&v).unwrap(),
        vec![0xa2, 0x61, b'a', 0x02, 0x62, b'z', b'z', 0x01]
    );

    let cache = FieldCache::new();
    let opts = EncodeOptions::default().with_record_key_order(RecordKeyOrder::Declaration);
    assert_eq!(
        marshal_with(&v, &cache, opts).unwrap(),
        vec![0xa2, 0x62, b'z', b'z', 0x01, 0x61, b'a', 0x02]
    );
}

#[test]
fn typed_values_embed_static_types() {
    let list = vec![1u8, 2];
    let v = Value::Array(vec![Value::Typed(&list), Value::Typed(&"x")]);
    assert_eq!(marshal(&v).unwrap(), vec![0x82, 0x42, 0x01, 0x02, 0x61, b'x']);
}

#[test]
fn emptiness() {
    assert!(Value::Null.is_empty_value());
    assert!(().is_empty_value());
    assert!(Value::from(0u8).is_empty_value());
    assert!(Value::from("").is_empty_value());
    assert!(Value::Array(Vec::new()).is_empty_value());
    assert!(Value::F64(-0.0).is_empty_value());
    assert!(!Value::from(1).is_empty_value());
    assert!(!Value::from(true).is_empty_value());
    assert!(!Value::Unsupported("x".into()).is_empty_value());
}

#[test]
fn canonical_bytes_wrapper() {
    let canon = encode_to_canonical(&Value::from("IETF")).unwrap();
    assert_eq!(canon.as_bytes(), &[0x64, b'I', b'E', b'T', b'F']);
    assert_eq!(canon.len(), 5);
    assert!(!canon.is_empty());
    let again = encode_to_canonical("IETF").unwrap();
    assert_eq!(canon, again);
    let bytes: Vec<u8> = canon.into();
    assert_eq!(bytes.len(), 5);
}

#[cfg(feature = "sha2")]
#[test]
fn canonical_digest_is_stable() {
    let a = encode_to_canonical(&vec![1, 2, 3]).unwrap();
    let b = encode_to_canonical(&Value::Array(vec![
        Value::from(1),
        Value::Uint(2),
        Value::from(3i8),
    ]))
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.sha256(), b.sha256());
}

#[test]
fn debug_output_is_readable() {
    let v = Value::Array(vec![Value::from("a"), Value::Int(1)]);
    assert_eq!(format!("{v:?}"), r#"Array([Text("a"), Int(1)])"#);
}

#[test]
fn empty_encoder_is_not_canonical() {
    let err = Encoder::new().into_canonical().unwrap_err();
    assert_eq!(err.code(), ErrorCode::Malformed);
    assert!(matches!(err, CborError::Malformed { offset: 0, .. }));
}

#[test]
fn unfinished_container_is_not_canonical() {
    let mut enc = Encoder::new();
    enc.array_header(2);
    enc.uint(1).unwrap();
    assert_eq!(enc.into_canonical().unwrap_err().code(), ErrorCode::Malformed);

    let mut enc = Encoder::new();
    enc.map_header(1);
    enc.text("k").unwrap();
    assert_eq!(enc.into_canonical().unwrap_err().code(), ErrorCode::Malformed);
}

#[test]
fn several_top_level_items_are_not_canonical() {
    let mut enc = Encoder::new();
    enc.uint(1).unwrap();
    enc.uint(2).unwrap();
    let err = enc.into_canonical().unwrap_err();
    assert!(matches!(err, CborError::Malformed { offset: 1, .. }));
}

#[test]
fn finished_items_become_canonical() {
    let mut enc = Encoder::new();
    enc.array_header(2);
    enc.uint(1).unwrap();
    enc.map_header(1);
    enc.text("k").unwrap();
    enc.bytes(&[0; 300]).unwrap();
    let canon = enc.into_canonical().unwrap();
    assert_eq!(&canon.as_bytes()[..6], &[0x82, 0x01, 0xa1, 0x61, b'k', 0x59]);
    assert_eq!(canon.len(), 8 + 300);
}

struct Nothing;

impl MarshalCbor for Nothing {
    fn marshal_cbor(&self) -> Result<Vec<u8>, BoxError> {
        Ok(Vec::new())
    }
}

#[test]
fn hook_output_that_is_not_an_item_is_rejected() {
    let v = Value::Marshaler(&Nothing);
    assert_eq!(marshal(&v).unwrap(), Vec::<u8>::new());
    assert_eq!(
        encode_to_canonical(&v).unwrap_err().code(),
        ErrorCode::Malformed
    );
}
