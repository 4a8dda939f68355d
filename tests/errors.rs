use std::collections::HashMap;
use std::sync::mpsc;

use detcbor::{marshal, CborEncode, CborError, Encoder, ErrorCode, Value};

#[test]
fn nan_is_an_unsupported_value() {
    let err = marshal(&f64::NAN).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedValue);
    assert_eq!(err.to_string(), "cbor: unsupported value: NaN");

    let err = marshal(&f32::NAN).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedValue);
}

#[test]
fn wide_integers_out_of_range() {
    let err = marshal(&(u128::from(u64::MAX) + 1)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedValue);

    let err = marshal(&(-18_446_744_073_709_551_617i128)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedValue);
}

#[test]
fn channels_and_functions_are_unsupported_types() {
    let (tx, rx) = mpsc::channel::<u8>();
    let err = marshal(&tx).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedType);
    assert!(err.to_string().starts_with("cbor: unsupported type: "));
    assert!(err.to_string().contains("Sender"));
    assert_eq!(marshal(&rx).unwrap_err().code(), ErrorCode::UnsupportedType);

    let f: fn(u8) -> u8 = |x| x;
    assert_eq!(marshal(&f).unwrap_err().code(), ErrorCode::UnsupportedType);

    let v = Value::Unsupported("complex128".into());
    let err = marshal(&v).unwrap_err();
    assert_eq!(err.to_string(), "cbor: unsupported type: complex128");
}

#[test]
fn invalid_text_is_rejected() {
    let v = Value::text_bytes(vec![0xff, 0xfe, 0xfd]);
    let err = marshal(&v).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidText);
    match err {
        CborError::InvalidText { text } => assert_eq!(text, "\u{fffd}\u{fffd}\u{fffd}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn invalid_os_string_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let s = OsStr::from_bytes(&[b'o', b'k', 0xff]);
    assert_eq!(marshal(s).unwrap_err().code(), ErrorCode::InvalidText);
    assert_eq!(marshal(OsStr::new("ok")).unwrap(), vec![0x62, b'o', b'k']);
}

#[test]
fn nested_failure_returns_no_bytes() {
    let v = Value::Array(vec![
        Value::from(1),
        Value::Array(vec![Value::from("fine"), Value::F64(f64::NAN)]),
    ]);
    assert!(marshal(&v).is_err());

    let mut m = HashMap::new();
    m.insert("ok", Value::from(1));
    m.insert("bad", Value::F64(f64::NAN));
    assert_eq!(marshal(&m).unwrap_err().code(), ErrorCode::UnsupportedValue);
}

#[test]
fn failed_write_leaves_encoder_where_it_was() {
    let mut enc = Encoder::new();
    enc.uint(7).unwrap();
    let bad = vec![Value::from(1), Value::from(2), Value::F32(f32::NAN)];
    assert!(bad.encode(&mut enc).is_err());
    assert_eq!(enc.as_bytes(), &[0x07]);

    let bad_key = Value::Map(vec![(Value::F64(f64::NAN), Value::Null)]);
    assert!(enc.value(&bad_key).is_err());
    assert_eq!(enc.as_bytes(), &[0x07]);

    enc.bool(true).unwrap();
    assert_eq!(enc.into_vec(), vec![0x07, 0xf5]);
}

#[test]
fn error_kinds_are_distinguishable() {
    let unsupported = CborError::unsupported_type("chan int");
    let value = CborError::unsupported_value(1.5);
    let text = CborError::invalid_text(b"\xc3");
    assert_eq!(unsupported.code(), ErrorCode::UnsupportedType);
    assert_eq!(value.code(), ErrorCode::UnsupportedValue);
    assert_eq!(text.code(), ErrorCode::InvalidText);
    assert_eq!(value.to_string(), "cbor: unsupported value: 1.5");
    let malformed = CborError::malformed(3, "trailing bytes");
    assert_eq!(malformed.code(), ErrorCode::Malformed);
    assert_eq!(
        malformed.to_string(),
        "cbor: output is not a single complete item at offset 3: trailing bytes"
    );
}
