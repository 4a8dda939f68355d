#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use serde::Serialize;

use detcbor::{marshal, to_value, to_vec, ErrorCode, Value};

#[derive(Serialize)]
struct Record {
    zeta: u8,
    alpha: &'static str,
    list: Vec<i32>,
    #[serde(with = "serde_bytes_like")]
    blob: Vec<u8>,
}

mod serde_bytes_like {
    pub fn serialize<S: serde::Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(v)
    }
}

#[derive(Serialize)]
enum Op {
    Noop,
    Push(u8),
    Swap(u8, u8),
    Move { from: u8, to: u8 },
}

#[test]
fn structs_become_sorted_maps() {
    let r = Record {
        zeta: 1,
        alpha: "a",
        list: vec![1, 2],
        blob: vec![0xff],
    };
    assert_eq!(
        to_vec(&r).unwrap(),
        vec![
            0xa4, 0x64, b'b', b'l', b'o', b'b', 0x41, 0xff, 0x64, b'l', b'i', b's', b't', 0x82,
            0x01, 0x02, 0x64, b'z', b'e', b't', b'a', 0x01, 0x65, b'a', b'l', b'p', b'h', b'a',
            0x61, b'a',
        ]
    );
}

#[test]
fn enums_are_externally_tagged() {
    assert_eq!(to_vec(&Op::Noop).unwrap(), vec![0x64, b'N', b'o', b'o', b'p']);
    assert_eq!(
        to_vec(&Op::Push(7)).unwrap(),
        vec![0xa1, 0x64, b'P', b'u', b's', b'h', 0x07]
    );
    assert_eq!(
        to_vec(&Op::Swap(1, 2)).unwrap(),
        vec![0xa1, 0x64, b'S', b'w', b'a', b'p', 0x82, 0x01, 0x02]
    );
    assert_eq!(
        to_vec(&Op::Move { from: 1, to: 2 }).unwrap(),
        vec![
            0xa1, 0x64, b'M', b'o', b'v', b'e', 0xa2, 0x62, b't', b'o', 0x02, 0x64, b'f', b'r',
            b'o', b'm', 0x01,
        ]
    );
}

#[test]
fn serde_and_native_paths_agree() {
    let mut m = BTreeMap::new();
    m.insert(3u32, vec!["c"]);
    m.insert(1u32, vec!["a", "b"]);
    assert_eq!(to_vec(&m).unwrap(), marshal(&m).unwrap());
    assert_eq!(to_vec(&(1.5f64, -3i64)).unwrap(), marshal(&(1.5f64, -3i64)).unwrap());
}

#[test]
fn to_value_builds_a_tree() {
    let v = to_value(&Some(5u8)).unwrap();
    assert!(matches!(v, Value::Uint(5)));
    let v = to_value(&()).unwrap();
    assert!(v.is_null());
}

#[test]
fn out_of_range_and_nan() {
    assert_eq!(
        to_vec(&u128::MAX).unwrap_err().code(),
        ErrorCode::UnsupportedValue
    );
    assert_eq!(
        to_vec(&i128::MIN).unwrap_err().code(),
        ErrorCode::UnsupportedValue
    );
    assert_eq!(
        to_vec(&f64::NAN).unwrap_err().code(),
        ErrorCode::UnsupportedValue
    );
}
