#![no_main]

use libfuzzer_sys::fuzz_target;

use detcbor::{marshal, Value};

// Builds a small value tree from the input so map ordering and float
// narrowing see arbitrary shapes.
fn build(data: &mut &[u8], depth: u8) -> Value<'static> {
    let input: &[u8] = *data;
    let Some((&op, rest)) = input.split_first() else {
        return Value::Null;
    };
    *data = rest;
    let take = |data: &mut &[u8], n: usize| -> Vec<u8> {
        let input: &[u8] = *data;
        let (head, tail) = input.split_at(n.min(input.len()));
        *data = tail;
        head.to_vec()
    };
    match op % 9 {
        0 => Value::Bool(op & 0x10 != 0),
        1 => {
            let b = take(data, 8);
            let mut buf = [0u8; 8];
            buf[..b.len()].copy_from_slice(&b);
            Value::Int(i64::from_be_bytes(buf))
        }
        2 => {
            let b = take(data, 8);
            let mut buf = [0u8; 8];
            buf[..b.len()].copy_from_slice(&b);
            Value::Uint(u64::from_be_bytes(buf))
        }
        3 => {
            let b = take(data, 8);
            let mut buf = [0u8; 8];
            buf[..b.len()].copy_from_slice(&b);
            Value::F64(f64::from_be_bytes(buf))
        }
        4 => {
            let n = usize::from(op >> 4);
            Value::text_bytes(take(data, n))
        }
        5 => {
            let n = usize::from(op >> 4);
            Value::bytes(take(data, n))
        }
        6 if depth < 8 => {
            let n = usize::from(op >> 5);
            Value::Array((0..n).map(|_| build(data, depth + 1)).collect())
        }
        7 if depth < 8 => {
            let n = usize::from(op >> 5);
            Value::Map(
                (0..n)
                    .map(|_| (build(data, depth + 1), build(data, depth + 1)))
                    .collect(),
            )
        }
        _ => Value::Null,
    }
}

fuzz_target!(|input: &[u8]| {
    let mut data = input;
    let value = build(&mut data, 0);
    if let Ok(first) = marshal(&value) {
        // Encoding must be deterministic, and a clone must encode identically.
        let second = marshal(&value.clone()).expect("second encode");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
});
