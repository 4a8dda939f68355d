use std::collections::{BTreeMap, HashMap};

use detcbor::{marshal, Encoder, Major, Value};

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn encode_one(f: impl FnOnce(&mut Encoder<'static>)) -> Vec<u8> {
    let mut enc = Encoder::new();
    f(&mut enc);
    enc.into_vec()
}

#[test]
fn basic_vectors() {
    assert_eq!(marshal(&0u64).unwrap(), hex("00"));
    assert_eq!(marshal(&-1i64).unwrap(), hex("20"));
    assert_eq!(marshal(&1000i32).unwrap(), hex("1903e8"));
    assert_eq!(marshal(&true).unwrap(), hex("f5"));
    assert_eq!(marshal(&false).unwrap(), hex("f4"));
    assert_eq!(marshal(&()).unwrap(), hex("f6"));
    assert_eq!(marshal("").unwrap(), hex("60"));
    assert_eq!(marshal("IETF").unwrap(), hex("6449455446"));
    assert_eq!(marshal(&Vec::<u8>::new()).unwrap(), hex("40"));
    assert_eq!(marshal(&Vec::<i64>::new()).unwrap(), hex("80"));
}

#[test]
fn int_map_vector() {
    let mut m = HashMap::new();
    m.insert(1, 2);
    m.insert(3, 4);
    assert_eq!(marshal(&m).unwrap(), hex("a201020304"));
}

#[test]
fn five_entry_text_map_vector() {
    let mut m = HashMap::new();
    for (k, v) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")] {
        m.insert(k, v);
    }
    assert_eq!(
        marshal(&m).unwrap(),
        hex("a56161614161626142616361436164614461656145")
    );
}

#[test]
fn unsigned_boundaries() {
    assert_eq!(marshal(&23u8).unwrap(), hex("17"));
    assert_eq!(marshal(&24u8).unwrap(), hex("1818"));
    assert_eq!(marshal(&255u8).unwrap(), hex("18ff"));
    assert_eq!(marshal(&256u16).unwrap(), hex("190100"));
    assert_eq!(marshal(&65_535u16).unwrap(), hex("19ffff"));
    assert_eq!(marshal(&65_536u32).unwrap(), hex("1a00010000"));
    assert_eq!(marshal(&1_000_000u32).unwrap(), hex("1a000f4240"));
    assert_eq!(marshal(&4_294_967_296u64).unwrap(), hex("1b0000000100000000"));
    assert_eq!(
        marshal(&1_000_000_000_000u64).unwrap(),
        hex("1b000000e8d4a51000")
    );
    assert_eq!(marshal(&u64::MAX).unwrap(), hex("1bffffffffffffffff"));
}

#[test]
fn negative_boundaries() {
    assert_eq!(marshal(&-10i8).unwrap(), hex("29"));
    assert_eq!(marshal(&-24i8).unwrap(), hex("37"));
    assert_eq!(marshal(&-25i8).unwrap(), hex("3818"));
    assert_eq!(marshal(&-100i8).unwrap(), hex("3863"));
    assert_eq!(marshal(&-256i16).unwrap(), hex("38ff"));
    assert_eq!(marshal(&-257i16).unwrap(), hex("390100"));
    assert_eq!(marshal(&-1000i16).unwrap(), hex("3903e7"));
    assert_eq!(marshal(&i64::MIN).unwrap(), hex("3b7fffffffffffffff"));
}

#[test]
fn wide_integers() {
    assert_eq!(marshal(&i128::from(u64::MAX)).unwrap(), hex("1bffffffffffffffff"));
    assert_eq!(
        marshal(&-18_446_744_073_709_551_616i128).unwrap(),
        hex("3bffffffffffffffff")
    );
    assert_eq!(marshal(&1000usize).unwrap(), hex("1903e8"));
    assert_eq!(marshal(&-1000isize).unwrap(), hex("3903e7"));
}

#[test]
fn float_vectors() {
    assert_eq!(marshal(&0.0f64).unwrap(), hex("fa00000000"));
    assert_eq!(marshal(&-0.0f64).unwrap(), hex("fa00000000"));
    assert_eq!(marshal(&1.0f64).unwrap(), hex("fa3f800000"));
    assert_eq!(marshal(&1.1f64).unwrap(), hex("fb3ff199999999999a"));
    assert_eq!(marshal(&1.5f64).unwrap(), hex("fa3fc00000"));
    assert_eq!(marshal(&65504.0f64).unwrap(), hex("fa477fe000"));
    assert_eq!(marshal(&100_000.0f64).unwrap(), hex("fa47c35000"));
    assert_eq!(
        marshal(&3.402_823_466_385_288_6e38f64).unwrap(),
        hex("fa7f7fffff")
    );
    assert_eq!(marshal(&1.0e300f64).unwrap(), hex("fb7e37e43c8800759c"));
    assert_eq!(marshal(&5.960_464_477_539_063e-8f64).unwrap(), hex("fa33800000"));
    assert_eq!(marshal(&0.000_061_035_156_25f64).unwrap(), hex("fa38800000"));
    assert_eq!(marshal(&-4.0f64).unwrap(), hex("fac0800000"));
    assert_eq!(marshal(&-4.1f64).unwrap(), hex("fbc010666666666666"));
    assert_eq!(marshal(&f64::INFINITY).unwrap(), hex("fa7f800000"));
    assert_eq!(marshal(&f64::NEG_INFINITY).unwrap(), hex("faff800000"));
}

#[test]
fn f32_is_always_single_precision() {
    assert_eq!(marshal(&1.5f32).unwrap(), hex("fa3fc00000"));
    assert_eq!(marshal(&-0.0f32).unwrap(), hex("fa00000000"));
    assert_eq!(marshal(&f32::INFINITY).unwrap(), hex("fa7f800000"));
}

#[test]
fn text_vectors() {
    assert_eq!(marshal("a").unwrap(), hex("6161"));
    assert_eq!(marshal("\"\\").unwrap(), hex("62225c"));
    assert_eq!(marshal("\u{00fc}").unwrap(), hex("62c3bc"));
    assert_eq!(marshal("\u{6c34}").unwrap(), hex("63e6b0b4"));
    assert_eq!(marshal("\u{10151}").unwrap(), hex("64f0908591"));
    assert_eq!(marshal(&'a').unwrap(), hex("6161"));
    assert_eq!(marshal(&String::from("IETF")).unwrap(), hex("6449455446"));
}

#[test]
fn byte_strings() {
    assert_eq!(marshal(&[1u8, 2, 3, 4][..]).unwrap(), hex("4401020304"));
    assert_eq!(marshal(&vec![1u8, 2, 3, 4]).unwrap(), hex("4401020304"));
    assert_eq!(marshal(&[1u8, 2, 3, 4]).unwrap(), hex("4401020304"));
}

#[test]
fn array_vectors() {
    assert_eq!(marshal(&vec![1, 2, 3]).unwrap(), hex("83010203"));
    assert_eq!(marshal(&[1u16, 2, 3]).unwrap(), hex("83010203"));

    let nested = Value::Array(vec![
        Value::from(1),
        Value::Array(vec![Value::from(2), Value::from(3)]),
        Value::Array(vec![Value::from(4), Value::from(5)]),
    ]);
    assert_eq!(marshal(&nested).unwrap(), hex("8301820203820405"));

    let long: Vec<u32> = (1..=25).collect();
    assert_eq!(
        marshal(&long).unwrap(),
        hex("98190102030405060708090a0b0c0d0e0f101112131415161718181819")
    );

    assert_eq!(marshal(&vec!["a", "b", "c"]).unwrap(), hex("83616161626163"));
}

#[test]
fn mixed_containers() {
    let inner = vec![2, 3];
    let v = Value::Map(vec![
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::Typed(&inner)),
    ]);
    assert_eq!(marshal(&v).unwrap(), hex("a26161016162820203"));

    let mut b = BTreeMap::new();
    b.insert("b", "c");
    let v = Value::Array(vec![Value::from("a"), Value::Typed(&b)]);
    assert_eq!(marshal(&v).unwrap(), hex("826161a161626163"));
}

#[test]
fn tuples_encode_as_arrays() {
    assert_eq!(marshal(&(1, "a")).unwrap(), hex("82016161"));
    assert_eq!(marshal(&(true, (), 2u8, -1i8)).unwrap(), hex("84f5f60220"));
}

#[test]
fn options_and_pointers() {
    assert_eq!(marshal(&None::<u8>).unwrap(), hex("f6"));
    assert_eq!(marshal(&Some(1u8)).unwrap(), hex("01"));
    assert_eq!(marshal(&Box::new(1000)).unwrap(), hex("1903e8"));
    assert_eq!(marshal(&std::sync::Arc::new("a")).unwrap(), hex("6161"));
    assert_eq!(marshal(&std::borrow::Cow::Borrowed("a")).unwrap(), hex("6161"));
}

#[test]
fn sequences_of_wrapped_bytes_are_arrays() {
    assert_eq!(marshal(&vec![Some(1u8), None]).unwrap(), hex("8201f6"));
    assert_eq!(marshal(&vec![Box::new(1u8), Box::new(2)]).unwrap(), hex("820102"));
    let (a, b) = (3u8, 4u8);
    assert_eq!(marshal(&[&a, &b]).unwrap(), hex("820304"));
    assert_eq!(
        marshal(&vec![std::rc::Rc::new(5u8)]).unwrap(),
        hex("8105")
    );
    // A bare byte container is still a byte string.
    assert_eq!(marshal(&vec![1u8, 2]).unwrap(), hex("420102"));
}

#[test]
fn write_item_chooses_minimal_width() {
    assert_eq!(encode_one(|e| e.write_item(Major::Unsigned, 0)), hex("00"));
    assert_eq!(encode_one(|e| e.write_item(Major::Text, 23)), hex("77"));
    assert_eq!(encode_one(|e| e.write_item(Major::Bytes, 24)), hex("5818"));
    assert_eq!(encode_one(|e| e.write_item(Major::Array, 256)), hex("990100"));
    assert_eq!(
        encode_one(|e| e.write_item(Major::Map, 65_536)),
        hex("ba00010000")
    );
    assert_eq!(
        encode_one(|e| e.write_item(Major::Negative, u64::MAX)),
        hex("3bffffffffffffffff")
    );
}

#[test]
fn header_width_has_one_source() {
    use detcbor::profile::{argument_len, minimal_additional_info};

    for n in [0, 23, 24, 255, 256, 65_535, 65_536, 4_294_967_295, 4_294_967_296, u64::MAX] {
        let bytes = encode_one(|e| e.write_item(Major::Unsigned, n));
        assert_eq!(bytes[0] & 0x1f, minimal_additional_info(n));
        assert_eq!(bytes.len(), detcbor::encoded_header_len(n));
        assert_eq!(Some(bytes.len() - 1), argument_len(bytes[0] & 0x1f));
    }
    assert_eq!(argument_len(28), None);
    assert_eq!(argument_len(31), None);
}

#[test]
fn headers_written_directly() {
    let bytes = encode_one(|e| {
        e.array_header(2);
        e.uint(1).unwrap();
        e.map_header(0);
    });
    assert_eq!(bytes, hex("8201a0"));
}

#[test]
fn simple_value_codes() {
    use detcbor::profile::{SIMPLE_FALSE, SIMPLE_FLOAT32, SIMPLE_FLOAT64, SIMPLE_NULL, SIMPLE_TRUE};

    assert_eq!(Major::Simple.initial_byte(SIMPLE_FALSE), 0xf4);
    assert_eq!(Major::Simple.initial_byte(SIMPLE_TRUE), 0xf5);
    assert_eq!(Major::Simple.initial_byte(SIMPLE_NULL), 0xf6);
    assert_eq!(Major::Simple.initial_byte(SIMPLE_FLOAT32), 0xfa);
    assert_eq!(Major::Simple.initial_byte(SIMPLE_FLOAT64), 0xfb);
    assert_eq!(marshal(&()).unwrap(), vec![Major::Simple.initial_byte(SIMPLE_NULL)]);
}
