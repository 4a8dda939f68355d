#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use detcbor::{marshal, CborEncode, Value};

#[derive(CborEncode)]
pub struct Row {
    pub id: u64,
    pub name: String,
    #[cbor(rename = "t", omit_empty)]
    pub tags: Vec<String>,
    pub score: f64,
}

fn sample_rows() -> Vec<Row> {
    (0..64_u64)
        .map(|i| Row {
            id: i,
            name: format!("row-{i:03}"),
            tags: if i % 3 == 0 { Vec::new() } else { vec![format!("t{i}")] },
            score: f64::from(u32::try_from(i).unwrap()) * 0.5,
        })
        .collect()
}

fn sample_map() -> HashMap<String, i64> {
    (0..64_i64).map(|i| (format!("k{i:03}"), i)).collect()
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("marshal_small_map", |b| {
        let mut m = HashMap::new();
        m.insert("a", 1);
        b.iter(|| marshal(black_box(&m)).unwrap());
    });

    let map = sample_map();
    c.bench_function("marshal_medium_map", |b| {
        b.iter(|| marshal(black_box(&map)).unwrap());
    });

    let rows = sample_rows();
    c.bench_function("marshal_records", |b| {
        b.iter(|| marshal(black_box(&rows)).unwrap());
    });

    let tree = Value::Array(
        (0..64_i64)
            .map(|i| {
                Value::Map(vec![
                    (Value::from("n"), Value::from(i)),
                    (Value::from("f"), Value::from(0.25)),
                ])
            })
            .collect(),
    );
    c.bench_function("marshal_value_tree", |b| {
        b.iter(|| marshal(black_box(&tree)).unwrap());
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
