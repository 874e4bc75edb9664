//! Build and query benchmarks
//!
//! Run with: cargo bench -p locodb-core
//!
//! The dataset is synthetic: a handful of countries, each with subdivisions
//! and generated place names, so build cost and fuzzy lookup cost scale with
//! the term count rather than with real-world name distribution.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use locodb_core::prelude::*;
use std::hint::black_box;

const SYLLABLES: [&str; 12] = [
    "aber", "carn", "ton", "ley", "bury", "ford", "wick", "ham", "stow", "mouth", "dale", "port",
];

/// Fixed seed for reproducible names
const BENCH_SEED: u64 = 0xDEADBEEF_CAFEBABE;

fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn place_name(state: &mut u64) -> String {
    let parts = 2 + (lcg_next(state) % 2) as usize;
    let mut name = String::new();
    for _ in 0..parts {
        name.push_str(SYLLABLES[(lcg_next(state) >> 33) as usize % SYLLABLES.len()]);
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

fn dataset(places: usize) -> (Vec<CountryRaw>, Vec<LocodeRecord>) {
    let countries = ["GB", "FR", "DE", "NL", "BE"];
    let doc = countries
        .iter()
        .map(|cc| CountryRaw {
            code: cc.to_string(),
            alpha3: None,
            name: format!("Country {cc}"),
            short: None,
            translations: Default::default(),
            subdivisions: (0..20)
                .map(|i| SubdivisionRaw {
                    code: format!("S{i:02}"),
                    name: format!("Region {i}"),
                    level: None,
                    translations: Default::default(),
                    locations: Vec::new(),
                })
                .collect(),
            locations: Vec::new(),
        })
        .collect();

    let mut seed = BENCH_SEED;
    let records = (0..places)
        .map(|i| LocodeRecord {
            country: countries[i % countries.len()].to_string(),
            subcode: format!("{:03X}", i),
            name: place_name(&mut seed),
            subdivision_code: format!("S{:02}", i % 20),
            ..Default::default()
        })
        .collect();
    (doc, records)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for places in [1_000usize, 10_000] {
        let (doc, records) = dataset(places);
        group.throughput(Throughput::Elements(places as u64));
        group.bench_with_input(BenchmarkId::from_parameter(places), &places, |b, _| {
            b.iter(|| {
                Database::build(
                    black_box(std::slice::from_ref(&doc)),
                    black_box(std::slice::from_ref(&records)),
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let (doc, records) = dataset(10_000);
    let db = Database::build(&[doc], &[records]).unwrap();

    let mut group = c.benchmark_group("query");
    for (label, text, distance) in [
        ("exact", "Abercarn", 0u32),
        ("fuzzy_d1", "Abercorn", 1),
        ("fuzzy_d2", "Dentists in Abercorn", 2),
        ("long_sentence", "Where are all the dentists and how do I find them in Abercarn", 2),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| db.query(black_box(text), 10, distance, None).unwrap())
        });
    }
    group.bench_function("state_filter", |b| {
        b.iter(|| db.query(black_box("Abercorn"), 10, 2, Some("GB")).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
