//! Criterion benchmarks for the search path.
//!
//! Performance targets:
//! - Normalize a label: < 5us
//! - Index build (1000 clips): < 50ms
//! - Query (1000 clips): < 200us

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use sc_voice::catalog::{AudioRef, Catalog, ClipRecord};
use sc_voice::search::{QueryHandler, QueryOptions, SearchIndex, normalize};

const UNITS: &[(&str, &str, &str)] = &[
    ("protoss", "zealot", "зилот"),
    ("protoss", "dragoon", "драгун"),
    ("protoss", "probe", "зонд"),
    ("terran", "marine", "піхотинець"),
    ("terran", "firebat", "вогнеметник"),
    ("terran", "ghost", "привид"),
    ("zerg", "hydralisk", "гідраліск"),
    ("zerg", "zergling", "зерглінг"),
    ("zerg", "overlord", "наглядач"),
];

const PHRASES: &[(&str, &str)] = &[
    ("ready for action", "готовий до бою"),
    ("what do you want", "чого ти хочеш"),
    ("under attack", "під атакою"),
    ("need more minerals", "потрібно більше мінералів"),
];

fn synthetic_catalog(size: usize) -> Catalog {
    let records = (0..size)
        .map(|i| {
            let (race, unit, unit_uk) = UNITS[i % UNITS.len()];
            let (phrase, phrase_uk) = PHRASES[i % PHRASES.len()];
            ClipRecord::new(
                format!("{unit}-{i}"),
                AudioRef::FileId(format!("file-{i}")),
                format!("{unit} {phrase} {i}"),
                format!("{unit_uk} {phrase_uk}"),
                [race, unit],
            )
        })
        .collect();
    Catalog::from_records(records).unwrap()
}

// =============================================================================
// Normalization Benchmarks
// =============================================================================

fn normalize_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("latin_label", |b| {
        b.iter(|| normalize(black_box("You want a piece of me, boy?")));
    });

    group.bench_function("cyrillic_label", |b| {
        b.iter(|| normalize(black_box("Хочеш шматочок мене, хлопче?")));
    });

    group.finish();
}

// =============================================================================
// Index Build Benchmarks
// =============================================================================

fn index_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100usize, 1000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| SearchIndex::build(black_box(catalog)));
        });
    }

    group.finish();
}

// =============================================================================
// Query Benchmarks
// =============================================================================

fn query_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let handler = QueryHandler::new(synthetic_catalog(1000), QueryOptions::default());

    for query in ["zealot", "протос", "ready", "mar", "need more minerals", "xyz"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| handler.search(black_box(query)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    normalize_benchmarks,
    index_benchmarks,
    query_benchmarks
);
criterion_main!(benches);
