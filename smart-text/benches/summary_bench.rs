use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smart_text::analyzers::advanced::HyperLogLog;
use smart_text::prelude::*;
use std::sync::Arc;

const FIRST_NAMES: &[&str] = &["michael", "michelle", "roxanne", "ross", "anna", "ben"];
const LAST_NAMES: &[&str] = &["smith", "jones", "doe", "stone", "miller"];

fn summarizer() -> ColumnSummarizer {
    let dictionaries = NameDictionaries::new(
        FIRST_NAMES.iter().copied(),
        [
            ("michael", 0.99),
            ("michelle", 0.01),
            ("roxanne", 0.02),
            ("ross", 0.97),
            ("anna", 0.03),
            ("ben", 0.96),
        ],
    );
    ColumnSummarizer::new(
        SmartTextConfig::default(),
        NameDetector::new(Arc::new(dictionaries)),
    )
}

fn generate_names(n: usize, seed: u64) -> Vec<Option<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if rng.random_bool(0.05) {
                return None;
            }
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
            Some(if rng.random_bool(0.3) {
                format!("{last}, Mr. {first}")
            } else {
                format!("{first} {last}")
            })
        })
        .collect()
}

fn benchmark_summarize_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_partition");
    let summarizer = summarizer();

    for n in [1_000, 10_000, 100_000].iter() {
        let values = generate_names(*n, 42);
        group.throughput(Throughput::Elements(*n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                summarizer.summarize_partition(
                    values
                        .iter()
                        .map(|v| std::hint::black_box(v.as_deref())),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_summaries");
    let summarizer = summarizer();

    for partitions in [4, 16, 64].iter() {
        let summaries: Vec<ColumnSummary> = (0..*partitions)
            .map(|p| {
                let values = generate_names(1_000, p as u64);
                summarizer.summarize_partition(values.iter().map(Option::as_deref))
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{partitions}_partitions")),
            &summaries,
            |b, summaries| {
                b.iter(|| ColumnSummary::merge(std::hint::black_box(summaries.clone())));
            },
        );
    }

    group.finish();
}

fn benchmark_hyperloglog(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperloglog_insert");
    let n = 100_000u64;
    group.throughput(Throughput::Elements(n));

    group.bench_function("insert_100k", |b| {
        b.iter(|| {
            let mut hll = HyperLogLog::new();
            for i in 0..n {
                hll.insert(&std::hint::black_box(i).to_le_bytes());
            }
            hll.count()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_summarize_partition,
    benchmark_merge,
    benchmark_hyperloglog
);
criterion_main!(benches);
