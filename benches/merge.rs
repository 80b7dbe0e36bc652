use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wikilist::functions::merge::merge;
use wikilist::value::ValueList;

/// Values `k<n>:<i>` where every key repeats `count / keys` times.
fn make_pairs(count: usize, keys: usize) -> ValueList {
    (0..count).map(|i| format!("k{}:{}", i % keys, i)).collect()
}

fn same_key(a: &str, b: &str) -> bool {
    a.split(':').next() == b.split(':').next()
}

fn join(a: &str, b: &str) -> String {
    let tail = b.split_once(':').map_or(b, |(_, v)| v);
    format!("{} {}", a, tail)
}

fn bench_merge(c: &mut Criterion) {
    let small = make_pairs(100, 10);
    let medium = make_pairs(1_000, 100);
    let distinct = make_pairs(1_000, 1_000);

    c.bench_function("merge_100", |b| {
        b.iter(|| black_box(merge(small.clone(), same_key, join)))
    });

    c.bench_function("merge_1k", |b| {
        b.iter(|| black_box(merge(medium.clone(), same_key, join)))
    });

    c.bench_function("merge_1k_no_matches", |b| {
        b.iter(|| black_box(merge(distinct.clone(), same_key, join)))
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
