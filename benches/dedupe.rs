use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wikilist::functions::dedupe::dedupe;
use wikilist::value::ValueList;

fn make_repeats(count: usize) -> ValueList {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                format!("value{}", i % 50)
            } else {
                format!("VALUE{}", i % 50)
            }
        })
        .collect()
}

fn bench_dedupe(c: &mut Criterion) {
    let small = make_repeats(100);
    let medium = make_repeats(10_000);

    c.bench_function("dedupe_cs_100", |b| {
        b.iter(|| black_box(dedupe(small.clone(), true)))
    });

    c.bench_function("dedupe_cs_10k", |b| {
        b.iter(|| black_box(dedupe(medium.clone(), true)))
    });

    c.bench_function("dedupe_ncs_10k", |b| {
        b.iter(|| black_box(dedupe(medium.clone(), false)))
    });
}

criterion_group!(benches, bench_dedupe);
criterion_main!(benches);
