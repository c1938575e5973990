use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use unitext_unicode::kmp::KMPSearch;

fn bench_vs_stdlib(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmp_vs_stdlib_find");

    let sizes = [10, 100, 1000, 10000];

    for &size in &sizes {
        group.throughput(Throughput::Elements(size as u64));

        // Worst case for naive matching: long runs of a repeated prefix.
        let mut text = "a".repeat(size);
        text.push('b');
        let chars = text.chars().collect::<Vec<_>>();
        let pattern = "aaaab";

        let kmp = KMPSearch::new_with_pattern(pattern.chars(), true);
        group.bench_with_input(BenchmarkId::new("kmp_search", size), &chars, |b, data| {
            b.iter(|| black_box(kmp.search(black_box(data), 0)));
        });

        group.bench_with_input(BenchmarkId::new("stdlib_find", size), &text, |b, data| {
            b.iter(|| black_box(black_box(data).find(pattern)));
        });

        let kmp_ci = KMPSearch::new_with_pattern("AAAAB".chars(), false);
        group.bench_with_input(
            BenchmarkId::new("kmp_search_case_insensitive", size),
            &chars,
            |b, data| {
                b.iter(|| black_box(kmp_ci.search(black_box(data), 0)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_vs_stdlib);
criterion_main!(benches);
