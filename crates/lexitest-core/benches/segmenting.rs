use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lexitest_core::segment::{segment, split_source_paragraph};

fn long_paragraphs(sentences: usize) -> (String, String) {
    let source = "今天天气不错。".repeat(sentences);
    let target = "The weather is nice today. ".repeat(sentences);
    (source, target)
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_source_paragraph");

    for &n in &[10usize, 100, 1000] {
        let (source, _) = long_paragraphs(n);
        group.bench_function(format!("{n}_sentences"), |b| {
            b.iter(|| split_source_paragraph(black_box(&source)))
        });
    }

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    for &n in &[10usize, 100, 1000] {
        let (source, target) = long_paragraphs(n);
        group.bench_function(format!("{n}_pairs"), |b| {
            b.iter(|| segment(black_box(&source), black_box(&target)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_segment);
criterion_main!(benches);
