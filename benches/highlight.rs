//! Highlighting and spelling benchmarks
//!
//! Highlighting runs on every keystroke, so a few pages of text should stay
//! well below a frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dxeditor::checker::distance::distance;
use dxeditor::checker::suggestions::best_match;
use dxeditor::highlight::locator::find_all;
use dxeditor::rules::defaults;
use dxeditor::{highlight, BoundaryPolicy, Vocabulary};

const PARAGRAPH: &str = "The knight wrote a column about the lambs that walk past the \
castle. Listen: a gnat in the hymn, an enmity of bad deeds, quiet plans in the \
night. ";

fn bench_highlight(c: &mut Criterion) {
    let rules = defaults::rules(defaults::DEFAULT_LANGUAGE).unwrap();
    let mut group = c.benchmark_group("highlight");

    for paragraphs in [1, 10, 100] {
        let text = PARAGRAPH.repeat(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));

        for policy in [BoundaryPolicy::Enforce, BoundaryPolicy::Ignore] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), paragraphs),
                &text,
                |b, text| b.iter(|| highlight(black_box(&rules), black_box(text), policy)),
            );
        }
    }

    group.finish();
}

fn bench_find_all(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(100);

    c.bench_function("find_all/the", |b| {
        b.iter(|| find_all(black_box("the"), black_box(&text)))
    });
}

fn bench_spelling(c: &mut Criterion) {
    let vocabulary = Vocabulary::new(defaults::vocabulary(defaults::DEFAULT_LANGUAGE));
    let mut group = c.benchmark_group("spelling");

    group.bench_function("distance", |b| {
        b.iter(|| distance(black_box("univresity"), black_box("university")))
    });
    group.bench_function("best_match", |b| {
        b.iter(|| best_match(black_box("asignment"), black_box(&vocabulary)))
    });

    group.finish();
}

criterion_group!(benches, bench_highlight, bench_find_all, bench_spelling);
criterion_main!(benches);
