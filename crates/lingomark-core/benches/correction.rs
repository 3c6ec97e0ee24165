use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lingomark_core::correction::{correct_fill_blank, correct_short_answer};
use lingomark_core::model::{AnnotationCategory, SpanAnnotation};
use lingomark_core::spans::splice_annotations;

fn make_essay(sentences: usize) -> (String, Vec<SpanAnnotation>) {
    let sentence = "Yesterday I go to the market and buyed three apple. ";
    let text = sentence.repeat(sentences);
    let step = sentence.encode_utf16().count();
    let annotations = (0..sentences)
        .flat_map(|i| {
            let base = i * step;
            [
                SpanAnnotation {
                    start: base + 12,
                    end: base + 14,
                    category: AnnotationCategory::Grammar,
                    original: "go".into(),
                    corrected: "went".into(),
                    reason: "Past tense".into(),
                },
                SpanAnnotation {
                    start: base + 33,
                    end: base + 38,
                    category: AnnotationCategory::Vocabulary,
                    original: "buyed".into(),
                    corrected: "bought".into(),
                    reason: "Irregular verb".into(),
                },
            ]
        })
        .collect();
    (text, annotations)
}

fn bench_word_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_modes");

    group.bench_function("fill_blank/short", |b| {
        b.iter(|| correct_fill_blank(black_box("ich habe ein Katze"), black_box("ich habe eine Katze")))
    });

    let long_submitted = "the quick brown fox jumps over the lazy dog ".repeat(20);
    let long_expected = "the quick brown fox leaps over the lazy cat ".repeat(20);
    group.bench_function("fill_blank/long", |b| {
        b.iter(|| correct_fill_blank(black_box(&long_submitted), black_box(&long_expected)))
    });

    group.bench_function("short_answer", |b| {
        b.iter(|| {
            correct_short_answer(
                black_box("Plants convert sunlight, water and carbon dioxide into glucose"),
                black_box("sunlight water carbon dioxide glucose oxygen"),
            )
        })
    });

    group.finish();
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice_annotations");

    for sentences in [1usize, 10, 100] {
        let (text, annotations) = make_essay(sentences);
        group.bench_function(format!("sentences={sentences}"), |b| {
            b.iter(|| splice_annotations(black_box(&text), black_box(&annotations)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_word_modes, bench_splice);
criterion_main!(benches);
