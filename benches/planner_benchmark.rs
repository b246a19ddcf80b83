//! Planner benchmark: cost of aligning two tokenized sentences.
//!
//! Target: well under the frame budget for typical headline sentences.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordwheel::{plan, tokenize, TokenSequence};

fn sentence(words: usize, offset: usize) -> TokenSequence {
    let text: Vec<String> = (0..words)
        .map(|i| format!("w{}", (i * 7 + offset) % (words / 2 + 1)))
        .collect();
    tokenize(&text.join(" ")).unwrap()
}

fn plan_headlines(c: &mut Criterion) {
    let from = tokenize("The quick brown fox is very cool, supposedly.").unwrap();
    let to = tokenize("The brown color is very very pretty, no?").unwrap();

    c.bench_function("plan_headline_pair", |b| {
        b.iter(|| plan(black_box(&from), black_box(&to)));
    });
}

fn tokenize_headline(c: &mut Criterion) {
    c.bench_function("tokenize_headline", |b| {
        b.iter(|| tokenize(black_box("We're here (in Wilkes-Barre), finally!")));
    });
}

fn plan_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_scaling");
    for words in [8, 32, 128] {
        let from = sentence(words, 0);
        let to = sentence(words, 3);
        group.bench_with_input(BenchmarkId::from_parameter(words), &words, |b, _| {
            b.iter(|| plan(black_box(&from), black_box(&to)));
        });
    }
    group.finish();
}

criterion_group!(benches, plan_headlines, tokenize_headline, plan_scaling);
criterion_main!(benches);
