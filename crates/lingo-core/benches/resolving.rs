use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lingo_core::resolver::resolve;
use serde_json::json;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let questions: Vec<_> = (0..10)
        .map(|i| json!({"question": format!("Q{i}"), "options": ["a", "b", "c"], "correct": i % 3}))
        .collect();
    let reading = json!({
        "passage": "Marie habite à Paris avec sa famille.",
        "questions": questions
    });
    group.bench_function("reading", |b| b.iter(|| resolve(black_box(&reading))));

    let grammar_completion = json!({
        "content": {
            "exercise_type": "grammaire",
            "answers": {"1": "le", "2": "la", "3": "les", "4": "un"},
            "content": {"text": "Complétez avec l'article."},
            "exercise_content": {
                "questions": [
                    {"sentence": "___ garçon"},
                    {"sentence": "___ fille"},
                    {"sentence": "___ enfants"},
                    {"sentence": "___ livre"}
                ]
            }
        }
    });
    group.bench_function("grammar_completion", |b| {
        b.iter(|| resolve(black_box(&grammar_completion)))
    });

    let unknown = json!({"foo": {"bar": [1, 2, 3]}});
    group.bench_function("unknown", |b| b.iter(|| resolve(black_box(&unknown))));

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
