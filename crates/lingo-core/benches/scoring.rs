use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lingo_core::answers::AnswerStore;
use lingo_core::model::Section;
use lingo_core::resolver::resolve;
use lingo_core::scoring::score;
use serde_json::json;

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let questions: Vec<_> = (0..20)
        .map(|i| json!({"question": format!("Q{i}"), "options": ["a", "b", "c", "d"], "correct": i % 4}))
        .collect();
    let completions: Vec<_> = (0..10)
        .map(|i| json!({"sentence": format!("S{i}"), "answer": format!("  Réponse{i} ")}))
        .collect();
    let exercise = resolve(&json!({
        "passage": "Texte",
        "questions": questions,
        "completions": completions,
    }));

    group.bench_function("mixed/all_correct", |b| {
        let mut answers = AnswerStore::new();
        for q in &exercise.questions {
            answers.set(Section::Questions.key(q.index), q.correct_index.unwrap_or(0));
        }
        for (i, _) in exercise.completions.iter().enumerate() {
            answers.set(Section::Completions.key(i), format!("réponse{i}"));
        }
        b.iter(|| score(black_box(&exercise), black_box(&answers)))
    });

    group.bench_function("mixed/no_answers", |b| {
        let answers = AnswerStore::new();
        b.iter(|| score(black_box(&exercise), black_box(&answers)))
    });

    group.finish();
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
