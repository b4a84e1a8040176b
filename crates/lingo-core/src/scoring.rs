//! Attempt scoring.
//!
//! Every section present on the normalized exercise contributes to one
//! combined score, each with its own comparison rule:
//!
//! | Section             | Key             | Rule                          |
//! |---------------------|-----------------|-------------------------------|
//! | questions, choice   | `q{i}`          | answer index == correct index |
//! | questions, true/false | `q{i}`        | answer bool == correct bool   |
//! | exercises           | `ex{i}`         | trimmed, case-insensitive     |
//! | completions         | `comp{i}`       | trimmed, case-insensitive     |
//! | grammar completion  | `completion{i}` | exact text                    |
//! | matching (opt-in)   | `match{i}`      | answer index == correct index |
//!
//! A missing or wrongly-typed answer is simply incorrect.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerStore, AnswerValue};
use crate::model::{NormalizedExercise, NormalizedQuestion, QuestionKind, Section};

/// Knobs for the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// Count vocabulary matching items toward the score.
    #[serde(default)]
    pub score_matching: bool,
}

/// Outcome for one answerable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub key: String,
    pub correct: bool,
}

/// Score for a single section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub section: Section,
    pub correct: usize,
    pub total: usize,
    pub items: Vec<ItemOutcome>,
}

impl CategoryScore {
    pub fn percent(&self) -> f64 {
        percent(self.correct, self.total)
    }
}

/// Combined score for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
    /// `correct / total * 100`, or 0 when there is nothing to score.
    pub percent: f64,
    /// Per-section breakdown, only for sections that held items.
    pub breakdown: Vec<CategoryScore>,
}

impl ScoreResult {
    /// Percent rounded to a whole number, as shown to learners.
    pub fn rounded_percent(&self) -> u32 {
        self.percent.round() as u32
    }
}

/// Score an attempt with default options.
pub fn score(exercise: &NormalizedExercise, answers: &AnswerStore) -> ScoreResult {
    score_with(exercise, answers, &ScoringOptions::default())
}

/// Score an attempt.
pub fn score_with(
    exercise: &NormalizedExercise,
    answers: &AnswerStore,
    options: &ScoringOptions,
) -> ScoreResult {
    let breakdown: Vec<CategoryScore> = Section::ALL
        .iter()
        .filter(|&&section| section != Section::Matching || options.score_matching)
        .filter_map(|&section| score_section(section, exercise.section(section), answers))
        .collect();

    let correct = breakdown.iter().map(|c| c.correct).sum();
    let total = breakdown.iter().map(|c| c.total).sum();
    let percent = percent(correct, total);

    tracing::debug!(correct, total, percent, "scored attempt");

    ScoreResult {
        correct,
        total,
        percent,
        breakdown,
    }
}

/// `correct / total * 100`, or 0 when `total` is 0.
pub fn percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

fn score_section(
    section: Section,
    items: &[NormalizedQuestion],
    answers: &AnswerStore,
) -> Option<CategoryScore> {
    if items.is_empty() {
        return None;
    }

    let items: Vec<ItemOutcome> = items
        .iter()
        .map(|item| {
            let key = section.key(item.index);
            let correct = answers
                .get(&key)
                .is_some_and(|answer| is_correct(section, item, answer));
            ItemOutcome { key, correct }
        })
        .collect();

    Some(CategoryScore {
        section,
        correct: items.iter().filter(|o| o.correct).count(),
        total: items.len(),
        items,
    })
}

/// Apply the section's comparison rule to one answer.
pub fn is_correct(section: Section, item: &NormalizedQuestion, answer: &AnswerValue) -> bool {
    match section {
        Section::Questions if item.kind == QuestionKind::TrueFalse => {
            matches!((answer.as_bool(), item.correct_bool), (Some(a), Some(c)) if a == c)
        }
        Section::Questions | Section::Matching => {
            matches!((answer.as_index(), item.correct_index), (Some(a), Some(c)) if a == c)
        }
        Section::Exercises | Section::Completions => {
            match (answer.as_text(), item.correct_text.as_deref()) {
                (Some(a), Some(c)) => loose_eq(a, c),
                _ => false,
            }
        }
        Section::GrammarCompletion => {
            matches!((answer.as_text(), item.correct_text.as_deref()), (Some(a), Some(c)) if a == c)
        }
    }
}

fn loose_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use serde_json::json;

    fn assert_score(result: &ScoreResult, correct: usize, total: usize, percent: f64) {
        assert_eq!(result.correct, correct, "correct");
        assert_eq!(result.total, total, "total");
        assert!(
            (result.percent - percent).abs() < 1e-9,
            "expected {percent}%, got {}%",
            result.percent
        );
    }

    #[test]
    fn single_multiple_choice_correct() {
        let ex = resolve(&json!({
            "questions": [{"question": "Q", "options": ["a", "b"], "correct": 1}]
        }));
        let answers: AnswerStore = [("q0", 1i64)].into_iter().collect();
        assert_score(&score(&ex, &answers), 1, 1, 100.0);
    }

    #[test]
    fn grammar_completion_is_position_keyed_and_exact() {
        let ex = resolve(&json!({
            "content": {
                "exercise_type": "grammaire",
                "answers": {"1": "le", "2": "la"},
                "exercise_content": {"questions": [{"sentence": "..."}, {"sentence": "..."}]}
            }
        }));
        let answers: AnswerStore = [("completion0", "le"), ("completion1", "les")]
            .into_iter()
            .collect();
        let result = score(&ex, &answers);
        assert_score(&result, 1, 2, 50.0);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].section, Section::GrammarCompletion);

        let shouted: AnswerStore = [("completion0", "LE"), ("completion1", " la")]
            .into_iter()
            .collect();
        assert_score(&score(&ex, &shouted), 0, 2, 0.0);
    }

    #[test]
    fn empty_payload_scores_zero() {
        let ex = resolve(&json!({}));
        let answers: AnswerStore = [("q0", 1i64)].into_iter().collect();
        let result = score(&ex, &answers);
        assert_score(&result, 0, 0, 0.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn true_false_and_free_text_mix() {
        let ex = resolve(&json!({
            "questions": [{"type": "true_false", "correct": true}],
            "exercises": [{"sentence": "s", "answer": "X", "options": ["X", "Y"]}]
        }));
        let mut answers = AnswerStore::new();
        answers.set("q0", true);
        answers.set("ex0", "x");
        assert_score(&score(&ex, &answers), 2, 2, 100.0);
    }

    #[test]
    fn question_and_completion_mix_counts_both() {
        let ex = resolve(&json!({
            "prompt": "Écrivez",
            "questions": [{"question": "Q", "options": ["a", "b"], "correct": 0}],
            "completions": [{"sentence": "Je ___ étudiant.", "answer": "suis"}]
        }));
        let mut answers = AnswerStore::new();
        answers.set("q0", 0i64);
        answers.set("comp0", "es");
        let result = score(&ex, &answers);
        assert_score(&result, 1, 2, 50.0);
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn free_text_ignores_case_and_outer_whitespace() {
        let ex = resolve(&json!({
            "completions": [{"sentence": "s", "answer": "  Suis "}],
            "exercises": [{"sentence": "s", "answer": "Les"}]
        }));
        for (comp, exercise) in [("suis", "les"), ("SUIS", "  LES\t"), ("\nSuis", "lEs")] {
            let answers: AnswerStore = [("comp0", comp), ("ex0", exercise)].into_iter().collect();
            assert_score(&score(&ex, &answers), 2, 2, 100.0);
        }
        let inner: AnswerStore = [("comp0", "s uis"), ("ex0", "le s")].into_iter().collect();
        assert_score(&score(&ex, &inner), 0, 2, 0.0);
    }

    #[test]
    fn strict_types_per_section() {
        let ex = resolve(&json!({
            "questions": [
                {"options": ["a", "b"], "correct": 1},
                {"type": "true_false", "correct": false}
            ],
            "exercises": [{"sentence": "s", "answer": "1"}]
        }));
        let mut answers = AnswerStore::new();
        answers.set("q0", "1");
        answers.set("q1", 0i64);
        answers.set("ex0", 1i64);
        assert_score(&score(&ex, &answers), 0, 3, 0.0);
    }

    #[test]
    fn missing_answers_count_as_incorrect() {
        let ex = resolve(&json!({
            "passage": "P",
            "questions": [
                {"options": ["a", "b"], "correct": 0},
                {"options": ["a", "b"], "correct": 1},
                {"correct": 1}
            ]
        }));
        let answers: AnswerStore = [("q0", 0i64)].into_iter().collect();
        let result = score(&ex, &answers);
        assert_score(&result, 1, 3, 100.0 / 3.0);
        assert_eq!(result.rounded_percent(), 33);
        let keys: Vec<&str> = result.breakdown[0].items.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["q0", "q1", "q2"]);
    }

    #[test]
    fn score_grows_with_each_correct_answer() {
        let questions: Vec<_> = (0..5)
            .map(|i| json!({"question": format!("Q{i}"), "options": ["a", "b", "c"], "correct": i % 3}))
            .collect();
        let ex = resolve(&json!({ "passage": "P", "questions": questions }));

        let mut answers = AnswerStore::new();
        let mut last = score(&ex, &answers).percent;
        assert_eq!(last, 0.0);
        for q in &ex.questions {
            answers.set(Section::Questions.key(q.index), q.correct_index.unwrap());
            let next = score(&ex, &answers).percent;
            assert!(next > last, "{next} should exceed {last}");
            last = next;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn integral_float_answer_matches_index() {
        let ex = resolve(&json!({
            "questions": [{"question": "Q", "options": ["a", "b"], "correct": 1.0}]
        }));
        let answers: AnswerStore = serde_json::from_str(r#"{"q0": 1.0}"#).unwrap();
        assert_score(&score(&ex, &answers), 1, 1, 100.0);

        let answers: AnswerStore = serde_json::from_str(r#"{"q0": 1}"#).unwrap();
        assert_score(&score(&ex, &answers), 1, 1, 100.0);
    }

    #[test]
    fn category_percent_guards_zero_total() {
        let category = CategoryScore {
            section: Section::Questions,
            correct: 1,
            total: 4,
            items: vec![],
        };
        assert_eq!(category.percent(), 25.0);
        assert_eq!(percent(0, 0), 0.0);
    }

    #[test]
    fn matching_only_counts_when_enabled() {
        let ex = resolve(&json!({
            "words": [{"french": "chat", "english": "cat"}],
            "matching": [{"french": "chat", "options": ["dog", "cat"], "correct": 1}]
        }));
        let answers: AnswerStore = [("match0", 1i64)].into_iter().collect();

        assert_score(&score(&ex, &answers), 0, 0, 0.0);

        let options = ScoringOptions {
            score_matching: true,
        };
        assert_score(&score_with(&ex, &answers, &options), 1, 1, 100.0);
    }
}
