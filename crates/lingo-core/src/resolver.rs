//! Exercise shape resolver.
//!
//! The exercise generator returns several historical JSON layouts. This module
//! infers which one it is looking at and extracts a [`NormalizedExercise`]
//! without ever failing: missing or malformed fields degrade to `None`/empty
//! and are reported through [`ShapeIssue`]s.

use serde_json::Value;

use crate::answers::integral_index;
use crate::error::ShapeIssue;
use crate::model::{
    ExerciseKind, NormalizedExercise, NormalizedQuestion, QuestionKind, Section, VocabularyWord,
    GRAMMAR_COMPLETION_OPTIONS,
};

type Path = &'static [&'static str];

/// Where a reading passage may live, in lookup order.
const TEXT_PATHS: [Path; 6] = [
    &["passage"],
    &["content", "text"],
    &["text"],
    &["content", "passage"],
    &["content", "content", "text"],
    &["content", "exercise_content", "text"],
];

/// Where a question list may live, in lookup order.
const QUESTION_PATHS: [Path; 4] = [
    &["questions"],
    &["content", "questions"],
    &["content", "content", "questions"],
    &["content", "exercise_content", "questions"],
];

const EXERCISE_PATHS: [Path; 1] = [&["exercises"]];
const COMPLETION_PATHS: [Path; 1] = [&["completions"]];
const MATCHING_PATHS: [Path; 1] = [&["matching"]];

const GRAMMAR_TEXT_PATHS: [Path; 2] = [
    &["content", "content", "text"],
    &["content", "exercise_content", "text"],
];

const GRAMMAR_ITEMS_PATH: Path = &["content", "exercise_content", "questions"];
const GRAMMAR_ANSWERS_PATH: Path = &["content", "answers"];
const GRAMMAR_TYPE_PATH: Path = &["content", "exercise_type"];

/// Classify a raw payload and extract its normalized view.
///
/// Resolving the same payload twice yields identical results.
pub fn resolve(payload: &Value) -> NormalizedExercise {
    let kind = classify(payload);

    let text = match kind {
        ExerciseKind::GrammarCompletion => first_text(payload, &GRAMMAR_TEXT_PATHS),
        ExerciseKind::Reading => first_text(payload, &TEXT_PATHS),
        ExerciseKind::Listening => text_at(payload, &["dialogue"]),
        ExerciseKind::Grammar => text_at(payload, &["rule"]),
        ExerciseKind::Writing => text_at(payload, &["prompt"]),
        ExerciseKind::Speaking => text_at(payload, &["scenario"]),
        ExerciseKind::Vocabulary | ExerciseKind::Unknown => None,
    };

    let mut issues = Vec::new();
    if kind == ExerciseKind::Unknown {
        issues.push(ShapeIssue::UnrecognizedShape);
    }

    // The grammar-completion layout owns `content.exercise_content.questions`.
    let question_paths: &[Path] = if kind == ExerciseKind::GrammarCompletion {
        &QUESTION_PATHS[..3]
    } else {
        &QUESTION_PATHS
    };

    let questions = section_items(
        section_array(payload, question_paths, Section::Questions, &mut issues),
        Section::Questions,
        &mut issues,
        question_item,
    );
    let exercises = section_items(
        section_array(payload, &EXERCISE_PATHS, Section::Exercises, &mut issues),
        Section::Exercises,
        &mut issues,
        |index, item| free_text_item(index, item, QuestionKind::FreeText),
    );
    let completions = section_items(
        section_array(payload, &COMPLETION_PATHS, Section::Completions, &mut issues),
        Section::Completions,
        &mut issues,
        |index, item| free_text_item(index, item, QuestionKind::Completion),
    );
    let matching = section_items(
        section_array(payload, &MATCHING_PATHS, Section::Matching, &mut issues),
        Section::Matching,
        &mut issues,
        matching_item,
    );

    let grammar_completions = if kind == ExerciseKind::GrammarCompletion {
        let answers = at(payload, GRAMMAR_ANSWERS_PATH);
        let items = array_at(payload, GRAMMAR_ITEMS_PATH);
        if items.is_none() {
            issues.push(ShapeIssue::EmptyQuestionSet {
                section: Section::GrammarCompletion,
            });
        }
        section_items(
            items,
            Section::GrammarCompletion,
            &mut issues,
            |index, item| grammar_completion_item(index, item, answers),
        )
    } else {
        Vec::new()
    };

    let words = list_at(payload, "words", &mut issues)
        .map(|items| items.iter().map(vocabulary_word).collect())
        .unwrap_or_default();
    let phrases = strings_of(list_at(payload, "phrases", &mut issues));
    let prompts = strings_of(list_at(payload, "prompts", &mut issues));

    let exercise = NormalizedExercise {
        kind,
        text,
        questions,
        exercises,
        completions,
        grammar_completions,
        matching,
        words,
        phrases,
        prompts,
        issues,
    };

    tracing::debug!(
        kind = %exercise.kind,
        questions = exercise.questions.len(),
        exercises = exercise.exercises.len(),
        completions = exercise.completions.len(),
        grammar_completions = exercise.grammar_completions.len(),
        matching = exercise.matching.len(),
        "resolved exercise payload"
    );
    for issue in &exercise.issues {
        tracing::warn!(kind = %exercise.kind, "exercise shape issue: {issue}");
    }

    exercise
}

/// Decide the exercise kind. First matching rule wins.
pub fn classify(payload: &Value) -> ExerciseKind {
    if is_grammar_completion(payload) {
        ExerciseKind::GrammarCompletion
    } else if first_text(payload, &TEXT_PATHS).is_some()
        && first_array(payload, &QUESTION_PATHS).is_some()
    {
        ExerciseKind::Reading
    } else if present(payload, &["dialogue"]) {
        ExerciseKind::Listening
    } else if present(payload, &["words"]) || present(payload, &["matching"]) {
        ExerciseKind::Vocabulary
    } else if present(payload, &["rule"]) || present(payload, &["exercises"]) {
        ExerciseKind::Grammar
    } else if present(payload, &["prompt"]) && present(payload, &["completions"]) {
        ExerciseKind::Writing
    } else if present(payload, &["scenario"]) || present(payload, &["prompts"]) {
        ExerciseKind::Speaking
    } else {
        ExerciseKind::Unknown
    }
}

fn is_grammar_completion(payload: &Value) -> bool {
    let declared = at(payload, GRAMMAR_TYPE_PATH).and_then(Value::as_str) == Some("grammaire");
    let has_answers = match at(payload, GRAMMAR_ANSWERS_PATH) {
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        _ => false,
    };
    declared && has_answers
}

// ---------------------------------------------------------------------------
// Item builders
// ---------------------------------------------------------------------------

fn section_items<F>(
    items: Option<&Vec<Value>>,
    section: Section,
    issues: &mut Vec<ShapeIssue>,
    build: F,
) -> Vec<NormalizedQuestion>
where
    F: Fn(usize, &Value) -> NormalizedQuestion,
{
    let Some(items) = items else {
        return Vec::new();
    };
    if items.is_empty() {
        issues.push(ShapeIssue::EmptyQuestionSet { section });
        return Vec::new();
    }

    let built: Vec<NormalizedQuestion> = items
        .iter()
        .enumerate()
        .map(|(index, item)| build(index, item))
        .collect();

    for q in &built {
        if q.kind == QuestionKind::MultipleChoice && q.options.is_none() {
            issues.push(ShapeIssue::MissingOptions {
                section,
                index: q.index,
            });
        }
    }

    built
}

fn question_item(index: usize, item: &Value) -> NormalizedQuestion {
    let prompt = str_field(item, "question");
    if item.get("type").and_then(Value::as_str) == Some("true_false") {
        NormalizedQuestion {
            index,
            kind: QuestionKind::TrueFalse,
            prompt,
            instruction: None,
            options: None,
            correct_index: None,
            correct_bool: item.get("correct").and_then(Value::as_bool),
            correct_text: None,
        }
    } else {
        NormalizedQuestion {
            index,
            kind: QuestionKind::MultipleChoice,
            prompt,
            instruction: None,
            options: options_field(item),
            correct_index: item.get("correct").and_then(integral_index),
            correct_bool: None,
            correct_text: None,
        }
    }
}

fn free_text_item(index: usize, item: &Value, kind: QuestionKind) -> NormalizedQuestion {
    NormalizedQuestion {
        index,
        kind,
        prompt: str_field(item, "sentence"),
        instruction: None,
        options: options_field(item),
        correct_index: None,
        correct_bool: None,
        correct_text: item.get("answer").and_then(Value::as_str).map(str::to_string),
    }
}

fn matching_item(index: usize, item: &Value) -> NormalizedQuestion {
    NormalizedQuestion {
        index,
        kind: QuestionKind::MultipleChoice,
        prompt: str_field(item, "french"),
        instruction: None,
        options: options_field(item),
        correct_index: item.get("correct").and_then(integral_index),
        correct_bool: None,
        correct_text: None,
    }
}

fn grammar_completion_item(index: usize, item: &Value, answers: Option<&Value>) -> NormalizedQuestion {
    NormalizedQuestion {
        index,
        kind: QuestionKind::Completion,
        prompt: str_field(item, "sentence"),
        instruction: item
            .get("question_in_Hebrew")
            .and_then(Value::as_str)
            .map(str::to_string),
        options: Some(GRAMMAR_COMPLETION_OPTIONS.iter().map(|o| o.to_string()).collect()),
        correct_index: None,
        correct_bool: None,
        correct_text: answers
            .and_then(|a| position_answer(a, index))
            .map(str::to_string),
    }
}

/// Look up the answer for blank `index` under the 1-based string key the
/// generator emits (`"1"` for the first blank).
///
/// An array of answers is indexed with the same number, so its element 0 is
/// never consulted.
fn position_answer(answers: &Value, index: usize) -> Option<&str> {
    let position = index + 1;
    match answers {
        Value::Object(map) => map.get(&position.to_string()),
        Value::Array(items) => items.get(position),
        _ => None,
    }
    .and_then(Value::as_str)
}

fn vocabulary_word(item: &Value) -> VocabularyWord {
    VocabularyWord {
        french: str_field(item, "french"),
        english: str_field(item, "english"),
        example: str_field(item, "example"),
    }
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

fn at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |value, key| value.get(*key))
}

/// A field counts as present when it holds a non-empty, non-zero, non-false value.
fn present(payload: &Value, path: &[&str]) -> bool {
    at(payload, path).is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_at(payload: &Value, path: &[&str]) -> Option<String> {
    at(payload, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_text(payload: &Value, paths: &[Path]) -> Option<String> {
    paths.iter().find_map(|path| text_at(payload, path))
}

fn array_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    at(payload, path).and_then(Value::as_array)
}

fn first_array<'a>(payload: &'a Value, paths: &[Path]) -> Option<&'a Vec<Value>> {
    paths.iter().find_map(|path| array_at(payload, path))
}

/// The first array among `paths`. A path that holds something present but
/// not an array leaves the section empty and is reported.
fn section_array<'a>(
    payload: &'a Value,
    paths: &[Path],
    section: Section,
    issues: &mut Vec<ShapeIssue>,
) -> Option<&'a Vec<Value>> {
    let items = first_array(payload, paths);
    if items.is_none() && paths.iter().any(|path| present(payload, path)) {
        issues.push(ShapeIssue::EmptyQuestionSet { section });
    }
    items
}

fn list_at<'a>(
    payload: &'a Value,
    field: &str,
    issues: &mut Vec<ShapeIssue>,
) -> Option<&'a Vec<Value>> {
    let items = array_at(payload, &[field]);
    if items.is_none() && present(payload, &[field]) {
        issues.push(ShapeIssue::NotAList {
            field: field.to_string(),
        });
    }
    items
}

fn strings_of(items: Option<&Vec<Value>>) -> Vec<String> {
    items
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn options_field(item: &Value) -> Option<Vec<String>> {
    item.get("options").and_then(Value::as_array).map(|options| {
        options
            .iter()
            .map(|o| match o {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    })
}
