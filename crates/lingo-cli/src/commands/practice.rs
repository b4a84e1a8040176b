//! The `lingo practice` command: take an exercise on stdin.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use lingo_core::answers::{AnswerStore, AnswerValue};
use lingo_core::model::{NormalizedExercise, NormalizedQuestion, QuestionKind, Section};
use lingo_core::resolver::resolve;
use lingo_core::scoring::{score_with, ScoreResult, ScoringOptions};
use lingo_core::timer::SessionTimer;

use super::AttemptArgs;
use crate::files;

pub fn execute(payload_path: PathBuf, attempt: AttemptArgs) -> Result<()> {
    let config = attempt.load_config()?;
    let exercise = resolve(&files::load_payload(&payload_path)?);

    let timer = SessionTimer::started();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = run_session(&exercise, &config.scoring, stdin.lock(), stdout.lock())?;
    let elapsed = timer.elapsed_seconds();

    println!("Time: {elapsed}s");
    attempt.record(&config, exercise.kind, &result, elapsed)
}

/// Prompt for every answerable item, then score and report.
///
/// An empty line skips an item. End of input stops asking; anything not yet
/// answered counts as wrong.
pub fn run_session<R, W>(
    exercise: &NormalizedExercise,
    options: &ScoringOptions,
    mut input: R,
    mut out: W,
) -> Result<ScoreResult>
where
    R: BufRead,
    W: Write,
{
    if !exercise.is_recognized() {
        writeln!(out, "This exercise could not be displayed.")?;
    }
    for issue in &exercise.issues {
        writeln!(out, "WARNING: {issue}")?;
    }
    if let Some(text) = &exercise.text {
        writeln!(out, "\n{text}\n")?;
    }

    let mut answers = AnswerStore::new();
    let mut line = String::new();

    'sections: for section in practiced_sections(options) {
        for item in exercise.section(section) {
            write_item(&mut out, section, item)?;
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break 'sections;
            }
            if let Some(answer) = parse_answer(section, item, &line) {
                answers.set(section.key(item.index), answer);
            }
        }
    }

    let result = score_with(exercise, &answers, options);
    write_results(&mut out, exercise, &result)?;
    Ok(result)
}

fn practiced_sections(options: &ScoringOptions) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|&s| s != Section::Matching || options.score_matching)
        .collect()
}

fn write_item<W: Write>(out: &mut W, section: Section, item: &NormalizedQuestion) -> Result<()> {
    writeln!(out, "[{}] {}", section.key(item.index), item.prompt)?;
    if let Some(instruction) = &item.instruction {
        writeln!(out, "    ({instruction})")?;
    }
    if item.kind == QuestionKind::TrueFalse {
        writeln!(out, "    true / false")?;
    } else if let Some(options) = &item.options {
        for (n, option) in options.iter().enumerate() {
            writeln!(out, "    {}. {option}", n + 1)?;
        }
    } else if item.kind == QuestionKind::MultipleChoice {
        writeln!(out, "    (no options listed; answer with the option number)")?;
    }
    Ok(())
}

/// Turn a typed line into an answer for this item.
///
/// Numbered options are 1-based on screen. A multiple-choice item without an
/// options list still takes a 1-based number. Free-text sections that offer
/// options store the chosen option's text.
fn parse_answer(section: Section, item: &NormalizedQuestion, line: &str) -> Option<AnswerValue> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }

    if item.kind == QuestionKind::TrueFalse {
        return Some(match input.to_lowercase().as_str() {
            "true" | "t" | "vrai" | "v" | "yes" | "oui" => AnswerValue::Bool(true),
            "false" | "f" | "faux" | "no" | "non" => AnswerValue::Bool(false),
            _ => AnswerValue::Text(input.to_string()),
        });
    }

    let number = input.parse::<usize>().ok().filter(|&n| n >= 1);
    let choice = number
        .zip(item.options.as_ref())
        .filter(|(n, options)| *n <= options.len());

    match (section, choice) {
        (Section::Questions | Section::Matching, Some((n, _))) => Some(position(n)),
        (Section::Questions | Section::Matching, None) => match number {
            Some(n) if item.options.is_none() => Some(position(n)),
            _ => Some(AnswerValue::Text(input.to_string())),
        },
        (_, Some((n, options))) => Some(AnswerValue::Text(options[n - 1].clone())),
        (_, None) => Some(AnswerValue::Text(input.to_string())),
    }
}

/// A 1-based on-screen number as a stored 0-based index.
fn position(n: usize) -> AnswerValue {
    i64::try_from(n - 1)
        .map(AnswerValue::Index)
        .unwrap_or_else(|_| AnswerValue::Text(n.to_string()))
}

fn expected_answer(item: &NormalizedQuestion) -> Option<String> {
    if let Some(b) = item.correct_bool {
        return Some(b.to_string());
    }
    if let Some(text) = &item.correct_text {
        return Some(text.clone());
    }
    let index = item.correct_index?;
    let option = usize::try_from(index)
        .ok()
        .and_then(|i| item.options.as_ref()?.get(i));
    Some(option.cloned().unwrap_or_else(|| format!("option {index}")))
}

fn write_results<W: Write>(
    out: &mut W,
    exercise: &NormalizedExercise,
    result: &ScoreResult,
) -> Result<()> {
    writeln!(out, "\nResults:")?;
    for category in &result.breakdown {
        let items = exercise.section(category.section);
        for (outcome, item) in category.items.iter().zip(items) {
            if outcome.correct {
                writeln!(out, "  ✓ {}", outcome.key)?;
            } else {
                match expected_answer(item) {
                    Some(expected) => writeln!(out, "  ✗ {} (answer: {expected})", outcome.key)?,
                    None => writeln!(out, "  ✗ {}", outcome.key)?,
                }
            }
        }
    }
    writeln!(
        out,
        "Score: {}/{} ({}%)",
        result.correct,
        result.total,
        result.rounded_percent()
    )?;
    Ok(())
}
