//! The `lingo score` command.

use std::path::PathBuf;

use anyhow::Result;

use lingo_core::resolver::resolve;
use lingo_core::scoring::{score_with, ScoreResult};

use super::AttemptArgs;
use crate::files;

pub fn execute(
    payload_path: PathBuf,
    answers_path: PathBuf,
    time_spent: u64,
    format: String,
    attempt: AttemptArgs,
) -> Result<()> {
    let config = attempt.load_config()?;
    let exercise = resolve(&files::load_payload(&payload_path)?);
    let answers = files::load_answers(&answers_path)?;

    let result = score_with(&exercise, &answers, &config.scoring);
    tracing::info!(
        kind = %exercise.kind,
        correct = result.correct,
        total = result.total,
        "scored {}",
        payload_path.display()
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            for issue in &exercise.issues {
                println!("WARNING: {issue}");
            }
            print_breakdown(&result);
        }
    }

    attempt.record(&config, exercise.kind, &result, time_spent)
}

fn print_breakdown(result: &ScoreResult) {
    use comfy_table::{Cell, Table};

    if !result.breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Section", "Correct", "Total", "Score"]);
        for category in &result.breakdown {
            table.add_row(vec![
                Cell::new(category.section),
                Cell::new(category.correct),
                Cell::new(category.total),
                Cell::new(format!("{:.0}%", category.percent())),
            ]);
        }
        println!("{table}");
    }

    println!(
        "Score: {}/{} ({}%)",
        result.correct,
        result.total,
        result.rounded_percent()
    );
}
