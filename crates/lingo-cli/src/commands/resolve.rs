//! The `lingo resolve` command.

use std::path::PathBuf;

use anyhow::Result;

use lingo_core::model::{NormalizedExercise, Section};
use lingo_core::resolver::resolve;

use crate::files;

pub fn execute(payload_path: PathBuf, format: String) -> Result<()> {
    let payload = files::load_payload(&payload_path)?;
    let exercise = resolve(&payload);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&exercise)?),
        _ => print_text(&exercise),
    }

    Ok(())
}

fn print_text(exercise: &NormalizedExercise) {
    println!("Kind: {}", exercise.kind);
    if let Some(text) = &exercise.text {
        println!("\n{text}\n");
    }

    for section in Section::ALL {
        let items = exercise.section(section);
        if !items.is_empty() {
            println!("{section}: {} item(s)", items.len());
        }
    }
    if !exercise.words.is_empty() {
        println!("words: {}", exercise.words.len());
    }
    if !exercise.phrases.is_empty() {
        println!("phrases: {}", exercise.phrases.len());
    }
    if !exercise.prompts.is_empty() {
        println!("prompts: {}", exercise.prompts.len());
    }

    for issue in &exercise.issues {
        println!("  WARNING: {issue}");
    }
}
