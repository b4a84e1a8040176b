//! The `lingo init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("lingo.toml").exists() {
        println!("lingo.toml already exists, skipping.");
    } else {
        std::fs::write("lingo.toml", SAMPLE_CONFIG)?;
        println!("Created lingo.toml");
    }

    std::fs::create_dir_all("payloads")?;
    let example_path = Path::new("payloads/example.json");
    if example_path.exists() {
        println!("payloads/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PAYLOAD)?;
        println!("Created payloads/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: lingo validate --payload payloads/example.json");
    println!("  2. Run: lingo practice --payload payloads/example.json --record");
    println!("  3. Run: lingo stats");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lingo configuration

progress_file = "./lingo-progress.json"

[scoring]
# Count vocabulary matching items toward the score.
score_matching = false

[session]
level = "A1"
topic = "general"
"#;

const EXAMPLE_PAYLOAD: &str = r#"{
  "passage": "Marie habite à Lyon avec sa famille. Elle a deux frères et une sœur.",
  "questions": [
    {
      "question": "Où habite Marie ?",
      "options": ["Paris", "Lyon", "Marseille"],
      "correct": 1
    },
    {
      "question": "Marie a trois frères.",
      "type": "true_false",
      "correct": false
    }
  ]
}
"#;
