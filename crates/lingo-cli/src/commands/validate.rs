//! The `lingo validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lingo_core::resolver::resolve;

use crate::files;

pub fn execute(payload_path: PathBuf) -> Result<()> {
    let paths = if payload_path.is_dir() {
        files::collect_payload_files(&payload_path)?
    } else {
        vec![payload_path]
    };

    let mut total_issues = 0;

    for path in &paths {
        let payload = files::load_payload(path)?;
        let exercise = resolve(&payload);
        println!("{}: {}", path.display(), exercise.kind);

        for issue in &exercise.issues {
            println!("  WARNING: {issue}");
        }
        total_issues += exercise.issues.len();
    }

    if total_issues == 0 {
        println!("All payloads valid.");
    } else {
        println!("\n{total_issues} issue(s) found.");
    }

    Ok(())
}
