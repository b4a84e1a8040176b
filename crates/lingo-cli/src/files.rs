//! File-backed inputs and the JSON progress log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use lingo_core::answers::AnswerStore;
use lingo_core::progress::ProgressRecord;

/// Read an exercise payload. Any JSON value is accepted.
pub fn load_payload(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse payload JSON: {}", path.display()))
}

/// Read an answers file: a JSON object of key → answer.
pub fn load_answers(path: &Path) -> Result<AnswerStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// Recursively collect all `.json` files under a directory, sorted.
pub fn collect_payload_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(collect_payload_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every record in a progress file. A missing file holds no records.
pub fn load_progress(path: &Path) -> Result<Vec<ProgressRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read progress from {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse progress JSON: {}", path.display()))
}

/// Append one record to a progress file, creating it if needed.
pub fn append_progress(path: &Path, record: ProgressRecord) -> Result<()> {
    let mut records = load_progress(path)?;
    records.push(record);

    let json = serde_json::to_string_pretty(&records).context("failed to serialize progress")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write progress to {}", path.display()))?;
    tracing::info!("recorded attempt in {} ({} total)", path.display(), records.len());
    Ok(())
}
