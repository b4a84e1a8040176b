//! The `lingo stats` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use lingo_core::config::load_config_from;
use lingo_core::model::SkillType;
use lingo_core::progress::ProgressRecord;
use lingo_core::statistics::{
    adaptive_difficulty, summarize, PerformanceSummary, ProgressSummary, MAX_DIFFICULTY,
    MIN_DIFFICULTY,
};

use crate::files;

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    summary: ProgressSummary,
    performance: PerformanceSummary,
    suggested_difficulty: u8,
}

pub fn execute(
    progress: Option<PathBuf>,
    skill: Option<String>,
    base_difficulty: u8,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&base_difficulty) {
        anyhow::bail!(
            "base difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {base_difficulty}"
        );
    }

    let config = load_config_from(config_path.as_deref())?;
    let progress_path = progress.unwrap_or(config.progress_file);

    let mut records = files::load_progress(&progress_path)?;
    if let Some(skill) = skill {
        let skill: SkillType = skill.parse().map_err(anyhow::Error::msg)?;
        records.retain(|r| r.skill_type == skill);
    }
    tracing::debug!("loaded {} record(s) from {}", records.len(), progress_path.display());

    let report = build_report(&records, base_difficulty);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }

    Ok(())
}

fn build_report(records: &[ProgressRecord], base_difficulty: u8) -> StatsReport {
    let today = chrono::Utc::now().date_naive();
    let summary = summarize(records, today);
    let performance = PerformanceSummary::from_records(records);
    StatsReport {
        summary,
        performance,
        suggested_difficulty: adaptive_difficulty(base_difficulty, &performance),
    }
}

fn print_text(report: &StatsReport) {
    use comfy_table::{Cell, Table};

    let summary = &report.summary;
    if summary.attempts == 0 {
        println!("No attempts recorded yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Attempts", "Avg Score", "Time"]);
    for stats in summary.per_skill.values() {
        table.add_row(vec![
            Cell::new(stats.skill),
            Cell::new(stats.attempts),
            Cell::new(format!("{:.1}%", stats.average_score)),
            Cell::new(format!("{}s", stats.total_time_spent)),
        ]);
    }
    println!("{table}");

    println!(
        "Attempts: {}  Average: {:.1}%  Time: {}s",
        summary.attempts, summary.average_score, summary.total_time_spent
    );
    println!("Points: {}", summary.total_points);
    println!("Streak: {} day(s)", summary.streak_days);
    println!(
        "Accuracy: {:.0}%  Consistency: {:.0}%  Improvement: {:+.0}%",
        report.performance.accuracy_rate * 100.0,
        report.performance.consistency_score * 100.0,
        report.performance.improvement_rate * 100.0
    );
    println!("Suggested difficulty: {}", report.suggested_difficulty);
}
