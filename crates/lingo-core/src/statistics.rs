//! Aggregate statistics over progress records and adaptive difficulty.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CefrLevel, SkillType};
use crate::progress::ProgressRecord;

/// Lowest and highest exercise difficulty.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

pub fn by_skill(records: &[ProgressRecord], skill: SkillType) -> Vec<&ProgressRecord> {
    records.iter().filter(|r| r.skill_type == skill).collect()
}

pub fn by_level(records: &[ProgressRecord], level: CefrLevel) -> Vec<&ProgressRecord> {
    records.iter().filter(|r| r.level == level).collect()
}

/// Mean score, optionally for one skill. 0 when there are no records.
pub fn average_score(records: &[ProgressRecord], skill: Option<SkillType>) -> f64 {
    let scores: Vec<f64> = records
        .iter()
        .filter(|r| skill.map_or(true, |s| r.skill_type == s))
        .map(|r| r.score)
        .collect();
    mean(&scores)
}

pub fn total_time_spent(records: &[ProgressRecord]) -> u64 {
    records.iter().map(|r| r.time_spent).sum()
}

/// Consecutive days with at least one attempt, counting back from `today`.
///
/// A streak that does not include `today` is 0.
pub fn streak_days(records: &[ProgressRecord], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = records
        .iter()
        .map(|r| r.completed_at.date_naive())
        .collect();

    let mut streak = 0;
    let mut expected = today;
    for day in days.iter().rev() {
        if *day > today {
            continue;
        }
        if *day != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }
    streak
}

/// Per-skill rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub skill: SkillType,
    pub attempts: usize,
    pub average_score: f64,
    pub total_time_spent: u64,
}

/// Rollup across all records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub attempts: usize,
    pub average_score: f64,
    pub total_time_spent: u64,
    pub total_points: u64,
    pub streak_days: u32,
    pub per_skill: BTreeMap<SkillType, SkillStats>,
}

pub fn summarize(records: &[ProgressRecord], today: NaiveDate) -> ProgressSummary {
    let mut per_skill = BTreeMap::new();
    for skill in SkillType::ALL {
        let subset = by_skill(records, skill);
        if subset.is_empty() {
            continue;
        }
        let scores: Vec<f64> = subset.iter().map(|r| r.score).collect();
        per_skill.insert(
            skill,
            SkillStats {
                skill,
                attempts: subset.len(),
                average_score: mean(&scores),
                total_time_spent: subset.iter().map(|r| r.time_spent).sum(),
            },
        );
    }

    ProgressSummary {
        attempts: records.len(),
        average_score: average_score(records, None),
        total_time_spent: total_time_spent(records),
        total_points: records.iter().map(ProgressRecord::points).sum(),
        streak_days: streak_days(records, today),
        per_skill,
    }
}

/// Learner performance signals, each a rate in [0, 1] except improvement,
/// which is signed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Mean score as a fraction.
    pub accuracy_rate: f64,
    /// 1 minus the score standard deviation relative to its maximum (50 points).
    pub consistency_score: f64,
    /// Mean of the later half of attempts minus the earlier half, as a fraction.
    pub improvement_rate: f64,
}

impl PerformanceSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProgressRecord>,
    {
        let mut ordered: Vec<&ProgressRecord> = records.into_iter().collect();
        ordered.sort_by_key(|r| r.completed_at);
        let scores: Vec<f64> = ordered.iter().map(|r| r.score).collect();

        if scores.is_empty() {
            return Self {
                accuracy_rate: 0.0,
                consistency_score: 0.0,
                improvement_rate: 0.0,
            };
        }

        let avg = mean(&scores);
        let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / scores.len() as f64;
        let consistency = (1.0 - variance.sqrt() / 50.0).clamp(0.0, 1.0);

        let improvement = if scores.len() < 2 {
            0.0
        } else {
            let (earlier, later) = scores.split_at(scores.len() / 2);
            (mean(later) - mean(earlier)) / 100.0
        };

        Self {
            accuracy_rate: avg / 100.0,
            consistency_score: consistency,
            improvement_rate: improvement,
        }
    }
}

/// Adjust a base difficulty to the learner's recent performance.
pub fn adaptive_difficulty(base: u8, summary: &PerformanceSummary) -> u8 {
    let mut adjusted = i32::from(base);

    if summary.accuracy_rate < 0.6 {
        adjusted -= 1;
    } else if summary.accuracy_rate > 0.85 {
        adjusted += 1;
    }

    if summary.consistency_score < 0.5 {
        adjusted -= 1;
    }

    if summary.improvement_rate < 0.0 {
        adjusted -= 1;
    } else if summary.improvement_rate > 0.3 {
        adjusted += 1;
    }

    adjusted.clamp(i32::from(MIN_DIFFICULTY), i32::from(MAX_DIFFICULTY)) as u8
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
