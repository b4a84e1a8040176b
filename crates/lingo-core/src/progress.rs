//! Progress records handed to the persistence layer after each attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CefrLevel, SkillType};
use crate::scoring::ScoreResult;

/// What an attempt reports on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub level: CefrLevel,
    pub skill_type: SkillType,
    pub topic: String,
    /// Percent score in [0, 100].
    pub score: f64,
    /// Whole seconds spent on the attempt.
    pub time_spent: u64,
}

impl Submission {
    pub fn new(
        level: CefrLevel,
        skill_type: SkillType,
        topic: impl Into<String>,
        result: &ScoreResult,
        time_spent: u64,
    ) -> Self {
        Self {
            level,
            skill_type,
            topic: topic.into(),
            score: result.percent,
            time_spent,
        }
    }
}

/// A stored attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub level: CefrLevel,
    pub skill_type: SkillType,
    pub topic: String,
    pub score: f64,
    pub time_spent: u64,
    pub completed_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Stamp a submission with a fresh id and the current time.
    pub fn from_submission(submission: Submission) -> Self {
        Self::from_submission_at(submission, Utc::now())
    }

    pub fn from_submission_at(submission: Submission, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: submission.level,
            skill_type: submission.skill_type,
            topic: submission.topic,
            score: submission.score,
            time_spent: submission.time_spent,
            completed_at,
        }
    }

    pub fn points(&self) -> u64 {
        points(self.score)
    }
}

/// Points awarded for a percent score.
pub fn points(score: f64) -> u64 {
    (score.max(0.0) * 10.0).round() as u64
}
