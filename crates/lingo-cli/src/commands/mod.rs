pub mod init;
pub mod practice;
pub mod resolve;
pub mod score;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lingo_core::config::{load_config_from, LingoConfig};
use lingo_core::model::{CefrLevel, ExerciseKind, SkillType};
use lingo_core::progress::{ProgressRecord, Submission};
use lingo_core::scoring::ScoreResult;

use crate::files;

/// Options shared by commands that produce an attempt.
#[derive(Args, Debug, Default)]
pub struct AttemptArgs {
    /// Append the attempt to the progress file
    #[arg(long)]
    pub record: bool,

    /// Skill to record under (defaults to the exercise kind's skill)
    #[arg(long)]
    pub skill: Option<String>,

    /// CEFR level to record under (A1, A2, B1, B2)
    #[arg(long)]
    pub level: Option<String>,

    /// Topic to record under
    #[arg(long)]
    pub topic: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AttemptArgs {
    pub fn load_config(&self) -> Result<LingoConfig> {
        load_config_from(self.config.as_deref())
    }

    /// Build the submission for a scored attempt, filling gaps from config.
    pub fn submission(
        &self,
        config: &LingoConfig,
        kind: ExerciseKind,
        result: &ScoreResult,
        time_spent: u64,
    ) -> Result<Submission> {
        let skill = match &self.skill {
            Some(s) => s.parse::<SkillType>().map_err(anyhow::Error::msg)?,
            None => kind
                .skill()
                .with_context(|| format!("cannot infer a skill for a {kind} exercise, pass --skill"))?,
        };
        let level = match &self.level {
            Some(l) => l.parse::<CefrLevel>().map_err(anyhow::Error::msg)?,
            None => config.session.level,
        };
        let topic = self
            .topic
            .clone()
            .unwrap_or_else(|| config.session.topic.clone());

        Ok(Submission::new(level, skill, topic, result, time_spent))
    }

    /// Record the attempt if `--record` was given.
    pub fn record(
        &self,
        config: &LingoConfig,
        kind: ExerciseKind,
        result: &ScoreResult,
        time_spent: u64,
    ) -> Result<()> {
        if !self.record {
            return Ok(());
        }
        let submission = self.submission(config, kind, result, time_spent)?;
        let record = ProgressRecord::from_submission(submission);
        let points = record.points();
        files::append_progress(&config.progress_file, record)?;
        eprintln!(
            "Recorded attempt in {} (+{points} points)",
            config.progress_file.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(percent: f64) -> ScoreResult {
        ScoreResult {
            correct: 0,
            total: 0,
            percent,
            breakdown: vec![],
        }
    }

    #[test]
    fn submission_infers_skill_and_uses_config_defaults() {
        let args = AttemptArgs::default();
        let config = LingoConfig::default();
        let sub = args
            .submission(&config, ExerciseKind::GrammarCompletion, &result(80.0), 12)
            .unwrap();
        assert_eq!(sub.skill_type, SkillType::Grammar);
        assert_eq!(sub.level, CefrLevel::A1);
        assert_eq!(sub.topic, "general");
        assert_eq!(sub.time_spent, 12);
    }

    #[test]
    fn explicit_flags_override() {
        let args = AttemptArgs {
            skill: Some("writing".into()),
            level: Some("b2".into()),
            topic: Some("voyages".into()),
            ..Default::default()
        };
        let sub = args
            .submission(&LingoConfig::default(), ExerciseKind::Reading, &result(0.0), 0)
            .unwrap();
        assert_eq!(sub.skill_type, SkillType::Writing);
        assert_eq!(sub.level, CefrLevel::B2);
        assert_eq!(sub.topic, "voyages");
    }

    #[test]
    fn unknown_kind_needs_a_skill() {
        let err = AttemptArgs::default()
            .submission(&LingoConfig::default(), ExerciseKind::Unknown, &result(0.0), 0)
            .unwrap_err();
        assert!(err.to_string().contains("--skill"));
    }

    #[test]
    fn bad_level_is_rejected() {
        let args = AttemptArgs {
            level: Some("C9".into()),
            ..Default::default()
        };
        assert!(args
            .submission(&LingoConfig::default(), ExerciseKind::Reading, &result(0.0), 0)
            .is_err());
    }
}
