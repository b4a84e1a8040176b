//! Core data model types for lingo.
//!
//! These are the canonical shapes every exercise payload is normalized into,
//! plus the level and skill vocabulary shared with the progress records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ShapeIssue;

/// Candidate articles offered for every grammar-completion blank.
pub const GRAMMAR_COMPLETION_OPTIONS: [&str; 7] = ["le", "la", "l'", "les", "un", "une", "des"];

/// Common European Framework of Reference proficiency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefrLevel::A1 => write!(f, "A1"),
            CefrLevel::A2 => write!(f, "A2"),
            CefrLevel::B1 => write!(f, "B1"),
            CefrLevel::B2 => write!(f, "B2"),
        }
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            other => Err(format!("unknown CEFR level: {other}")),
        }
    }
}

/// The six skills a learner practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Reading,
    Listening,
    Writing,
    Speaking,
    Vocabulary,
    Grammar,
}

impl SkillType {
    pub const ALL: [SkillType; 6] = [
        SkillType::Reading,
        SkillType::Listening,
        SkillType::Writing,
        SkillType::Speaking,
        SkillType::Vocabulary,
        SkillType::Grammar,
    ];
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillType::Reading => write!(f, "reading"),
            SkillType::Listening => write!(f, "listening"),
            SkillType::Writing => write!(f, "writing"),
            SkillType::Speaking => write!(f, "speaking"),
            SkillType::Vocabulary => write!(f, "vocabulary"),
            SkillType::Grammar => write!(f, "grammar"),
        }
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reading" => Ok(SkillType::Reading),
            "listening" => Ok(SkillType::Listening),
            "writing" => Ok(SkillType::Writing),
            "speaking" => Ok(SkillType::Speaking),
            "vocabulary" => Ok(SkillType::Vocabulary),
            "grammar" => Ok(SkillType::Grammar),
            other => Err(format!("unknown skill type: {other}")),
        }
    }
}

/// Canonical exercise kind inferred from a payload's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Reading,
    Listening,
    Writing,
    Speaking,
    Vocabulary,
    Grammar,
    GrammarCompletion,
    Unknown,
}

impl ExerciseKind {
    /// The skill this kind is practiced under, if it was recognized at all.
    pub fn skill(&self) -> Option<SkillType> {
        match self {
            ExerciseKind::Reading => Some(SkillType::Reading),
            ExerciseKind::Listening => Some(SkillType::Listening),
            ExerciseKind::Writing => Some(SkillType::Writing),
            ExerciseKind::Speaking => Some(SkillType::Speaking),
            ExerciseKind::Vocabulary => Some(SkillType::Vocabulary),
            ExerciseKind::Grammar | ExerciseKind::GrammarCompletion => Some(SkillType::Grammar),
            ExerciseKind::Unknown => None,
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseKind::Reading => "reading",
            ExerciseKind::Listening => "listening",
            ExerciseKind::Writing => "writing",
            ExerciseKind::Speaking => "speaking",
            ExerciseKind::Vocabulary => "vocabulary",
            ExerciseKind::Grammar => "grammar",
            ExerciseKind::GrammarCompletion => "grammar_completion",
            ExerciseKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A group of answerable items sharing one answer-key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// `questions[]`, multiple choice or true/false, keyed `q{i}`.
    Questions,
    /// `exercises[]`, free text, keyed `ex{i}`.
    Exercises,
    /// Writing `completions[]`, free text, keyed `comp{i}`.
    Completions,
    /// Vocabulary `matching[]`, keyed `match{i}`.
    Matching,
    /// Position-keyed grammar blanks, keyed `completion{i}`.
    GrammarCompletion,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Questions,
        Section::Exercises,
        Section::Completions,
        Section::Matching,
        Section::GrammarCompletion,
    ];

    pub fn key_prefix(&self) -> &'static str {
        match self {
            Section::Questions => "q",
            Section::Exercises => "ex",
            Section::Completions => "comp",
            Section::Matching => "match",
            Section::GrammarCompletion => "completion",
        }
    }

    /// Answer-store key for the item at `index` in this section.
    pub fn key(&self, index: usize) -> String {
        format!("{}{index}", self.key_prefix())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Questions => "questions",
            Section::Exercises => "exercises",
            Section::Completions => "completions",
            Section::Matching => "matching",
            Section::GrammarCompletion => "grammar_completion",
        };
        f.write_str(name)
    }
}

/// How a single item is answered and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FreeText,
    Completion,
}

/// One answerable item, built by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    /// Ordinal position within its section.
    pub index: usize,
    pub kind: QuestionKind,
    /// The question or sentence shown to the learner.
    #[serde(default)]
    pub prompt: String,
    /// Secondary instruction line (grammar completion only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_bool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_text: Option<String>,
}

/// A vocabulary card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    #[serde(default)]
    pub french: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub example: String,
}

/// The uniform view of an exercise payload.
///
/// Every section is filled whenever it is structurally present in the payload,
/// regardless of `kind`, so a payload mixing categories scores all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedExercise {
    pub kind: ExerciseKind,
    /// Passage, dialogue, rule, writing prompt or scenario, depending on kind.
    pub text: Option<String>,
    #[serde(default)]
    pub questions: Vec<NormalizedQuestion>,
    #[serde(default)]
    pub exercises: Vec<NormalizedQuestion>,
    #[serde(default)]
    pub completions: Vec<NormalizedQuestion>,
    #[serde(default)]
    pub grammar_completions: Vec<NormalizedQuestion>,
    #[serde(default)]
    pub matching: Vec<NormalizedQuestion>,
    #[serde(default)]
    pub words: Vec<VocabularyWord>,
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub prompts: Vec<String>,
    /// Data-level problems found while resolving.
    #[serde(default)]
    pub issues: Vec<ShapeIssue>,
}

impl NormalizedExercise {
    /// An exercise with nothing resolved.
    pub fn unknown() -> Self {
        Self {
            kind: ExerciseKind::Unknown,
            text: None,
            questions: Vec::new(),
            exercises: Vec::new(),
            completions: Vec::new(),
            grammar_completions: Vec::new(),
            matching: Vec::new(),
            words: Vec::new(),
            phrases: Vec::new(),
            prompts: Vec::new(),
            issues: vec![ShapeIssue::UnrecognizedShape],
        }
    }

    pub fn section(&self, section: Section) -> &[NormalizedQuestion] {
        match section {
            Section::Questions => &self.questions,
            Section::Exercises => &self.exercises,
            Section::Completions => &self.completions,
            Section::Matching => &self.matching,
            Section::GrammarCompletion => &self.grammar_completions,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.kind != ExerciseKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(CefrLevel::B1.to_string(), "B1");
        assert_eq!("a2".parse::<CefrLevel>().unwrap(), CefrLevel::A2);
        assert!("C1".parse::<CefrLevel>().is_err());
    }

    #[test]
    fn skill_display_and_parse() {
        for skill in SkillType::ALL {
            assert_eq!(skill.to_string().parse::<SkillType>().unwrap(), skill);
        }
        assert_eq!("Grammar".parse::<SkillType>().unwrap(), SkillType::Grammar);
        assert!("cooking".parse::<SkillType>().is_err());
    }

    #[test]
    fn section_keys_do_not_collide() {
        let keys: std::collections::HashSet<String> =
            Section::ALL.iter().map(|s| s.key(0)).collect();
        assert_eq!(keys.len(), Section::ALL.len());
        assert_eq!(Section::GrammarCompletion.key(3), "completion3");
        assert_eq!(Section::Completions.key(3), "comp3");
    }

    #[test]
    fn kind_maps_to_skill() {
        assert_eq!(ExerciseKind::GrammarCompletion.skill(), Some(SkillType::Grammar));
        assert_eq!(ExerciseKind::Unknown.skill(), None);
        assert_eq!(ExerciseKind::GrammarCompletion.to_string(), "grammar_completion");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ExerciseKind::GrammarCompletion).unwrap();
        assert_eq!(json, "\"grammar_completion\"");
    }
}
