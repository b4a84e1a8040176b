//! Shape issue types.
//!
//! These describe data-level problems in an exercise payload. The resolver
//! records them on the normalized view instead of failing, so callers can
//! render a diagnostic next to whatever part of the exercise did resolve.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Section;

/// A problem found while resolving an exercise payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ShapeIssue {
    /// No known payload layout matched.
    #[error("exercise structure not recognized")]
    UnrecognizedShape,

    /// A multiple-choice item has no options list.
    #[error("{section}[{index}] is multiple choice but has no options")]
    MissingOptions { section: Section, index: usize },

    /// A section was present but held zero items, or was not a list at all.
    #[error("{section} is present but empty")]
    EmptyQuestionSet { section: Section },

    /// A non-scored list (`words`, `phrases`, `prompts`) was present but not a list.
    #[error("{field} is present but is not a list")]
    NotAList { field: String },
}

impl ShapeIssue {
    /// Returns `true` if nothing usable could be rendered.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShapeIssue::UnrecognizedShape)
    }
}
