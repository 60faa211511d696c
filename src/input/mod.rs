use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod responses;
pub mod template;

pub use responses::{RaterType, RawResponse};
pub use template::{CompetencyDef, QuestionDef, QuestionRef, TemplateConfig, TemplateError};

use crate::model::results::ComputedAssessmentResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Draft,
    Open,
    Closed,
    Completed,
}

impl AssessmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentStatus::Draft => "draft",
            AssessmentStatus::Open => "open",
            AssessmentStatus::Closed => "closed",
            AssessmentStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invitation bookkeeping for one rater type, supplied by the invitation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCount {
    pub rater_type: RaterType,
    pub invited: u32,
    pub completed: u32,
}

/// An earlier assessment of the same subject, as resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorAssessment {
    pub assessment_id: String,
    pub subject_id: String,
    pub status: AssessmentStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub results: Option<ComputedAssessmentResults>,
}

/// Everything the engine reads for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSnapshot {
    pub assessment_id: String,
    pub subject_id: String,
    pub status: AssessmentStatus,
    pub template: TemplateConfig,
    #[serde(default)]
    pub responses: Vec<RawResponse>,
    #[serde(default)]
    pub invitations: Vec<InvitationCount>,
    #[serde(default)]
    pub prior: Option<PriorAssessment>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
}

pub fn load_snapshot(path: &Path) -> Result<AssessmentSnapshot, InputError> {
    read_json(path)
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
