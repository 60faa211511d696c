//! Persistence of computed results and the serialized recompute entry point.
//!
//! The pipeline itself is pure; this module owns the one side effect. Every
//! recompute for an assessment id takes that id's write lock only around the
//! read-compare-write step, and a result computed from an older snapshot
//! never replaces a newer stored one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ResultsError;
use crate::input::{AssessmentSnapshot, AssessmentStatus};
use crate::model::results::ComputedAssessmentResults;
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::compute_results;

pub mod file;
pub mod memory;

pub use file::FileResultStore;
pub use memory::MemoryResultStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid assessment id '{0}'")]
    InvalidId(String),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored result for '{id}' is not valid JSON: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize result for '{id}': {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for the single result blob owned by each assessment.
pub trait ResultStore: Send + Sync {
    fn load(&self, assessment_id: &str) -> Result<Option<ComputedAssessmentResults>, StoreError>;

    /// Replaces any stored result wholesale.
    fn replace(
        &self,
        assessment_id: &str,
        results: &ComputedAssessmentResults,
    ) -> Result<(), StoreError>;
}

/// Ids become file names, so only a conservative character set is accepted.
pub fn validate_id(assessment_id: &str) -> Result<(), StoreError> {
    let ok = !assessment_id.is_empty()
        && assessment_id.len() <= 128
        && assessment_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidId(assessment_id.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputeTrigger {
    /// A rater submitted a response.
    ResponseSubmitted,
    /// Someone explicitly asked for the result to be rebuilt.
    ExplicitRequest,
}

impl RecomputeTrigger {
    pub fn applies_to(self, status: AssessmentStatus) -> bool {
        match self {
            RecomputeTrigger::ResponseSubmitted => status == AssessmentStatus::Open,
            RecomputeTrigger::ExplicitRequest => matches!(
                status,
                AssessmentStatus::Closed | AssessmentStatus::Completed
            ),
        }
    }
}

impl std::fmt::Display for RecomputeTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecomputeTrigger::ResponseSubmitted => f.write_str("response submission"),
            RecomputeTrigger::ExplicitRequest => f.write_str("explicit recompute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    Written(ComputedAssessmentResults),
    /// A result from a newer snapshot was already stored; nothing was written.
    Superseded { stored_at: DateTime<Utc> },
}

pub struct RecomputeService<S: ResultStore> {
    store: S,
    thresholds: ScoringThresholds,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: ResultStore> RecomputeService<S> {
    pub fn new(store: S, thresholds: ScoringThresholds) -> Self {
        Self {
            store,
            thresholds,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    /// Recomputes with the snapshot taken now.
    pub fn recompute(
        &self,
        trigger: RecomputeTrigger,
        snapshot: &AssessmentSnapshot,
    ) -> Result<RecomputeOutcome, ResultsError> {
        self.recompute_at(trigger, snapshot, Utc::now())
    }

    /// `snapshot_at` is when `snapshot` was read; it becomes `computedAt` and
    /// orders competing writes.
    pub fn recompute_at(
        &self,
        trigger: RecomputeTrigger,
        snapshot: &AssessmentSnapshot,
        snapshot_at: DateTime<Utc>,
    ) -> Result<RecomputeOutcome, ResultsError> {
        let span = tracing::info_span!(
            "recompute",
            assessment = %snapshot.assessment_id,
            trigger = %trigger
        );
        let _guard = span.enter();

        validate_id(&snapshot.assessment_id)?;
        if !trigger.applies_to(snapshot.status) {
            return Err(ResultsError::TriggerNotApplicable {
                trigger,
                status: snapshot.status,
            });
        }

        let results = compute_results(snapshot, &self.thresholds, snapshot_at)?;

        let lock = self.lock_for(&snapshot.assessment_id);
        let outcome = {
            let _write = lock.lock();
            self.write_if_newer(&snapshot.assessment_id, results)
        };
        self.release_lock(&snapshot.assessment_id, &lock);
        outcome
    }

    /// Read-compare-write; the caller holds the assessment's lock.
    fn write_if_newer(
        &self,
        assessment_id: &str,
        results: ComputedAssessmentResults,
    ) -> Result<RecomputeOutcome, ResultsError> {
        let stored = match self.store.load(assessment_id) {
            Ok(stored) => stored,
            Err(StoreError::Corrupt { source, .. }) => {
                tracing::warn!(error = %source, "stored result unreadable; replacing it");
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(stored) = stored {
            if stored.computed_at > results.computed_at {
                tracing::info!(
                    stored_at = %stored.computed_at,
                    snapshot_at = %results.computed_at,
                    "newer result already stored; discarding"
                );
                return Ok(RecomputeOutcome::Superseded {
                    stored_at: stored.computed_at,
                });
            }
        }
        self.store.replace(assessment_id, &results)?;
        tracing::info!("result stored");
        Ok(RecomputeOutcome::Written(results))
    }

    fn lock_for(&self, assessment_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(assessment_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forgets the lock once only the map and `lock` still reference it.
    fn release_lock(&self, assessment_id: &str, lock: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        if Arc::strong_count(lock) <= 2 {
            locks.remove(assessment_id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
