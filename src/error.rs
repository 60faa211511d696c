use thiserror::Error;

use crate::input::{AssessmentStatus, InputError, TemplateError};
use crate::store::{RecomputeTrigger, StoreError};

/// Top-level failure of a results computation. None of these leaves a
/// partially written result behind.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("invalid template configuration: {0}")]
    Template(#[from] TemplateError),
    #[error("{trigger} does not apply to an assessment in status '{status}'")]
    TriggerNotApplicable {
        trigger: RecomputeTrigger,
        status: AssessmentStatus,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
