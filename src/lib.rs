//! Results engine for multi-rater competency assessments.
//!
//! [`pipeline::compute_results`] turns one [`input::AssessmentSnapshot`] into a
//! [`model::results::ComputedAssessmentResults`]; [`store::RecomputeService`]
//! wraps it with the trigger rules and the single serialized write.

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod store;

pub use error::ResultsError;
pub use input::{AssessmentSnapshot, AssessmentStatus, RaterType, RawResponse, TemplateConfig};
pub use model::results::ComputedAssessmentResults;
pub use model::thresholds::ScoringThresholds;
pub use pipeline::compute_results;
pub use store::{RecomputeOutcome, RecomputeService, RecomputeTrigger, ResultStore};

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
pub(crate) mod test_support;
