//! The results pipeline: eight stages, each a pure function of the stages
//! before it plus the snapshot. Only the store performs I/O.

pub mod stage1_aggregate;
pub mod stage2_gap;
pub mod stage3_rank;
pub mod stage4_cci;
pub mod stage5_johari;
pub mod stage6_ceiling;
pub mod stage7_trend;
pub mod stage8_assemble;

use chrono::{DateTime, Utc};

use crate::error::ResultsError;
use crate::input::AssessmentSnapshot;
use crate::model::results::ComputedAssessmentResults;
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::stage1_aggregate::{run_stage1, screen_responses};
use crate::pipeline::stage2_gap::run_stage2;
use crate::pipeline::stage3_rank::run_stage3;
use crate::pipeline::stage4_cci::run_stage4;
use crate::pipeline::stage5_johari::run_stage5;
use crate::pipeline::stage6_ceiling::run_stage6;
use crate::pipeline::stage7_trend::run_stage7;
use crate::pipeline::stage8_assemble::{Stage8Inputs, run_stage8};

/// Computes the full result for one snapshot. Identical inputs give identical
/// output apart from `computed_at`, which the caller supplies.
pub fn compute_results(
    snapshot: &AssessmentSnapshot,
    thresholds: &ScoringThresholds,
    computed_at: DateTime<Utc>,
) -> Result<ComputedAssessmentResults, ResultsError> {
    let template = &snapshot.template;
    template.validate()?;

    let screened = screen_responses(template, &snapshot.responses);
    let aggregates = run_stage1(template, &screened.rows);
    let gap_analysis = run_stage2(template, &aggregates.competencies, thresholds.gap_threshold);
    let ranked = run_stage3(&aggregates.items, thresholds.ranked_items);
    let cci_result = run_stage4(template, &screened.rows, thresholds.cci_bands);
    let johari_window = run_stage5(
        template,
        &aggregates.competencies,
        &gap_analysis,
        thresholds.open_area_floor,
    );
    let current_ceiling = run_stage6(template, &aggregates.competencies, &aggregates.items);

    let ordered = template
        .competencies
        .iter()
        .filter_map(|def| aggregates.competencies.get(&def.id).cloned())
        .collect::<Vec<_>>();
    let trend = run_stage7(
        &snapshot.subject_id,
        &ordered,
        snapshot.prior.as_ref(),
        thresholds.trend_threshold,
    );

    let results = run_stage8(Stage8Inputs {
        template,
        rows: &screened.rows,
        invitations: &snapshot.invitations,
        aggregates,
        gap_analysis,
        ranked,
        cci_result,
        johari_window,
        current_ceiling,
        trend,
        data_quality: screened.issues,
        highlight_count: thresholds.highlight_count,
        computed_at,
    });

    tracing::info!(
        assessment = %snapshot.assessment_id,
        competencies = results.competency_scores.len(),
        gaps = results.gap_analysis.len(),
        cci = results.cci_result.is_some(),
        trend = results.trend.is_some(),
        overall = results.overall_score,
        "results computed"
    );

    Ok(results)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
