use crate::input::{AssessmentStatus, PriorAssessment};
use crate::model::categories::TrendDirection;
use crate::model::results::{CompetencyChange, TrendComparison};
use crate::model::scores::ComputedCompetencyScore;
use crate::model::stats::{mean, percent};

/// Diff of the current competency scores against a prior completed
/// assessment of the same subject. `None` when the prior does not qualify.
pub fn run_stage7(
    subject_id: &str,
    current: &[ComputedCompetencyScore],
    prior: Option<&PriorAssessment>,
    threshold: f64,
) -> Option<TrendComparison> {
    let prior = prior?;
    if prior.status != AssessmentStatus::Completed {
        tracing::debug!(status = %prior.status, "prior assessment not completed; no trend");
        return None;
    }
    if prior.subject_id != subject_id {
        tracing::warn!(
            prior = %prior.assessment_id,
            "prior assessment belongs to a different subject; no trend"
        );
        return None;
    }
    let previous = prior.results.as_ref()?;

    let mut competency_changes = Vec::new();
    let mut current_matched = Vec::new();
    let mut previous_matched = Vec::new();
    for now in current.iter().filter(|c| c.has_others()) {
        let Some(before) = previous.competency(&now.competency_id) else {
            continue;
        };
        if !before.has_others() {
            continue;
        }
        let change = now.overall_average - before.overall_average;
        competency_changes.push(CompetencyChange {
            competency_id: now.competency_id.clone(),
            competency_name: now.competency_name.clone(),
            previous_score: before.overall_average,
            current_score: now.overall_average,
            change,
            change_percent: percent(change, before.overall_average),
            direction: TrendDirection::from_change(change, threshold),
        });
        current_matched.push(now.overall_average);
        previous_matched.push(before.overall_average);
    }

    let overall_change = mean(&current_matched) - mean(&previous_matched);
    let overall_direction = TrendDirection::from_change(overall_change, threshold);
    tracing::debug!(
        matched = competency_changes.len(),
        overall_change,
        direction = overall_direction.as_str(),
        "trend computed"
    );

    Some(TrendComparison {
        previous_assessment_id: prior.assessment_id.clone(),
        previous_completed_at: prior.completed_at,
        competency_changes,
        overall_change,
        overall_direction,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_trend.rs"]
mod tests;
