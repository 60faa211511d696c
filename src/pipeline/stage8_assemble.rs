use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::input::{InvitationCount, RaterType, TemplateConfig};
use crate::model::flags::DataQualityIssue;
use crate::model::results::{
    CciResult, CommentEntry, CompetencyHighlight, ComputedAssessmentResults, CurrentCeiling,
    GapEntry, JohariWindow, ResponseRate, TrendComparison,
};
use crate::model::scores::ComputedCompetencyScore;
use crate::model::stats::{mean, percent};
use crate::pipeline::stage1_aggregate::{ScreenedResponse, Stage1Output};
use crate::pipeline::stage3_rank::Stage3Output;

/// Who may see rater identities in the assembled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Identified,
    Anonymous,
}

impl Visibility {
    pub fn for_template(template: &TemplateConfig) -> Self {
        if template.anonymize_responses {
            Visibility::Anonymous
        } else {
            Visibility::Identified
        }
    }
}

#[derive(Debug)]
pub struct Stage8Inputs<'a> {
    pub template: &'a TemplateConfig,
    pub rows: &'a [ScreenedResponse<'a>],
    pub invitations: &'a [InvitationCount],
    pub aggregates: Stage1Output,
    pub gap_analysis: Vec<GapEntry>,
    pub ranked: Stage3Output,
    pub cci_result: Option<CciResult>,
    pub johari_window: JohariWindow,
    pub current_ceiling: Option<CurrentCeiling>,
    pub trend: Option<TrendComparison>,
    pub data_quality: Vec<DataQualityIssue>,
    pub highlight_count: usize,
    pub computed_at: DateTime<Utc>,
}

pub fn run_stage8(inputs: Stage8Inputs<'_>) -> ComputedAssessmentResults {
    let template = inputs.template;
    let mut aggregates = inputs.aggregates;

    let competency_scores = template
        .competencies
        .iter()
        .filter_map(|def| aggregates.competencies.remove(&def.id))
        .collect::<Vec<_>>();
    let item_scores = template
        .questions()
        .filter_map(|q| aggregates.items.remove(&q.question.id))
        .collect::<Vec<_>>();

    let rated = competency_scores
        .iter()
        .filter(|c| c.has_others())
        .map(|c| c.overall_average)
        .collect::<Vec<_>>();
    let overall_score = mean(&rated);

    let (strengths, development_areas) = highlights(&competency_scores, inputs.highlight_count);
    let comments = collect_comments(template, inputs.rows);

    let results = ComputedAssessmentResults {
        computed_at: inputs.computed_at,
        overall_score,
        response_rate_by_type: response_rates(template, inputs.invitations),
        competency_scores,
        item_scores,
        gap_analysis: inputs.gap_analysis,
        top_items: inputs.ranked.top_items,
        bottom_items: inputs.ranked.bottom_items,
        strengths,
        development_areas,
        comments,
        johari_window: inputs.johari_window,
        cci_result: inputs.cci_result,
        current_ceiling: inputs.current_ceiling,
        trend: inputs.trend,
        data_quality: inputs.data_quality,
    };

    project_identity(results, Visibility::for_template(template))
}

/// Strips every rater identity when the result is anonymous.
pub fn project_identity(
    mut results: ComputedAssessmentResults,
    visibility: Visibility,
) -> ComputedAssessmentResults {
    if visibility == Visibility::Anonymous {
        for comment in &mut results.comments {
            comment.rater_id = None;
        }
    }
    results
}

fn response_rates(
    template: &TemplateConfig,
    invitations: &[InvitationCount],
) -> BTreeMap<RaterType, ResponseRate> {
    let mut out = BTreeMap::new();
    for &rater_type in &template.rater_types {
        let (invited, completed) = invitations
            .iter()
            .filter(|i| i.rater_type == rater_type)
            .fold((0u32, 0u32), |(inv, done), i| {
                (inv.saturating_add(i.invited), done.saturating_add(i.completed))
            });
        out.insert(
            rater_type,
            ResponseRate {
                invited,
                completed,
                rate: percent(f64::from(completed), f64::from(invited)),
            },
        );
    }
    out
}

fn highlights(
    scores: &[ComputedCompetencyScore],
    k: usize,
) -> (Vec<CompetencyHighlight>, Vec<CompetencyHighlight>) {
    let mut rated = scores.iter().filter(|c| c.has_others()).collect::<Vec<_>>();

    rated.sort_by(|a, b| {
        b.overall_average
            .partial_cmp(&a.overall_average)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.competency_id.cmp(&b.competency_id))
    });
    let strengths = rated.iter().take(k).map(|c| highlight(c)).collect();

    rated.sort_by(|a, b| {
        a.overall_average
            .partial_cmp(&b.overall_average)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.competency_id.cmp(&b.competency_id))
    });
    let development_areas = rated.iter().take(k).map(|c| highlight(c)).collect();

    (strengths, development_areas)
}

fn highlight(score: &ComputedCompetencyScore) -> CompetencyHighlight {
    CompetencyHighlight {
        competency_id: score.competency_id.clone(),
        competency_name: score.competency_name.clone(),
        score: score.overall_average,
    }
}

fn collect_comments(template: &TemplateConfig, rows: &[ScreenedResponse<'_>]) -> Vec<CommentEntry> {
    let order = template
        .questions()
        .enumerate()
        .map(|(idx, q)| (q.question.id.as_str(), (idx, q.competency.name.as_str())))
        .collect::<BTreeMap<_, _>>();

    let mut keyed = Vec::new();
    for row in rows {
        let Some(text) = row.response.comment.as_deref().map(str::trim) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let Some(&(idx, competency_name)) = order.get(row.response.question_id.as_str()) else {
            continue;
        };
        keyed.push((
            (idx, row.response.rater_type, row.position),
            CommentEntry {
                competency_id: row.response.competency_id.clone(),
                competency_name: competency_name.to_string(),
                question_id: row.response.question_id.clone(),
                rater_type: row.response.rater_type,
                text: text.to_string(),
                rater_id: row.response.rater_id.clone(),
            },
        ));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage8_assemble.rs"]
mod tests;
