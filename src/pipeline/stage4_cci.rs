use crate::input::TemplateConfig;
use crate::model::categories::CciBand;
use crate::model::results::{CciItem, CciResult};
use crate::model::stats::mean;
use crate::pipeline::stage1_aggregate::ScreenedResponse;

/// Confidence index over the `isCCI` questions. Returns `None` when none of
/// those questions received a rating.
pub fn run_stage4(
    template: &TemplateConfig,
    rows: &[ScreenedResponse<'_>],
    bands: [f64; 3],
) -> Option<CciResult> {
    let mut items = Vec::new();
    let mut effective_all = Vec::new();

    for q in template.questions().filter(|q| q.question.is_cci) {
        let mut raw = Vec::new();
        let mut effective = Vec::new();
        for row in rows {
            if row.response.question_id != q.question.id {
                continue;
            }
            let Some(rating) = row.rating else {
                continue;
            };
            raw.push(f64::from(rating));
            effective.push(template.effective_rating(q.question, rating));
        }
        if raw.is_empty() {
            continue;
        }
        items.push(CciItem {
            competency_id: q.competency.id.clone(),
            question_id: q.question.id.clone(),
            reverse_scored: q.question.reverse_scored,
            raw_score: mean(&raw),
            effective_score: mean(&effective),
            response_count: raw.len() as u32,
        });
        effective_all.extend(effective);
    }

    if effective_all.is_empty() {
        return None;
    }

    let span = template.scale_span();
    let score = if span > 0.0 {
        (mean(&effective_all) - f64::from(template.scale_min)) / span * 100.0
    } else {
        0.0
    };
    let band = CciBand::from_score(score, bands);
    tracing::debug!(score, band = band.as_str(), items = items.len(), "confidence index");

    Some(CciResult { score, band, items })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_cci.rs"]
mod tests;
