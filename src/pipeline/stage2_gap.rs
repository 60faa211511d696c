use std::collections::BTreeMap;

use crate::input::TemplateConfig;
use crate::model::categories::GapClass;
use crate::model::results::GapEntry;
use crate::model::scores::ComputedCompetencyScore;

/// One entry per competency, in template order, that has both a self score and
/// at least one rating from somebody else.
pub fn run_stage2(
    template: &TemplateConfig,
    competencies: &BTreeMap<String, ComputedCompetencyScore>,
    gap_threshold: f64,
) -> Vec<GapEntry> {
    let mut out = Vec::new();
    for def in &template.competencies {
        let Some(score) = competencies.get(&def.id) else {
            continue;
        };
        let (Some(self_score), Some(gap)) = (score.self_score, score.gap) else {
            continue;
        };
        let classification = GapClass::from_gap(gap, gap_threshold);
        out.push(GapEntry {
            competency_id: score.competency_id.clone(),
            competency_name: score.competency_name.clone(),
            self_score,
            others_average: score.others_average,
            gap,
            classification,
            interpretation: classification.interpretation(&score.competency_name),
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_gap.rs"]
mod tests;
