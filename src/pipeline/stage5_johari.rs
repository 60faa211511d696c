use std::collections::BTreeMap;

use crate::input::TemplateConfig;
use crate::model::categories::JohariQuadrant;
use crate::model::results::{GapEntry, JohariWindow};
use crate::model::scores::ComputedCompetencyScore;

/// Places every template competency in exactly one quadrant, in template
/// order. Competencies without a gap entry land in the unknown area.
pub fn run_stage5(
    template: &TemplateConfig,
    competencies: &BTreeMap<String, ComputedCompetencyScore>,
    gaps: &[GapEntry],
    open_area_floor: f64,
) -> JohariWindow {
    let floor = f64::from(template.scale_min) + template.scale_span() * open_area_floor;
    let mut window = JohariWindow::default();

    for def in &template.competencies {
        let gap = gaps.iter().find(|g| g.competency_id == def.id);
        let quadrant = match gap {
            Some(entry) => {
                let others_high = competencies
                    .get(&def.id)
                    .map(|c| c.others_average >= floor)
                    .unwrap_or(false);
                JohariQuadrant::from_gap_class(entry.classification, others_high)
            }
            None => JohariQuadrant::UnknownArea,
        };
        let name = def.name.clone();
        match quadrant {
            JohariQuadrant::OpenArea => window.open_area.push(name),
            JohariQuadrant::BlindSpot => window.blind_spot.push(name),
            JohariQuadrant::HiddenArea => window.hidden_area.push(name),
            JohariQuadrant::UnknownArea => window.unknown_area.push(name),
        }
    }

    window
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_johari.rs"]
mod tests;
