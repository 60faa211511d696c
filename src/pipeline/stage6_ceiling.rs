use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::input::TemplateConfig;
use crate::model::categories::ScoreLevel;
use crate::model::results::{CeilingItem, CurrentCeiling};
use crate::model::scores::{ComputedCompetencyScore, ComputedItemScore};

struct Candidate<'a> {
    score: &'a ComputedCompetencyScore,
    value: f64,
    lowest_item: Option<&'a ComputedItemScore>,
}

/// The single lowest-scoring competency. Competencies rated by others are
/// preferred; when nobody else has rated anything, self scores stand in.
pub fn run_stage6(
    template: &TemplateConfig,
    competencies: &BTreeMap<String, ComputedCompetencyScore>,
    items: &BTreeMap<String, ComputedItemScore>,
) -> Option<CurrentCeiling> {
    let mut candidates = collect(template, competencies, items, |c| {
        c.has_others().then_some(c.others_average)
    });
    if candidates.is_empty() {
        candidates = collect(template, competencies, items, |c| c.self_score);
    }

    candidates.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                let ai = a.lowest_item.map(item_value).unwrap_or(f64::INFINITY);
                let bi = b.lowest_item.map(item_value).unwrap_or(f64::INFINITY);
                ai.partial_cmp(&bi).unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.score.competency_id.cmp(&b.score.competency_id))
    });

    let pick = candidates.into_iter().next()?;
    let fraction = if template.scale_span() > 0.0 {
        (pick.value - f64::from(template.scale_min)) / template.scale_span()
    } else {
        0.0
    };
    let level = ScoreLevel::from_fraction(fraction);
    let name = &pick.score.competency_name;
    let lowest_item = pick.lowest_item.map(|item| CeilingItem {
        question_id: item.question_id.clone(),
        question_text: item.question_text.clone(),
        score: item_value(item),
    });

    Some(CurrentCeiling {
        competency_id: pick.score.competency_id.clone(),
        competency_name: name.clone(),
        subtitle: format!("{}: {}", name, level.subtitle()),
        score: pick.value,
        narrative: narrative(name, pick.value, template, level, lowest_item.as_ref()),
        lowest_item,
    })
}

fn collect<'a>(
    template: &TemplateConfig,
    competencies: &'a BTreeMap<String, ComputedCompetencyScore>,
    items: &'a BTreeMap<String, ComputedItemScore>,
    value: impl Fn(&ComputedCompetencyScore) -> Option<f64>,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for def in &template.competencies {
        let Some(score) = competencies.get(&def.id) else {
            continue;
        };
        let Some(v) = value(score) else {
            continue;
        };
        let lowest_item = def
            .questions
            .iter()
            .filter_map(|q| items.get(&q.id))
            .filter(|item| item.has_others() || item.self_score.is_some())
            .min_by(|a, b| {
                item_value(a)
                    .partial_cmp(&item_value(b))
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.question_id.cmp(&b.question_id))
            });
        out.push(Candidate {
            score,
            value: v,
            lowest_item,
        });
    }
    out
}

fn item_value(item: &ComputedItemScore) -> f64 {
    if item.has_others() {
        item.others_average
    } else {
        item.self_score.unwrap_or(0.0)
    }
}

fn narrative(
    name: &str,
    score: f64,
    template: &TemplateConfig,
    level: ScoreLevel,
    lowest_item: Option<&CeilingItem>,
) -> String {
    let mut text = format!(
        "{name} is currently your lowest-rated capability at {score:.2} on a {}-{} scale.",
        template.scale_min, template.scale_max
    );
    match level {
        ScoreLevel::Emerging => text.push_str(
            " Building the fundamentals here is likely to lift your overall effectiveness the most.",
        ),
        ScoreLevel::Developing => text.push_str(
            " Focused practice here is the clearest next step in your development.",
        ),
        ScoreLevel::Established => text.push_str(
            " Even your lowest area is solid; treat it as a refinement opportunity.",
        ),
    }
    if let Some(item) = lowest_item {
        text.push_str(&format!(
            " The weakest signal is \"{}\" ({:.2}).",
            item.question_text, item.score
        ));
    }
    text
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_ceiling.rs"]
mod tests;
