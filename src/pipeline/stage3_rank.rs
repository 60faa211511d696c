use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::results::RankedItem;
use crate::model::scores::ComputedItemScore;

#[derive(Debug, Clone, Default)]
pub struct Stage3Output {
    pub top_items: Vec<RankedItem>,
    pub bottom_items: Vec<RankedItem>,
}

/// Global top/bottom `n` items by others-average. Items nobody else rated are
/// not ranked. Equal scores order by question id in both lists.
pub fn run_stage3(items: &BTreeMap<String, ComputedItemScore>, n: usize) -> Stage3Output {
    let mut rated = items
        .values()
        .filter(|item| item.has_others())
        .collect::<Vec<_>>();

    rated.sort_by(|a, b| {
        match b
            .overall_average
            .partial_cmp(&a.overall_average)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => a.question_id.cmp(&b.question_id),
            other => other,
        }
    });
    let top_items = rated.iter().take(n).map(|item| ranked(item)).collect();

    rated.sort_by(|a, b| {
        match a
            .overall_average
            .partial_cmp(&b.overall_average)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => a.question_id.cmp(&b.question_id),
            other => other,
        }
    });
    let bottom_items = rated.iter().take(n).map(|item| ranked(item)).collect();

    Stage3Output {
        top_items,
        bottom_items,
    }
}

fn ranked(item: &ComputedItemScore) -> RankedItem {
    RankedItem {
        question_id: item.question_id.clone(),
        question_text: item.question_text.clone(),
        competency_id: item.competency_id.clone(),
        competency_name: item.competency_name.clone(),
        score: item.overall_average,
        others_count: item.others_count,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
