use std::collections::BTreeMap;

use crate::input::{RaterType, RawResponse, TemplateConfig};
use crate::model::flags::{DataQualityFlag, DataQualityIssue};
use crate::model::scores::{ComputedCompetencyScore, ComputedItemScore};
use crate::model::stats::{agreement, mean, mean_opt};

/// A response row that passed screening. `rating` is `None` for n/a answers.
#[derive(Debug, Clone, Copy)]
pub struct ScreenedResponse<'a> {
    pub response: &'a RawResponse,
    pub position: usize,
    pub rating: Option<i32>,
}

#[derive(Debug)]
pub struct Screened<'a> {
    pub rows: Vec<ScreenedResponse<'a>>,
    pub issues: Vec<DataQualityIssue>,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub competencies: BTreeMap<String, ComputedCompetencyScore>,
    pub items: BTreeMap<String, ComputedItemScore>,
}

pub fn screen_responses<'a>(template: &TemplateConfig, responses: &'a [RawResponse]) -> Screened<'a> {
    let mut rows = Vec::with_capacity(responses.len());
    let mut counts: BTreeMap<(DataQualityFlag, String, String), u32> = BTreeMap::new();

    for (position, response) in responses.iter().enumerate() {
        let flag = screen_one(template, response);
        if let Some(flag) = flag {
            *counts
                .entry((
                    flag,
                    response.competency_id.clone(),
                    response.question_id.clone(),
                ))
                .or_insert(0) += 1;
            if flag.drops_row() {
                continue;
            }
        }
        rows.push(ScreenedResponse {
            response,
            position,
            rating: response.rating,
        });
    }

    let issues = counts
        .into_iter()
        .map(|((flag, competency_id, question_id), count)| DataQualityIssue {
            flag,
            competency_id,
            question_id,
            count,
        })
        .collect::<Vec<_>>();

    for issue in &issues {
        if issue.flag.drops_row() {
            tracing::warn!(
                flag = issue.flag.as_str(),
                competency = %issue.competency_id,
                question = %issue.question_id,
                count = issue.count,
                "dropped responses"
            );
        }
    }

    Screened { rows, issues }
}

fn screen_one(template: &TemplateConfig, response: &RawResponse) -> Option<DataQualityFlag> {
    let Some(competency) = template.competency(&response.competency_id) else {
        return Some(DataQualityFlag::UnknownCompetency);
    };
    if !competency
        .questions
        .iter()
        .any(|q| q.id == response.question_id)
    {
        return Some(if template.question(&response.question_id).is_some() {
            DataQualityFlag::QuestionCompetencyMismatch
        } else {
            DataQualityFlag::UnknownQuestion
        });
    }
    if !template.allows(response.rater_type) {
        return Some(DataQualityFlag::RaterTypeNotAllowed);
    }
    match response.rating {
        Some(r) if !template.contains_rating(r) => Some(DataQualityFlag::RatingOutOfRange),
        None => Some(DataQualityFlag::MissingRating),
        Some(_) => None,
    }
}

pub fn run_stage1(template: &TemplateConfig, rows: &[ScreenedResponse<'_>]) -> Stage1Output {
    let span = template.scale_span();
    let mut competencies = BTreeMap::new();
    let mut items = BTreeMap::new();

    for competency in &template.competencies {
        let summary = summarize(
            rows.iter()
                .filter(|row| row.response.competency_id == competency.id),
            span,
        );
        competencies.insert(
            competency.id.clone(),
            ComputedCompetencyScore {
                competency_id: competency.id.clone(),
                competency_name: competency.name.clone(),
                scores: summary.scores,
                overall_average: summary.others_average,
                others_average: summary.others_average,
                self_score: summary.self_score,
                gap: summary.gap,
                response_distribution: summary.distribution,
                rater_agreement: summary.agreement,
                self_count: summary.self_count,
                others_count: summary.others_count,
                rater_count: summary.rater_count,
            },
        );

        for question in &competency.questions {
            let summary = summarize(
                rows.iter()
                    .filter(|row| row.response.question_id == question.id),
                span,
            );
            items.insert(
                question.id.clone(),
                ComputedItemScore {
                    question_id: question.id.clone(),
                    question_text: question.text.clone(),
                    competency_id: competency.id.clone(),
                    competency_name: competency.name.clone(),
                    scores: summary.scores,
                    overall_average: summary.others_average,
                    others_average: summary.others_average,
                    self_score: summary.self_score,
                    gap: summary.gap,
                    response_distribution: summary.distribution,
                    rater_agreement: summary.agreement,
                    self_count: summary.self_count,
                    others_count: summary.others_count,
                    rater_count: summary.rater_count,
                },
            );
        }
    }

    tracing::debug!(
        competencies = competencies.len(),
        items = items.len(),
        rows = rows.len(),
        "aggregated responses"
    );

    Stage1Output { competencies, items }
}

#[derive(Debug, Default)]
struct Summary {
    scores: BTreeMap<RaterType, f64>,
    others_average: f64,
    self_score: Option<f64>,
    gap: Option<f64>,
    distribution: BTreeMap<i32, u32>,
    agreement: f64,
    self_count: u32,
    others_count: u32,
    rater_count: u32,
}

fn summarize<'a, 'r>(rows: impl Iterator<Item = &'r ScreenedResponse<'a>>, span: f64) -> Summary
where
    'a: 'r,
{
    let mut by_type: BTreeMap<RaterType, Vec<f64>> = BTreeMap::new();
    let mut by_rater: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut self_ratings = Vec::new();
    let mut others = Vec::new();
    let mut distribution = BTreeMap::new();

    for row in rows {
        let Some(rating) = row.rating else {
            continue;
        };
        let value = f64::from(rating);
        *distribution.entry(rating).or_insert(0u32) += 1;
        by_type
            .entry(row.response.rater_type)
            .or_default()
            .push(value);
        if row.response.rater_type.is_self() {
            self_ratings.push(value);
        } else {
            others.push(value);
            by_rater
                .entry(row.response.rater_key(row.position))
                .or_default()
                .push(value);
        }
    }

    let scores = by_type
        .iter()
        .map(|(rater_type, values)| (*rater_type, mean(values)))
        .collect();
    let others_average = mean(&others);
    let self_score = mean_opt(&self_ratings);
    let gap = match self_score {
        Some(s) if !others.is_empty() => Some(s - others_average),
        _ => None,
    };
    let rater_means = by_rater.values().map(|v| mean(v)).collect::<Vec<_>>();

    Summary {
        scores,
        others_average,
        self_score,
        gap,
        distribution,
        agreement: agreement(&rater_means, span),
        self_count: self_ratings.len() as u32,
        others_count: others.len() as u32,
        rater_count: rater_means.len() as u32,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_aggregate.rs"]
mod tests;
