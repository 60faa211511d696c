//! The persisted result object and its sections.
//!
//! Optional sections (`cciResult`, `currentCeiling`, `trend`) are omitted from
//! the JSON entirely when absent; consumers test for the key, not for a zeroed
//! object.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::RaterType;
use crate::model::categories::{CciBand, GapClass, TrendDirection};
use crate::model::flags::DataQualityIssue;
use crate::model::scores::{ComputedCompetencyScore, ComputedItemScore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapEntry {
    pub competency_id: String,
    pub competency_name: String,
    pub self_score: f64,
    pub others_average: f64,
    pub gap: f64,
    pub classification: GapClass,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub question_id: String,
    pub question_text: String,
    pub competency_id: String,
    pub competency_name: String,
    pub score: f64,
    pub others_count: u32,
}

/// One row per CCI question, not per response: `raw_score` and
/// `effective_score` are means over every rating of that question, so no
/// individual rater's answer is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CciItem {
    pub competency_id: String,
    pub question_id: String,
    pub reverse_scored: bool,
    pub raw_score: f64,
    pub effective_score: f64,
    pub response_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CciResult {
    pub score: f64,
    pub band: CciBand,
    pub items: Vec<CciItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JohariWindow {
    pub open_area: Vec<String>,
    pub blind_spot: Vec<String>,
    pub hidden_area: Vec<String>,
    pub unknown_area: Vec<String>,
}

impl JohariWindow {
    pub fn len(&self) -> usize {
        self.open_area.len() + self.blind_spot.len() + self.hidden_area.len() + self.unknown_area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingItem {
    pub question_id: String,
    pub question_text: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCeiling {
    pub competency_id: String,
    pub competency_name: String,
    pub subtitle: String,
    pub score: f64,
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_item: Option<CeilingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyChange {
    pub competency_id: String,
    pub competency_name: String,
    pub previous_score: f64,
    pub current_score: f64,
    pub change: f64,
    pub change_percent: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendComparison {
    pub previous_assessment_id: String,
    pub previous_completed_at: Option<DateTime<Utc>>,
    pub competency_changes: Vec<CompetencyChange>,
    pub overall_change: f64,
    pub overall_direction: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRate {
    pub invited: u32,
    pub completed: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyHighlight {
    pub competency_id: String,
    pub competency_name: String,
    pub score: f64,
}

/// Free-text comment tagged by location and rater type. `rater_id` only
/// survives when the template does not anonymize responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    pub competency_id: String,
    pub competency_name: String,
    pub question_id: String,
    pub rater_type: RaterType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rater_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedAssessmentResults {
    pub computed_at: DateTime<Utc>,
    pub overall_score: f64,
    pub response_rate_by_type: BTreeMap<RaterType, ResponseRate>,
    pub competency_scores: Vec<ComputedCompetencyScore>,
    pub item_scores: Vec<ComputedItemScore>,
    pub gap_analysis: Vec<GapEntry>,
    pub top_items: Vec<RankedItem>,
    pub bottom_items: Vec<RankedItem>,
    pub strengths: Vec<CompetencyHighlight>,
    pub development_areas: Vec<CompetencyHighlight>,
    pub comments: Vec<CommentEntry>,
    pub johari_window: JohariWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cci_result: Option<CciResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ceiling: Option<CurrentCeiling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendComparison>,
    #[serde(default)]
    pub data_quality: Vec<DataQualityIssue>,
}

impl ComputedAssessmentResults {
    pub fn competency(&self, id: &str) -> Option<&ComputedCompetencyScore> {
        self.competency_scores.iter().find(|c| c.competency_id == id)
    }

    pub fn item(&self, question_id: &str) -> Option<&ComputedItemScore> {
        self.item_scores.iter().find(|i| i.question_id == question_id)
    }
}
