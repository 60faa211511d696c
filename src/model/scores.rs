use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input::RaterType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedCompetencyScore {
    pub competency_id: String,
    pub competency_name: String,
    pub scores: BTreeMap<RaterType, f64>,
    pub overall_average: f64,
    pub others_average: f64,
    pub self_score: Option<f64>,
    pub gap: Option<f64>,
    pub response_distribution: BTreeMap<i32, u32>,
    pub rater_agreement: f64,
    pub self_count: u32,
    pub others_count: u32,
    pub rater_count: u32,
}

impl ComputedCompetencyScore {
    pub fn has_others(&self) -> bool {
        self.others_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedItemScore {
    pub question_id: String,
    pub question_text: String,
    pub competency_id: String,
    pub competency_name: String,
    pub scores: BTreeMap<RaterType, f64>,
    pub overall_average: f64,
    pub others_average: f64,
    pub self_score: Option<f64>,
    pub gap: Option<f64>,
    pub response_distribution: BTreeMap<i32, u32>,
    pub rater_agreement: f64,
    pub self_count: u32,
    pub others_count: u32,
    pub rater_count: u32,
}

impl ComputedItemScore {
    pub fn has_others(&self) -> bool {
        self.others_count > 0
    }
}
