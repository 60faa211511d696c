use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::responses::RaterType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDef {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub reverse_scored: bool,
    #[serde(default, rename = "isCCI")]
    pub is_cci: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyDef {
    pub id: String,
    pub name: String,
    pub questions: Vec<QuestionDef>,
}

/// Survey definition owned by the assessment template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub competencies: Vec<CompetencyDef>,
    pub scale_min: i32,
    pub scale_max: i32,
    #[serde(default)]
    pub scale_labels: BTreeMap<i32, String>,
    #[serde(default)]
    pub anonymize_responses: bool,
    pub rater_types: Vec<RaterType>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no competencies")]
    NoCompetencies,
    #[error("competency '{0}' has no questions")]
    EmptyCompetency(String),
    #[error("invalid rating scale {min}..={max}: min must be below max and the span must fit in i32")]
    InvalidScale { min: i32, max: i32 },
    #[error("template allows no rater types")]
    NoRaterTypes,
    #[error("duplicate competency id '{0}'")]
    DuplicateCompetency(String),
    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),
    #[error("blank identifier in template")]
    BlankId,
}

/// Position of a question inside the template tree.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRef<'a> {
    pub competency: &'a CompetencyDef,
    pub question: &'a QuestionDef,
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.competencies.is_empty() {
            return Err(TemplateError::NoCompetencies);
        }
        let span = i64::from(self.scale_max) - i64::from(self.scale_min);
        if span <= 0 || span > i64::from(i32::MAX) {
            return Err(TemplateError::InvalidScale {
                min: self.scale_min,
                max: self.scale_max,
            });
        }
        if self.rater_types.is_empty() {
            return Err(TemplateError::NoRaterTypes);
        }

        let mut competency_ids = BTreeSet::new();
        let mut question_ids = BTreeSet::new();
        for competency in &self.competencies {
            if competency.id.trim().is_empty() {
                return Err(TemplateError::BlankId);
            }
            if !competency_ids.insert(competency.id.as_str()) {
                return Err(TemplateError::DuplicateCompetency(competency.id.clone()));
            }
            if competency.questions.is_empty() {
                return Err(TemplateError::EmptyCompetency(competency.id.clone()));
            }
            for question in &competency.questions {
                if question.id.trim().is_empty() {
                    return Err(TemplateError::BlankId);
                }
                if !question_ids.insert(question.id.as_str()) {
                    return Err(TemplateError::DuplicateQuestion(question.id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn competency(&self, id: &str) -> Option<&CompetencyDef> {
        self.competencies.iter().find(|c| c.id == id)
    }

    pub fn question(&self, id: &str) -> Option<QuestionRef<'_>> {
        self.competencies.iter().find_map(|competency| {
            competency
                .questions
                .iter()
                .find(|q| q.id == id)
                .map(|question| QuestionRef {
                    competency,
                    question,
                })
        })
    }

    pub fn questions(&self) -> impl Iterator<Item = QuestionRef<'_>> {
        self.competencies.iter().flat_map(|competency| {
            competency.questions.iter().map(move |question| QuestionRef {
                competency,
                question,
            })
        })
    }

    pub fn allows(&self, rater_type: RaterType) -> bool {
        self.rater_types.contains(&rater_type)
    }

    pub fn contains_rating(&self, rating: i32) -> bool {
        (self.scale_min..=self.scale_max).contains(&rating)
    }

    pub fn scale_span(&self) -> f64 {
        f64::from(self.scale_max) - f64::from(self.scale_min)
    }

    /// Rating after the reverse-scoring transform for `question`.
    pub fn effective_rating(&self, question: &QuestionDef, rating: i32) -> f64 {
        let rating = i64::from(rating);
        let value = if question.reverse_scored {
            i64::from(self.scale_max) + i64::from(self.scale_min) - rating
        } else {
            rating
        };
        value as f64
    }
}
