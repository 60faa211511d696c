use serde::{Deserialize, Serialize};

/// Reason a response row was left out of the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualityFlag {
    UnknownCompetency,
    UnknownQuestion,
    QuestionCompetencyMismatch,
    RatingOutOfRange,
    RaterTypeNotAllowed,
    MissingRating,
}

pub fn flag_order() -> &'static [DataQualityFlag] {
    &[
        DataQualityFlag::UnknownCompetency,
        DataQualityFlag::UnknownQuestion,
        DataQualityFlag::QuestionCompetencyMismatch,
        DataQualityFlag::RatingOutOfRange,
        DataQualityFlag::RaterTypeNotAllowed,
        DataQualityFlag::MissingRating,
    ]
}

impl DataQualityFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            DataQualityFlag::UnknownCompetency => "unknown_competency",
            DataQualityFlag::UnknownQuestion => "unknown_question",
            DataQualityFlag::QuestionCompetencyMismatch => "question_competency_mismatch",
            DataQualityFlag::RatingOutOfRange => "rating_out_of_range",
            DataQualityFlag::RaterTypeNotAllowed => "rater_type_not_allowed",
            DataQualityFlag::MissingRating => "missing_rating",
        }
    }

    /// Whether the row is excluded entirely. A missing rating still keeps its
    /// comment.
    pub fn drops_row(self) -> bool {
        !matches!(self, DataQualityFlag::MissingRating)
    }
}

/// Aggregated count of rows that raised one flag at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    pub flag: DataQualityFlag,
    pub competency_id: String,
    pub question_id: String,
    pub count: u32,
}
