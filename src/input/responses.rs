use serde::{Deserialize, Serialize};

/// Relationship of a rater to the assessed subject.
///
/// The declaration order is the canonical report order and the key order of
/// every per-type map in the computed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterType {
    #[serde(rename = "self")]
    SelfRater,
    Manager,
    Peer,
    DirectReport,
}

impl RaterType {
    pub fn all() -> &'static [RaterType] {
        &[
            RaterType::SelfRater,
            RaterType::Manager,
            RaterType::Peer,
            RaterType::DirectReport,
        ]
    }

    pub fn is_self(self) -> bool {
        self == RaterType::SelfRater
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RaterType::SelfRater => "self",
            RaterType::Manager => "manager",
            RaterType::Peer => "peer",
            RaterType::DirectReport => "direct_report",
        }
    }
}

impl std::fmt::Display for RaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rating submitted by one rater for one question.
///
/// `rating` is `None` for "not applicable" answers; such rows only ever
/// contribute their comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResponse {
    #[serde(default)]
    pub rater_id: Option<String>,
    pub rater_type: RaterType,
    pub competency_id: String,
    pub question_id: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl RawResponse {
    /// Key used to group ratings by rater. Rows without an identity are
    /// treated as separate raters, keyed by their position in the input.
    pub fn rater_key(&self, position: usize) -> String {
        match &self.rater_id {
            Some(id) if !id.is_empty() => format!("id:{id}"),
            _ => format!("anon:{position}"),
        }
    }
}
