use serde::{Deserialize, Serialize};

/// Self-vs-others classification of one competency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapClass {
    BlindSpot,
    HiddenStrength,
    Aligned,
}

impl GapClass {
    pub fn from_gap(gap: f64, threshold: f64) -> Self {
        if gap > threshold {
            GapClass::BlindSpot
        } else if gap < -threshold {
            GapClass::HiddenStrength
        } else {
            GapClass::Aligned
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GapClass::BlindSpot => "blind_spot",
            GapClass::HiddenStrength => "hidden_strength",
            GapClass::Aligned => "aligned",
        }
    }

    pub fn interpretation(self, name: &str) -> String {
        match self {
            GapClass::BlindSpot => format!(
                "You rate yourself higher than others on {name}; consider explicit feedback-seeking here."
            ),
            GapClass::HiddenStrength => format!(
                "Others rate you higher than you rate yourself on {name}; this is a strength you can lean on more deliberately."
            ),
            GapClass::Aligned => format!(
                "Your self-view of {name} matches how others see you."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JohariQuadrant {
    OpenArea,
    BlindSpot,
    HiddenArea,
    UnknownArea,
}

impl JohariQuadrant {
    pub fn from_gap_class(class: GapClass, others_high: bool) -> Self {
        match class {
            GapClass::BlindSpot => JohariQuadrant::BlindSpot,
            GapClass::HiddenStrength => JohariQuadrant::HiddenArea,
            GapClass::Aligned if others_high => JohariQuadrant::OpenArea,
            GapClass::Aligned => JohariQuadrant::UnknownArea,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JohariQuadrant::OpenArea => "open_area",
            JohariQuadrant::BlindSpot => "blind_spot",
            JohariQuadrant::HiddenArea => "hidden_area",
            JohariQuadrant::UnknownArea => "unknown_area",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CciBand {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CciBand {
    /// `bands` holds the lower bounds of Moderate, High and Very High.
    pub fn from_score(score: f64, bands: [f64; 3]) -> Self {
        if score >= bands[2] {
            CciBand::VeryHigh
        } else if score >= bands[1] {
            CciBand::High
        } else if score >= bands[0] {
            CciBand::Moderate
        } else {
            CciBand::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CciBand::Low => "Low",
            CciBand::Moderate => "Moderate",
            CciBand::High => "High",
            CciBand::VeryHigh => "Very High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improved,
    Declined,
    Stable,
}

impl TrendDirection {
    pub fn from_change(change: f64, threshold: f64) -> Self {
        if change > threshold {
            TrendDirection::Improved
        } else if change < -threshold {
            TrendDirection::Declined
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Improved => "improved",
            TrendDirection::Declined => "declined",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Coarse level of a score relative to its rating scale, used for the
/// ceiling narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLevel {
    Emerging,
    Developing,
    Established,
}

impl ScoreLevel {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction < 0.4 {
            ScoreLevel::Emerging
        } else if fraction < 0.7 {
            ScoreLevel::Developing
        } else {
            ScoreLevel::Established
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            ScoreLevel::Emerging => "Emerging capability",
            ScoreLevel::Developing => "Developing capability",
            ScoreLevel::Established => "Established capability, relative low point",
        }
    }
}
