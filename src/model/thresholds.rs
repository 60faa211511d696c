use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{InputError, read_json};

/// Numeric cut points used by the classification stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringThresholds {
    /// |self − others| above this classifies a blind spot or hidden strength.
    pub gap_threshold: f64,
    /// |current − previous| above this is a trend change, otherwise stable.
    pub trend_threshold: f64,
    /// Length of the top and bottom item lists.
    pub ranked_items: usize,
    /// Length of the strengths and development area lists.
    pub highlight_count: usize,
    /// CCI band lower bounds on the 0-100 scale: Moderate, High, Very High.
    pub cci_bands: [f64; 3],
    /// Fraction of the rating scale an aligned competency's others-average
    /// must reach to count as open area (0.5 is the scale midpoint).
    pub open_area_floor: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ScoringThresholds {
    pub fn default_v1() -> Self {
        Self {
            gap_threshold: 0.5,
            trend_threshold: 0.2,
            ranked_items: 5,
            highlight_count: 3,
            cci_bands: [25.0, 50.0, 75.0],
            open_area_floor: 0.5,
        }
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let thresholds: ScoringThresholds = read_json(path)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.gap_threshold.is_finite() || self.gap_threshold < 0.0 {
            return Err(InputError::InvalidThresholds(
                "gapThreshold must be a non-negative number".to_string(),
            ));
        }
        if !self.trend_threshold.is_finite() || self.trend_threshold < 0.0 {
            return Err(InputError::InvalidThresholds(
                "trendThreshold must be a non-negative number".to_string(),
            ));
        }
        let [moderate, high, very_high] = self.cci_bands;
        if !(0.0..=100.0).contains(&moderate) || moderate > high || high > very_high || very_high > 100.0
        {
            return Err(InputError::InvalidThresholds(
                "cciBands must be ascending within 0..=100".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.open_area_floor) {
            return Err(InputError::InvalidThresholds(
                "openAreaFloor must lie in 0..=1".to_string(),
            ));
        }
        Ok(())
    }
}
