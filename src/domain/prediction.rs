//! Prediction result types.
//!
//! Represents the output of the cardiovascular risk classifier.

use serde::{Deserialize, Serialize};

/// Binary risk classification produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLabel {
    /// Class 0
    Low,
    /// Class 1
    High,
}

impl RiskLabel {
    /// Class index as used by the classifier.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl From<RiskLabel> for u8 {
    fn from(label: RiskLabel) -> Self {
        label.code()
    }
}

impl TryFrom<u8> for RiskLabel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(format!("Classifier label must be 0 or 1, got {other}")),
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Result of one scored submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Label exactly as the classifier decided it.
    pub label: RiskLabel,

    /// Probability of the high-risk class (0.0 to 1.0)
    pub probability: f64,
}

impl PredictionResult {
    #[must_use]
    pub fn new(label: RiskLabel, probability: f64) -> Self {
        Self { label, probability }
    }

    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.label == RiskLabel::High
    }
}
