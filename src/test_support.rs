//! Shared fixtures for unit tests.

use crate::domain::{Field, RawAnswers, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{Classifier, FeatureScaler, ModelError};

/// Healthy 18-24 year old woman; every categorical answer at code 0.
pub(crate) fn baseline_answers() -> RawAnswers {
    RawAnswers::new()
        .with(Field::Sex, "Female")
        .with(Field::GeneralHealth, 2.0)
        .with(Field::PhysicalHealthDays, 0.0)
        .with(Field::MentalHealthDays, 0.0)
        .with(
            Field::LastCheckupTime,
            "Within past year (anytime less than 12 months ago)",
        )
        .with(Field::PhysicalActivities, "Yes")
        .with(Field::SleepHours, 7.0)
        .with(Field::RemovedTeeth, "None of them")
        .with(Field::HadAngina, "No")
        .with(Field::HadStroke, "No")
        .with(Field::HadAsthma, "No")
        .with(Field::HadSkinCancer, "No")
        .with(Field::HadCopd, "No")
        .with(Field::HadDepressiveDisorder, "No")
        .with(Field::HadKidneyDisease, "No")
        .with(Field::HadArthritis, "No")
        .with(Field::HadDiabetes, "No")
        .with(Field::DeafOrHardOfHearing, "No")
        .with(Field::DifficultyConcentrating, "No")
        .with(Field::DifficultyWalking, "No")
        .with(Field::DifficultyDressingBathing, "No")
        .with(Field::SmokerStatus, "Never smoked")
        .with(Field::ChestScan, "No")
        .with(Field::RaceEthnicityCategory, "White only, Non-Hispanic")
        .with(Field::AgeCategory, "Age 18 to 24")
        .with(Field::Bmi, 22.0)
        .with(Field::AlcoholDrinkers, "No")
}

pub(crate) const BASELINE_VECTOR: [f64; FEATURE_COUNT] = [
    0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 7.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 22.0, 0.0,
];

pub(crate) fn canonical_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|n| (*n).to_string()).collect()
}

/// Identity scaler over `n` features.
pub(crate) struct IdentityScaler {
    pub n: usize,
    pub names: Option<Vec<String>>,
}

impl IdentityScaler {
    pub(crate) fn canonical() -> Self {
        Self {
            n: FEATURE_COUNT,
            names: Some(canonical_names()),
        }
    }
}

impl FeatureScaler for IdentityScaler {
    fn n_features(&self) -> usize {
        self.n
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, ModelError> {
        if values.len() != self.n {
            return Err(ModelError::FeatureCount {
                expected: self.n,
                actual: values.len(),
            });
        }
        Ok(values.to_vec())
    }
}

/// Classifier returning fixed outputs regardless of input.
pub(crate) struct FixedClassifier {
    pub n: usize,
    pub label: u8,
    pub p_high: f64,
}

impl FixedClassifier {
    pub(crate) fn new(label: u8, p_high: f64) -> Self {
        Self {
            n: FEATURE_COUNT,
            label,
            p_high,
        }
    }
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        self.n
    }

    fn predict(&self, _scaled: &[f64]) -> Result<u8, ModelError> {
        Ok(self.label)
    }

    fn predict_proba(&self, _scaled: &[f64]) -> Result<[f64; 2], ModelError> {
        Ok([1.0 - self.p_high, self.p_high])
    }
}
