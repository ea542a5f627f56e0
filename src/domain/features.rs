//! Encoded feature vectors.

use serde::Serialize;

use super::schema::{Field, FEATURE_COUNT};

/// Numeric model input in canonical feature order.
///
/// The encoder always produces exactly [`FEATURE_COUNT`] values.
/// [`FeatureVector::from_vec`] does not check the length; the inference
/// service rejects vectors whose length differs from the fitted scaler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap raw values without validation.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the vector has the canonical feature count.
    #[must_use]
    pub fn is_canonical_len(&self) -> bool {
        self.0.len() == FEATURE_COUNT
    }

    /// Value of a single feature, if present.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.0.get(field.index()).copied()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_field() {
        let mut values = [0.0; FEATURE_COUNT];
        values[Field::Bmi.index()] = 22.0;
        values[Field::SleepHours.index()] = 7.0;
        let vector = FeatureVector::from(values);

        assert!(vector.is_canonical_len());
        assert_eq!(vector.get(Field::Bmi), Some(22.0));
        assert_eq!(vector.get(Field::SleepHours), Some(7.0));
    }

    #[test]
    fn test_short_vector() {
        let vector = FeatureVector::from_vec(vec![1.0, 2.0]);
        assert!(!vector.is_canonical_len());
        assert_eq!(vector.get(Field::Bmi), None);
    }
}
