//! Binary logistic regression exported from a fitted `LogisticRegression`.

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Class labels in probability-column order; must be `[0, 1]`.
    pub classes: [u8; 2],
}

impl LogisticRegression {
    /// Parse and validate an exported classifier.
    ///
    /// # Errors
    /// Returns `InvalidArtifact` for malformed JSON, mismatched lengths,
    /// non-finite parameters or classes other than `[0, 1]`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::InvalidArtifact(format!("classifier: {e}")))?;

        let n = model.feature_names.len();
        if n == 0 || model.coefficients.len() != n {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier parameter lengths differ (names={n}, coefficients={})",
                model.coefficients.len()
            )));
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "classifier parameters must be finite".into(),
            ));
        }
        if model.classes != [0, 1] {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier classes must be [0, 1], got {:?}",
                model.classes
            )));
        }

        Ok(model)
    }

    /// `intercept + w·x`.
    fn decision(&self, scaled: &[f64]) -> Result<f64, ModelError> {
        if scaled.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: scaled.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(scaled)
                .map(|(w, x)| w * x)
                .sum::<f64>())
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp() never overflows.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn predict(&self, scaled: &[f64]) -> Result<u8, ModelError> {
        let d = self.decision(scaled)?;
        Ok(if d > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = sigmoid(self.decision(scaled)?);
        Ok([1.0 - p, p])
    }
}
