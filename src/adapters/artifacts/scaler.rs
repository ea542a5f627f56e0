//! Standardization scaler exported from a fitted `StandardScaler`.

use serde::{Deserialize, Serialize};

use crate::ports::{FeatureScaler, ModelError};

/// `(x - mean) / scale` per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Parse and validate an exported scaler.
    ///
    /// # Errors
    /// Returns `InvalidArtifact` for malformed JSON, mismatched lengths,
    /// non-finite parameters or a zero scale.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let scaler: Self = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::InvalidArtifact(format!("scaler: {e}")))?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();
        if n == 0 || self.mean.len() != n || self.scale.len() != n {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler parameter lengths differ (names={n}, mean={}, scale={})",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler mean for {} is not finite",
                self.feature_names[i]
            )));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler scale for {} must be finite and non-zero",
                self.feature_names[i]
            )));
        }
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, ModelError> {
        if values.len() != self.mean.len() {
            return Err(ModelError::FeatureCount {
                expected: self.mean.len(),
                actual: values.len(),
            });
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}
