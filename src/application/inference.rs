//! Inference service: Applies the fitted scaler and classifier.
//!
//! This service coordinates:
//! - Dimension check against the fitted scaler
//! - Scaling
//! - Label prediction
//! - Positive-class probability
//!
//! The label is reported as the classifier decided it. It is never
//! re-derived from the probability.

use std::sync::Arc;

use crate::domain::{FeatureVector, PredictionResult, RiskLabel, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{Classifier, FeatureScaler, ModelError};
use crate::CardioRiskError;

/// Loaded model artifacts, immutable after construction.
pub struct ModelContext<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    scaler: Arc<S>,
    classifier: Arc<C>,
}

impl<S, C> Clone for ModelContext<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            scaler: Arc::clone(&self.scaler),
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<S, C> ModelContext<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    /// Pair a scaler with a classifier after checking both match the schema.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` if either artifact was fitted on a different
    /// feature count or column order.
    pub fn new(scaler: Arc<S>, classifier: Arc<C>) -> Result<Self, CardioRiskError> {
        check_artifact("scaler", scaler.n_features(), scaler.feature_names())?;
        check_artifact(
            "classifier",
            classifier.n_features(),
            classifier.feature_names(),
        )?;

        tracing::info!("Model context ready ({} features)", FEATURE_COUNT);
        Ok(Self { scaler, classifier })
    }

    #[must_use]
    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

fn check_artifact(
    kind: &str,
    n_features: usize,
    names: Option<&[String]>,
) -> Result<(), CardioRiskError> {
    if n_features != FEATURE_COUNT {
        return Err(CardioRiskError::ModelUnavailable(format!(
            "{kind} fitted on {n_features} features, expected {FEATURE_COUNT}"
        )));
    }

    if let Some(names) = names {
        if let Some(pos) = names
            .iter()
            .zip(FEATURE_NAMES)
            .position(|(got, want)| got != want)
        {
            return Err(CardioRiskError::ModelUnavailable(format!(
                "{kind} column {pos} is {:?}, expected {:?}",
                names[pos], FEATURE_NAMES[pos]
            )));
        }
        if names.len() != FEATURE_COUNT {
            return Err(CardioRiskError::ModelUnavailable(format!(
                "{kind} records {} column names, expected {FEATURE_COUNT}",
                names.len()
            )));
        }
    }

    Ok(())
}

/// Service for running classifier inference on encoded features.
pub struct InferenceService<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    context: ModelContext<S, C>,
}

impl<S, C> InferenceService<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    /// Create a new inference service.
    pub fn new(context: ModelContext<S, C>) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &ModelContext<S, C> {
        &self.context
    }

    /// Run inference on one feature vector.
    ///
    /// Performs the full pipeline:
    /// 1. Check the vector length against the fitted scaler
    /// 2. Scale
    /// 3. Predict the label
    /// 4. Predict the positive-class probability
    ///
    /// # Errors
    /// `DimensionMismatch` on a length disagreement (an integration defect),
    /// `Model` if an artifact fails or returns an out-of-contract value.
    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, CardioRiskError> {
        let expected = self.context.scaler.n_features();
        if vector.len() != expected {
            tracing::error!(
                "Feature vector length {} does not match scaler ({}); schema drift",
                vector.len(),
                expected
            );
            return Err(CardioRiskError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }

        tracing::debug!("Step 1: Scaling {} features...", expected);
        let scaled = self.context.scaler.transform(vector.as_slice())?;
        if scaled.len() != expected {
            tracing::error!(
                "Scaler returned {} values for {} inputs",
                scaled.len(),
                expected
            );
            return Err(CardioRiskError::DimensionMismatch {
                expected,
                actual: scaled.len(),
            });
        }

        tracing::debug!("Step 2: Predicting label...");
        let code = self.context.classifier.predict(&scaled)?;
        let label = RiskLabel::try_from(code).map_err(ModelError::InvalidOutput)?;

        tracing::debug!("Step 3: Predicting probability...");
        let [_, p_high] = self.context.classifier.predict_proba(&scaled)?;
        if !p_high.is_finite() || !(0.0..=1.0).contains(&p_high) {
            return Err(ModelError::InvalidOutput(format!(
                "positive-class probability {p_high} outside [0, 1]"
            ))
            .into());
        }

        Ok(PredictionResult::new(label, p_high))
    }
}
