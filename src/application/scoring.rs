//! Scoring entry point for the presentation layer.

use std::sync::Arc;

use crate::adapters::artifacts::{self, LogisticRegression, StandardScaler};
use crate::application::{FeatureEncoder, InferenceService, ModelContext};
use crate::config::Settings;
use crate::domain::{EncodingError, PredictionResult, RawAnswers};
use crate::ports::{Classifier, FeatureScaler};
use crate::CardioRiskError;

/// Encoder plus inference service: one `score` call per submission.
pub struct RiskScorer<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    encoder: FeatureEncoder,
    inference: InferenceService<S, C>,
}

impl<S, C> RiskScorer<S, C>
where
    S: FeatureScaler,
    C: Classifier,
{
    pub fn new(context: ModelContext<S, C>) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            inference: InferenceService::new(context),
        }
    }

    #[must_use]
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Encode the answers and run inference.
    ///
    /// # Errors
    /// `Encoding` for invalid answers (user-input errors name the field),
    /// `DimensionMismatch`/`Model` for artifact defects. No partial result is
    /// ever returned.
    pub fn score(&self, raw: &RawAnswers) -> Result<PredictionResult, CardioRiskError> {
        let vector = self.encoder.encode(raw).inspect_err(log_rejection)?;
        tracing::debug!("Encoded {} features", vector.len());

        let result = self.inference.predict(&vector)?;
        tracing::info!(
            "Scored submission: label={}, probability={:.2}%",
            result.label,
            result.probability * 100.0
        );
        Ok(result)
    }
}

fn log_rejection(err: &EncodingError) {
    match err {
        EncodingError::SchemaMismatch {
            missing,
            unexpected,
        } => tracing::error!(
            "Answer record does not match the feature schema: missing={:?}, unexpected={:?}",
            missing,
            unexpected
        ),
        other => {
            if let Some(field) = other.field() {
                tracing::warn!("Rejected answer for {}", field);
            }
        }
    }
}

/// Build the production scorer from the configured model directory.
///
/// # Errors
/// Returns `ModelUnavailable` if the artifacts cannot be loaded or do not
/// match the feature schema. Callers must not score without a scorer.
pub fn load_scorer(
    settings: &Settings,
) -> Result<RiskScorer<StandardScaler, LogisticRegression>, CardioRiskError> {
    let (scaler, classifier) = artifacts::load_model_dir(&settings.model_dir, &settings.trust)
        .map_err(|e| {
            tracing::error!("Failed to load model artifacts: {e}");
            CardioRiskError::ModelUnavailable(e.to_string())
        })?;

    let context = ModelContext::new(Arc::new(scaler), Arc::new(classifier))?;
    Ok(RiskScorer::new(context))
}
