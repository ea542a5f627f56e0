//! Model ports: Traits for the fitted scaler and classifier artifacts.
//!
//! Both artifacts are opaque to the application layer. Implementations must
//! be pure queries over state that never changes after loading.

/// Errors raised by model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Artifact integrity check failed: {0}")]
    Integrity(String),

    #[error("Model produced invalid output: {0}")]
    InvalidOutput(String),

    #[error("Expected {expected} input values, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

/// A fitted per-feature scaling transform.
pub trait FeatureScaler: Send + Sync {
    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Column names the scaler was fitted on, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Apply the transform to one vector.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `values` has the wrong length.
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A fitted binary classifier.
pub trait Classifier: Send + Sync {
    /// Number of features the classifier was fitted on.
    fn n_features(&self) -> usize;

    /// Column names the classifier was fitted on, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Class label (0 or 1) under the classifier's own decision rule.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `scaled` has the wrong length.
    fn predict(&self, scaled: &[f64]) -> Result<u8, ModelError>;

    /// Class probabilities `[p_class0, p_class1]`.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `scaled` has the wrong length.
    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], ModelError>;
}
