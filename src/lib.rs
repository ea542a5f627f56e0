//! # cardiorisk
//!
//! Cardiovascular risk scoring from health-survey answers.
//!
//! This crate provides:
//! - A single, versioned encoding table for the 27 survey features
//! - A pure feature encoder producing the canonical model input order
//! - An inference service applying a fitted scaler and classifier
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Survey schema, encoding table, feature vectors, predictions
//! - `ports`: Trait definitions for the scaler and classifier artifacts
//! - `adapters`: JSON model artifacts with signed manifests, log sanitization
//! - `application`: Encoder, inference service and the `score` entry point
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod test_support;

pub use application::{FeatureEncoder, InferenceService, ModelContext, RiskScorer};
pub use domain::{
    EncodingError, EncodingTable, FeatureVector, Field, PredictionResult, RawAnswers, RiskLabel,
};

/// Result type for cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioRiskError>;

/// Main error type for cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioRiskError {
    #[error("Invalid survey answers: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Feature vector has {actual} values, scaler was fitted on {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model operation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CardioRiskError {
    /// True for errors caused by the submitted answers themselves.
    ///
    /// These are recoverable: the caller should re-prompt for the named field.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Encoding(
                domain::EncodingError::InvalidCategory { .. }
                    | domain::EncodingError::OutOfRange { .. }
            )
        )
    }
}
