//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! encode → scale → classify for one submission at a time.

mod encoder;
mod inference;
mod scoring;

pub use encoder::FeatureEncoder;
pub use inference::{InferenceService, ModelContext};
pub use scoring::{load_scorer, RiskScorer};
