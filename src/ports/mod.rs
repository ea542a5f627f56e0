//! Ports layer: Trait definitions for external artifacts.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the pre-trained model artifacts.

mod model;

pub use model::{Classifier, FeatureScaler, ModelError};
