//! Domain layer: Core survey and prediction types.
//!
//! This module contains pure Rust types with no I/O.
//! The encoding table here is the only place label codes are defined.

mod answers;
pub mod encoding;
mod features;
mod prediction;
mod schema;

pub use answers::{AnswerValue, RawAnswers};
pub use encoding::{EncodingError, EncodingTable, FieldKind, NumericRange, ENCODING_TABLE_VERSION};
pub use features::FeatureVector;
pub use prediction::{PredictionResult, RiskLabel};
pub use schema::{Field, FEATURE_COUNT, FEATURE_NAMES};
