//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external artifacts:
//! - `artifacts`: JSON scaler/classifier exports behind a signed manifest
//! - `sanitize`: answer and secret filtering for logs

pub mod artifacts;
pub mod sanitize;
